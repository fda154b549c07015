//! Extension Dashboard Gateway Library
//!
//! A same-origin forwarding gateway for the extension-visit admin dashboard.
//! Every request under the mount prefix is relayed to the upstream API with
//! its method, headers and body intact.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::GatewayConfig;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
