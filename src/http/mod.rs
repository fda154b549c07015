//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request under the mount prefix
//!     → server.rs (Axum setup, request ID, tracing)
//!     → forward.rs (per-request relay)
//!         → routing (strip prefix, trailing-slash exceptions)
//!         → request.rs (method, headers minus Host, optional body)
//!         → client.rs (single upstream attempt, redirects followed)
//!         → response.rs (binary/text relay)
//!     → error.rs (502 envelope on relay failure)
//!     → Send to client
//! ```

pub mod client;
pub mod error;
pub mod forward;
pub mod request;
pub mod response;
pub mod server;
pub mod status;

pub use client::UpstreamClient;
pub use error::{ErrorEnvelope, GatewayError};
pub use forward::forward;
pub use request::{ForwardMethod, ForwardRequest};
pub use response::{BodyClass, RelayedBody, RelayedResponse};
pub use server::{AppState, GatewayServer};
