//! Typed client for the extension dashboard API, speaking through the
//! forwarding gateway's mount prefix.

pub mod client;
pub mod error;
pub mod types;

pub use client::{DashboardClient, DEFAULT_PREFIX};
pub use error::SdkError;
pub use types::{
    Download, ExtensionistFilter, LoginRequest, StateChange, SurveyKind, SurveyState, TokenEnvelope,
};
