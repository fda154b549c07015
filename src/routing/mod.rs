//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound path (/proxy/admin/surveys/1/7/state) + raw query
//!     → rewrite.rs (strip mount prefix)
//!     → trailing_slash.rs (two known upstream quirks)
//!     → UpstreamTarget (/admin/surveys/1/7/state/, query untouched)
//!     → joined with the configured base URL
//! ```
//!
//! # Design Decisions
//! - Mount prefix fixed at startup, immutable at runtime
//! - No regex in hot path (prefix and segment matching only)
//! - Deterministic: same input always yields the same upstream URL
//! - Exactly two trailing-slash exceptions; no general rule table

pub mod rewrite;
pub mod trailing_slash;

pub use rewrite::UpstreamTarget;
pub use trailing_slash::{is_extensionist_report, is_survey_state_transition, normalize_trailing_slash};
