//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Gateway handler produces:
//!     → logging.rs (structured log events, request-id spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the trace span and travels upstream as a header
//! - Metrics are cheap (atomic increments behind the `metrics` facade)
//! - No exporter installed means metric calls are no-ops

pub mod logging;
pub mod metrics;
