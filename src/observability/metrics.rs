//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): relayed requests by method, status, body class
//! - `gateway_request_duration_seconds` (histogram): end-to-end latency by method
//! - `gateway_relay_failures_total` (counter): 502 envelopes by method

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus scrape endpoint. Needs a running Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed relay.
pub fn record_request(method: &'static str, status: u16, class: &'static str, start: Instant) {
    counter!(
        "gateway_requests_total",
        "method" => method,
        "status" => status.to_string(),
        "class" => class
    )
    .increment(1);
    histogram!("gateway_request_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}

/// Record a relay that ended in the 502 envelope.
pub fn record_failure(method: &'static str, start: Instant) {
    counter!("gateway_relay_failures_total", "method" => method).increment(1);
    histogram!("gateway_request_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}
