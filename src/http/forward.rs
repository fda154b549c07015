//! The forwarding handler.
//!
//! ```text
//! rewrite path → build upstream request → send → classify → respond
//!                                           │
//!                                           └─ failure → 502 envelope
//! ```

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::client::UpstreamClient;
use crate::http::error::GatewayError;
use crate::http::request::{ForwardMethod, ForwardRequest};
use crate::http::response::RelayedResponse;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::UpstreamTarget;

/// Relay one request upstream and drain the answer.
pub async fn forward(
    client: &UpstreamClient,
    request: ForwardRequest,
) -> Result<RelayedResponse, GatewayError> {
    let upstream = client.send(request).await?;
    RelayedResponse::from_upstream(upstream).await
}

/// Handler mounted on every method under the gateway prefix.
pub async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let Some(method) = ForwardMethod::from_http(request.method()) else {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    };

    let prefix = &state.config.gateway.mount_prefix;
    let Some(target) = UpstreamTarget::from_inbound(prefix, request.uri().path(), request.uri().query())
    else {
        tracing::warn!(request_id = %request_id, path = %request.uri().path(), "Path outside mount prefix");
        return (StatusCode::NOT_FOUND, "No matching route found").into_response();
    };

    let (parts, body) = request.into_parts();
    let result = match ForwardRequest::from_inbound(
        method,
        target,
        &parts.headers,
        body,
        state.config.gateway.max_body_size,
    )
    .await
    {
        Ok(forward_request) => {
            tracing::debug!(
                request_id = %request_id,
                method = %method,
                upstream = %state.client.url_for(&forward_request),
                body_len = forward_request.body.as_ref().map_or(0, |b| b.len()),
                "Forwarding request"
            );
            forward(&state.client, forward_request).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(relayed) => {
            let status = relayed.status;
            if status.is_server_error() {
                tracing::warn!(request_id = %request_id, method = %method, status = %status, "Upstream server error relayed");
            }
            metrics::record_request(method.as_str(), status.as_u16(), relayed.class().as_str(), start_time);
            relayed.into_response()
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, method = %method, error = %e.message(), "Relay failed");
            metrics::record_failure(method.as_str(), start_time);
            e.into_response()
        }
    }
}
