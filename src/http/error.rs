//! Relay failures and the envelope returned for them.
//!
//! Anything that goes wrong before an upstream response is in hand ends up
//! here. A response that did arrive, whatever its status, is never an error.

use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed label carried in every relay failure envelope.
pub const PROXY_ERROR_LABEL: &str = "Proxy error";

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The inbound body could not be read (client abort, over the size limit).
    #[error("failed to read request body: {0}")]
    InboundBody(#[source] axum::Error),

    /// DNS, connect, TLS, timeout, redirect loop or malformed upstream URL.
    #[error("{0}")]
    Upstream(#[from] reqwest::Error),

    /// Upstream answered but the body stream broke off.
    #[error("failed to read upstream response body: {0}")]
    UpstreamBody(#[source] reqwest::Error),
}

impl GatewayError {
    /// Display text followed by every underlying cause, `: `-separated.
    pub fn message(&self) -> String {
        let mut message = self.to_string();
        let mut source = StdError::source(self);

        // Upstream(e) displays e itself, so skip straight to its cause
        if let Self::Upstream(e) = self {
            source = StdError::source(e);
        }

        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.ends_with(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        message
    }
}

/// Body of a 502 relay failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn proxy_error(message: impl Into<String>) -> Self {
        Self {
            error: PROXY_ERROR_LABEL.to_string(),
            message: message.into(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorEnvelope::proxy_error(self.message())),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_envelope_shape() {
        let err = GatewayError::InboundBody(axum::Error::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "peer went away",
        )));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let envelope: ErrorEnvelope = serde_json::from_slice(&body).unwrap();
        assert_eq!(envelope.error, "Proxy error");
        assert!(envelope.message.contains("peer went away"));
    }

    #[test]
    fn test_envelope_serializes_with_fixed_keys() {
        let json = serde_json::to_value(ErrorEnvelope::proxy_error("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Proxy error", "message": "boom"}));
    }

    #[test]
    fn test_message_does_not_repeat_cause() {
        let err = GatewayError::InboundBody(axum::Error::new(std::io::Error::other("length limit exceeded")));
        assert_eq!(err.message(), "failed to read request body: length limit exceeded");
    }
}
