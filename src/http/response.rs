//! Upstream response relay.
//!
//! # Responsibilities
//! - Classify the upstream body as binary or text from its content-type
//! - Buffer the body whole and rebuild a local response around it
//!
//! # Design Decisions
//! - Classification is a case-sensitive substring test on the raw header
//! - Binary bodies are relayed byte-for-byte with content-disposition
//! - Text bodies are read as UTF-8 regardless of the charset parameter and
//!   relayed as-is; a missing content-type becomes `application/json`
//! - Compressed bodies arrive already decoded by the upstream client
//! - Only status, content-type and content-disposition cross the hop

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::error::GatewayError;

/// Content-type fragments that mark a download rather than an API payload.
pub const BINARY_MARKERS: [&str; 4] = ["octet-stream", "excel", "spreadsheetml", "application/vnd"];

/// Content-type assumed for text bodies the upstream left unlabelled.
pub const DEFAULT_TEXT_CONTENT_TYPE: &str = "application/json";

/// How a response body is carried back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyClass {
    Binary,
    Text,
}

impl BodyClass {
    pub fn classify(content_type: Option<&str>) -> Self {
        match content_type {
            Some(ct) if BINARY_MARKERS.iter().any(|marker| ct.contains(marker)) => Self::Binary,
            _ => Self::Text,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayedBody {
    Binary(Bytes),
    Text(String),
}

/// What the caller gets back after a successful round trip.
#[derive(Debug, Clone)]
pub struct RelayedResponse {
    pub status: StatusCode,
    pub content_type: HeaderValue,
    /// Present only for binary bodies; empty when upstream sent none.
    pub content_disposition: Option<HeaderValue>,
    pub body: RelayedBody,
}

impl RelayedResponse {
    /// Drain an upstream response into a relayable one.
    pub async fn from_upstream(upstream: reqwest::Response) -> Result<Self, GatewayError> {
        let status = upstream.status();
        let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
        let class = BodyClass::classify(content_type.as_ref().and_then(|v| v.to_str().ok()));

        match class {
            BodyClass::Binary => {
                let content_disposition = upstream
                    .headers()
                    .get(header::CONTENT_DISPOSITION)
                    .cloned()
                    .unwrap_or_else(|| HeaderValue::from_static(""));
                let bytes = upstream.bytes().await.map_err(GatewayError::UpstreamBody)?;

                Ok(Self {
                    status,
                    // a binary class implies the header was present
                    content_type: content_type
                        .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream")),
                    content_disposition: Some(content_disposition),
                    body: RelayedBody::Binary(bytes),
                })
            }
            BodyClass::Text => {
                // UTF-8 whatever the charset parameter says; bytes are never recoded
                let bytes = upstream.bytes().await.map_err(GatewayError::UpstreamBody)?;
                let text = String::from_utf8_lossy(&bytes).into_owned();

                Ok(Self {
                    status,
                    content_type: content_type
                        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_TEXT_CONTENT_TYPE)),
                    content_disposition: None,
                    body: RelayedBody::Text(text),
                })
            }
        }
    }

    pub fn class(&self) -> BodyClass {
        match self.body {
            RelayedBody::Binary(_) => BodyClass::Binary,
            RelayedBody::Text(_) => BodyClass::Text,
        }
    }
}

impl IntoResponse for RelayedResponse {
    fn into_response(self) -> Response {
        let body = match self.body {
            RelayedBody::Binary(bytes) => Body::from(bytes),
            RelayedBody::Text(text) => Body::from(text),
        };

        let mut response = Response::new(body);
        *response.status_mut() = self.status;
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, self.content_type);
        if let Some(disposition) = self.content_disposition {
            headers.insert(header::CONTENT_DISPOSITION, disposition);
        }
        response
    }
}
