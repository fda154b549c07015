//! Inbound request handling.
//!
//! # Responsibilities
//! - Narrow the HTTP method to the set the gateway relays
//! - Filter the inbound header set for the upstream hop
//! - Buffer the inbound body for methods that carry one
//!
//! # Design Decisions
//! - GET and HEAD never read or attach a body
//! - An empty body is omitted, not sent as zero bytes
//! - Headers are copied verbatim (authorization included); only `Host` and the
//!   framing headers the HTTP client recomputes are left behind

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderName, Method};

use crate::http::error::GatewayError;
use crate::routing::UpstreamTarget;

/// Framing headers describing this hop's message, recomputed by the client.
const FRAMING_HEADERS: [HeaderName; 2] = [header::CONTENT_LENGTH, header::TRANSFER_ENCODING];

/// Methods the gateway relays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForwardMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
}

impl ForwardMethod {
    pub fn from_http(method: &Method) -> Option<Self> {
        match method.as_str() {
            "GET" => Some(Self::Get),
            "HEAD" => Some(Self::Head),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            "PATCH" => Some(Self::Patch),
            _ => None,
        }
    }

    pub fn as_http(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Head => Method::HEAD,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Delete => Method::DELETE,
            Self::Patch => Method::PATCH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }

    /// Whether an inbound body is relayed at all.
    pub fn carries_body(self) -> bool {
        !matches!(self, Self::Get | Self::Head)
    }
}

impl std::fmt::Display for ForwardMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to be sent upstream.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: ForwardMethod,
    pub target: UpstreamTarget,
    pub headers: HeaderMap,
    /// `None` for GET/HEAD and for empty bodies.
    pub body: Option<Bytes>,
}

impl ForwardRequest {
    /// Build the upstream request from the pieces of an inbound one.
    pub async fn from_inbound(
        method: ForwardMethod,
        target: UpstreamTarget,
        headers: &HeaderMap,
        body: Body,
        max_body_size: usize,
    ) -> Result<Self, GatewayError> {
        let body = if method.carries_body() {
            let bytes = axum::body::to_bytes(body, max_body_size)
                .await
                .map_err(GatewayError::InboundBody)?;
            non_empty(bytes)
        } else {
            None
        };

        Ok(Self {
            method,
            target,
            headers: forwarded_headers(headers),
            body,
        })
    }
}

/// Copy every header except `Host` and hop framing, preserving repeated values.
pub fn forwarded_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound.iter() {
        // HeaderName is always lowercase, so equality is case-insensitive
        if name == header::HOST || FRAMING_HEADERS.contains(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}

fn non_empty(bytes: Bytes) -> Option<Bytes> {
    if bytes.is_empty() {
        None
    } else {
        Some(bytes)
    }
}
