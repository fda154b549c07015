//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the upstream base URL is an absolute http(s) URL
//! - Check the mount prefix shape
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::{SocketAddr, ToSocketAddrs};

use thiserror::Error;
use url::Url;

use crate::config::schema::{GatewayConfig, STATUS_PATH};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("upstream.base_url {0:?} is not a valid absolute URL")]
    InvalidBaseUrl(String),

    #[error("upstream.base_url scheme must be http or https, got {0:?}")]
    UnsupportedScheme(String),

    #[error("gateway.mount_prefix {0:?} must start with '/', not end with '/', and hold no route syntax")]
    InvalidMountPrefix(String),

    #[error("gateway.mount_prefix {0:?} collides with the status endpoint")]
    ReservedPrefix(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{field} {value:?} is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },
}

/// Validate a loaded configuration, collecting every error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::UnsupportedScheme(url.scheme().to_string()));
        }
        Ok(_) => {}
        Err(_) => errors.push(ValidationError::InvalidBaseUrl(config.upstream.base_url.clone())),
    }

    let prefix = &config.gateway.mount_prefix;
    if !prefix.starts_with('/')
        || prefix.ends_with('/')
        || prefix.contains(['{', '}', '*', '?', '#'])
        || prefix.split('/').any(|segment| segment.starts_with(':'))
    {
        errors.push(ValidationError::InvalidMountPrefix(prefix.clone()));
    } else if prefix == STATUS_PATH {
        errors.push(ValidationError::ReservedPrefix(prefix.clone()));
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::Zero("upstream.timeout_secs"));
    }
    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::Zero("upstream.connect_timeout_secs"));
    }
    if config.gateway.max_body_size == 0 {
        errors.push(ValidationError::Zero("gateway.max_body_size"));
    }

    if !resolves(&config.listener.bind_address) {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `host:port` with a literal IP or a resolvable host name, as `TcpListener::bind` takes it.
fn resolves(address: &str) -> bool {
    address
        .to_socket_addrs()
        .map(|mut addrs| addrs.next().is_some())
        .unwrap_or(false)
}
