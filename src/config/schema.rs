//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Environment variable that overrides [`UpstreamConfig::base_url`].
pub const UPSTREAM_URL_ENV: &str = "GATEWAY_UPSTREAM_URL";

/// Upstream base URL used when neither the config file nor the environment sets one.
pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8000/api/v1";

/// Liveness endpoint served next to the mount prefix.
pub const STATUS_PATH: &str = "/status";

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream API the gateway relays to.
    pub upstream: UpstreamConfig,

    /// Mount prefix and inbound limits.
    pub gateway: MountConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Absolute base URL, e.g. `https://api.example.org/api/v1`.
    pub base_url: String,

    /// Total time allowed for one upstream round trip, in seconds.
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Maximum redirects followed before giving up.
    pub max_redirects: usize,

    /// Route upstream calls through HTTP(S)_PROXY from the environment.
    pub system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 5,
            max_redirects: 10,
            system_proxy: false,
        }
    }
}

/// Where the gateway is mounted and how much it accepts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MountConfig {
    /// Path prefix stripped before relaying (no trailing slash).
    pub mount_prefix: String,

    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            mount_prefix: "/proxy".to_string(),
            max_body_size: 25 * 1024 * 1024, // 25MB, survey attachments
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [upstream]
            base_url = "https://api.example.org/api/v1"
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.base_url, "https://api.example.org/api/v1");
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.gateway.mount_prefix, "/proxy");
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_empty_toml_falls_back_to_default_upstream() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.upstream.base_url, DEFAULT_UPSTREAM_URL);
    }
}
