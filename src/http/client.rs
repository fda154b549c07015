//! Upstream HTTP client.
//!
//! One pooled `reqwest::Client` per process, built from [`UpstreamConfig`].
//! Redirects are followed here so callers never see a 3xx from this hop;
//! reqwest keeps no response cache, so every call reaches the upstream.

use std::time::Duration;

use reqwest::redirect::Policy;

use crate::config::UpstreamConfig;
use crate::http::error::GatewayError;
use crate::http::request::ForwardRequest;

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .redirect(Policy::limited(config.max_redirects));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full upstream URL for a forwarded request.
    pub fn url_for(&self, request: &ForwardRequest) -> String {
        request.target.url(&self.base_url)
    }

    /// Single attempt, no retries.
    pub async fn send(&self, request: ForwardRequest) -> Result<reqwest::Response, GatewayError> {
        let url = self.url_for(&request);
        let mut builder = self
            .http
            .request(request.method.as_http(), url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        Ok(builder.send().await?)
    }
}
