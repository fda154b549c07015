//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the gateway and status handlers
//! - Wire up middleware (tracing, request ID)
//! - Bind server to listener
//! - Drain on shutdown

use std::sync::Arc;

use axum::{
    routing::{get, MethodRouter},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::schema::STATUS_PATH;
use crate::config::GatewayConfig;
use crate::http::client::UpstreamClient;
use crate::http::forward::forward_handler;
use crate::http::status::get_status;
use crate::lifecycle::ShutdownSignal;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub client: UpstreamClient,
}

/// HTTP server for the forwarding gateway.
pub struct GatewayServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

impl GatewayServer {
    /// Create a new server. Fails only if the HTTP client cannot be built.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let config = Arc::new(config);
        let client = UpstreamClient::from_config(&config.upstream)?;

        let state = AppState {
            config: config.clone(),
            client,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let prefix = config.gateway.mount_prefix.as_str();

        Router::new()
            .route(STATUS_PATH, get(get_status))
            .route(prefix, relay())
            .route(&format!("{}/", prefix), relay())
            .route(&format!("{}/{{*path}}", prefix), relay())
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mount_prefix = %self.config.gateway.mount_prefix,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The router, for driving requests without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// GET (and HEAD through it), POST, PUT, DELETE, PATCH.
fn relay() -> MethodRouter<AppState> {
    get(forward_handler)
        .post(forward_handler)
        .put(forward_handler)
        .delete(forward_handler)
        .patch(forward_handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn server() -> GatewayServer {
        let mut config = GatewayConfig::default();
        // nothing listens here; relay attempts fail fast
        config.upstream.base_url = "http://127.0.0.1:9".into();
        config.upstream.timeout_secs = 2;
        GatewayServer::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let response = server()
            .into_router()
            .oneshot(Request::get("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let status: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(status["status"], "operational");
        assert_eq!(status["mount_prefix"], "/proxy");
    }

    #[tokio::test]
    async fn test_unmounted_path_is_not_found() {
        let response = server()
            .into_router()
            .oneshot(Request::get("/elsewhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unsupported_method_rejected() {
        let response = server()
            .into_router()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/proxy/admin/login")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_request_id_echoed() {
        let response = server()
            .into_router()
            .oneshot(
                Request::get("/status")
                    .header("x-request-id", "req-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers().get("x-request-id").unwrap(), "req-123");
    }
}
