//! Extension Dashboard Gateway (v1)
//!
//! Relays dashboard API calls to the upstream backend.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                  GATEWAY                     │
//!   Browser request     │  ┌────────┐   ┌─────────┐   ┌────────────┐   │
//!   /proxy/... ─────────┼─▶│ server │──▶│ routing │──▶│  request   │   │
//!                       │  │ layers │   │ rewrite │   │ (no Host)  │   │
//!                       │  └────────┘   └─────────┘   └─────┬──────┘   │
//!                       │                                   ▼          │
//!   Browser response    │  ┌──────────┐               ┌────────────┐   │
//!   ◀───────────────────┼──│ response │◀──────────────│  upstream  │◀──┼──── Upstream API
//!   (or 502 envelope)   │  │ bin/text │               │   client   │   │
//!                       │  └──────────┘               └────────────┘   │
//!                       └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use extension_gateway::config::load_config;
use extension_gateway::lifecycle::{wait_for_signal, Shutdown};
use extension_gateway::observability::{logging, metrics};
use extension_gateway::GatewayServer;

#[derive(Parser)]
#[command(name = "extension-gateway")]
#[command(about = "Forwarding gateway for the extension dashboard API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_tracing(&config.observability);

    tracing::info!("extension-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        mount_prefix = %config.gateway.mount_prefix,
        timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // address validated at load time
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = GatewayServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
