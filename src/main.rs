//! Authenticating request gateway (binary).
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌────────────────────────────────────────────┐
//!                     │                 GATEWAY                     │
//!                     │                                             │
//!   Client Request    │  ┌─────────┐   ┌──────────┐   ┌─────────┐  │
//!   ──────────────────┼─▶│  http   │──▶│ routing  │──▶│  auth   │  │
//!                     │  │ server  │   │  table   │   │  guard  │  │
//!                     │  └─────────┘   └──────────┘   └────┬────┘  │
//!                     │                                     │       │
//!   Client Response   │  ┌─────────┐                  ┌────▼────┐  │
//!   ◀─────────────────┼──│  relay  │◀─────────────────│ forward │◀─┼── Backend
//!                     │  └─────────┘                  └─────────┘  │
//!                     │                                             │
//!                     │  config (TOML) · route document (JSON,      │
//!                     │  hot-reloaded) · tracing · shutdown         │
//!                     └────────────────────────────────────────────┘
//! ```
//!
//! The route document is watched and swapped atomically; everything else
//! is immutable once the process is up.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth_gateway::auth::BearerKeyVerifier;
use auth_gateway::config::watcher::RouteWatcher;
use auth_gateway::config::{loader, GatewayConfig};
use auth_gateway::http::HttpServer;
use auth_gateway::lifecycle::Shutdown;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("GATEWAY_CONFIG").unwrap_or_else(|_| "gateway.toml".into());
    let (config, settings_found) = if Path::new(&config_path).exists() {
        (loader::load_config(Path::new(&config_path))?, true)
    } else {
        (GatewayConfig::default(), false)
    };

    // Initialize tracing subscriber; RUST_LOG wins over the config level.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("auth_gateway={}", config.observability.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("auth-gateway v0.1.0 starting");
    if !settings_found {
        tracing::warn!(path = %config_path, "Settings file not found, using defaults");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes_path = %config.routes_path,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    // A broken route document at startup is fatal: nothing is served
    // against a partial table.
    let routes_path = PathBuf::from(&config.routes_path);
    let table = loader::load_routes(&routes_path)?;
    tracing::info!(routes = table.len(), "Route table loaded");

    let (route_watcher, route_updates) = RouteWatcher::new(&routes_path);
    let _watcher_handle = route_watcher.run()?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let verifier = Arc::new(BearerKeyVerifier::new(config.auth.api_key.clone()));
    let shutdown = Shutdown::new();

    let server = HttpServer::new(config, table, verifier);
    server
        .run(listener, route_updates, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
