//! HTTP server setup and the request pipeline.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all pipeline handler
//! - Wire up middleware (tracing, whole-request timeout)
//! - Hold the atomically swappable route table snapshot
//! - Run the pipeline: match route → authenticate → forward → relay
//! - Apply route table updates from the watcher channel
//!
//! # Design Decisions
//! - Each request runs in its own task; the only shared state is the
//!   read-only table snapshot behind ArcSwap
//! - Every stage short-circuits into a terminal JSON error response;
//!   every path through the handler writes exactly one response

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::{self, TokenVerifier};
use crate::config::GatewayConfig;
use crate::forward::Forwarder;
use crate::http::error::GatewayError;
use crate::http::response::relay;
use crate::routing::RouteTable;

/// Application state injected into the pipeline handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<ArcSwap<RouteTable>>,
    pub forwarder: Arc<Forwarder>,
    pub verifier: Arc<dyn TokenVerifier>,
}

/// HTTP server hosting the gateway pipeline.
pub struct HttpServer {
    router: Router,
    routes: Arc<ArcSwap<RouteTable>>,
}

impl HttpServer {
    /// Create a new server from settings, an initial route table, and the
    /// token verifier.
    pub fn new(
        config: GatewayConfig,
        table: RouteTable,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        let routes = Arc::new(ArcSwap::from_pointee(table));

        let state = AppState {
            routes: routes.clone(),
            forwarder: Arc::new(Forwarder::new(config.timeouts.clone())),
            verifier,
        };

        let router = Self::build_router(&config, state);
        Self { router, routes }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Tables arriving on `route_updates` are swapped in atomically;
    /// in-flight requests finish on the snapshot they loaded.
    pub async fn run(
        self,
        listener: TcpListener,
        mut route_updates: mpsc::UnboundedReceiver<RouteTable>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.routes.load().len(),
            "HTTP server starting"
        );

        let routes = self.routes.clone();
        tokio::spawn(async move {
            while let Some(table) = route_updates.recv().await {
                tracing::info!(routes = table.len(), "Route table swapped");
                routes.store(Arc::new(table));
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: runs the pipeline and renders errors.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    match handle(state, request).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

/// The pipeline: match → authenticate → forward → relay.
async fn handle(state: AppState, request: Request<Body>) -> Result<Response, GatewayError> {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::debug!(method = %method, path = %path, "Handling request");

    let table = state.routes.load_full();
    let route = table.match_request(method.as_str(), &path).ok_or_else(|| {
        tracing::warn!(method = %method, path = %path, "No route matched");
        GatewayError::RouteNotFound
    })?;

    auth::authenticate(route, request.headers(), state.verifier.as_ref()).map_err(|e| {
        tracing::warn!(method = %method, path = %path, "Request rejected by auth guard");
        e
    })?;

    let upstream = state.forwarder.forward(route, request).await?;

    Ok(relay(upstream))
}

/// Wait for Ctrl+C or an explicit shutdown trigger.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
        _ = shutdown.recv() => {
            tracing::info!("Shutdown triggered");
        }
    }
}
