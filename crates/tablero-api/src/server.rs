//! HTTP server configuration and request routing.
//!
//! Provides Axum server setup with middleware stack and graceful shutdown
//! for the webhook gateway. Requests flow through middleware in order:
//! 1. Request ID generation
//! 2. Request/response logging
//! 3. Timeout enforcement (30s default)
//! 4. Handler execution
//!
//! # Graceful Shutdown
//!
//! The server handles SIGTERM gracefully: it stops accepting new
//! connections and waits for in-flight requests before returning.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tablero_core::store::ProjectStore;
use tablero_hooks::registry::HookRegistry;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::handlers;

/// Request timeout applied when none is configured explicitly.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state injected into every handler.
///
/// Both members are immutable after startup: the store is an external
/// read-only collaborator and the registry is sealed at construction, so
/// the state is safe for unlimited concurrent readers.
#[derive(Clone)]
pub struct AppState {
    /// Project record point-reads.
    pub store: Arc<dyn ProjectStore>,
    /// Event kind to hook dispatch table.
    pub hooks: Arc<HookRegistry>,
}

impl AppState {
    /// Creates application state from its collaborators.
    pub fn new(store: Arc<dyn ProjectStore>, hooks: Arc<HookRegistry>) -> Self {
        Self { store, hooks }
    }
}

/// Creates the Axum router with all routes and middleware.
///
/// Sets up the webhook endpoint, health probes, request tracing, and
/// timeout handling with [`DEFAULT_REQUEST_TIMEOUT`].
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
///
/// use tablero_api::{create_router, AppState};
/// use tablero_core::store::MemoryProjectStore;
/// use tablero_hooks::HookRegistry;
///
/// let state = AppState::new(Arc::new(MemoryProjectStore::new()), Arc::new(HookRegistry::new()));
/// let app = create_router(state);
/// // Serve the app...
/// ```
pub fn create_router(state: AppState) -> Router {
    create_router_with_timeout(state, DEFAULT_REQUEST_TIMEOUT)
}

/// Creates the router with an explicit request timeout.
pub fn create_router_with_timeout(state: AppState, request_timeout: Duration) -> Router {
    let health_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/live", get(handlers::liveness_check));

    let hook_routes = Router::new().route("/hooks/gitlab", post(handlers::gitlab_webhook));

    Router::new()
        .merge(health_routes)
        .merge(hook_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(inject_request_id))
        .with_state(state)
}

/// Middleware to inject request ID into all responses.
///
/// Adds X-Request-Id header for tracing requests across services.
async fn inject_request_id(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let mut req = req;
    req.extensions_mut().insert(request_id.clone());

    let mut response = next.run(req).await;

    if let Ok(header_value) = request_id.parse() {
        response.headers_mut().insert("X-Request-Id", header_value);
    }

    response
}

/// Starts the HTTP server with graceful shutdown support.
///
/// Binds to the specified address and serves requests until a shutdown
/// signal is received.
///
/// # Errors
///
/// Returns `std::io::Error` if the port is already in use or the network
/// interface is unavailable.
pub async fn start_server(
    state: AppState,
    addr: SocketAddr,
    request_timeout: Duration,
) -> Result<(), std::io::Error> {
    let app = create_router_with_timeout(state, request_timeout);

    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("HTTP server listening on {}", actual_addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("HTTP server stopped gracefully");
    Ok(())
}

/// Waits for shutdown signal (CTRL+C or SIGTERM).
///
/// Enables graceful shutdown on:
/// - CTRL+C (SIGINT) - Development
/// - SIGTERM - Kubernetes/Docker
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received CTRL+C, starting graceful shutdown");
        },
        () = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }

    warn!("Waiting for in-flight requests to complete");
}
