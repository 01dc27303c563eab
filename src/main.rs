//! Tablero webhook gateway service.
//!
//! Main entry point for the gateway. Initializes tracing, loads
//! configuration, seeds the project store, builds the hook registry, and
//! serves until shutdown.

use std::sync::Arc;

use anyhow::Result;
use tablero_api::{config, start_server, AppState, Config};
use tablero_core::store::MemoryProjectStore;
use tablero_hooks::{HookRegistry, IssueHook, IssueTracker, LoggingTracker, PushHook};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("Starting tablero webhook gateway");

    let config = Config::load()?;
    info!(
        host = %config.host,
        port = config.port,
        request_timeout_s = config.request_timeout,
        "Configuration loaded"
    );

    let store = Arc::new(MemoryProjectStore::new());
    if let Some(path) = &config.projects_file {
        let projects = config::load_projects(path)?;
        info!(count = projects.len(), file = %path.display(), "Seeding project store");
        for project in projects {
            store.insert(project).await;
        }
    } else {
        warn!("No projects file configured; the project store starts empty");
    }

    let tracker: Arc<dyn IssueTracker> = Arc::new(LoggingTracker);
    let hooks = Arc::new(
        HookRegistry::new()
            .register("push", Arc::new(PushHook::new(tracker.clone())))
            .register("issue", Arc::new(IssueHook::new(tracker))),
    );
    info!(hooks = hooks.len(), "Hook registry built");

    let state = AppState::new(store, hooks);
    let addr = config.bind_addr()?;

    info!(%addr, "Tablero is ready to receive webhooks");
    start_server(state, addr, config.request_timeout()).await?;

    info!("Tablero shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,tablero=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
