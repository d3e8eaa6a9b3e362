mod catalog;
mod config;
mod errors;
mod form;
mod part_order;
mod report;
mod routes;
mod selection;
mod session;
mod state;
mod storage;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::session::SessionRegistry;
use crate::state::AppState;
use crate::storage::{FileSnapshotStore, InMemorySnapshotStore, SnapshotStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting APF API v{}", env!("CARGO_PKG_VERSION"));

    // Snapshot storage, one JSON file per profile
    let store: Arc<dyn SnapshotStore> = match &config.data_dir {
        Some(dir) => Arc::new(FileSnapshotStore::open(dir.clone()).await?),
        None => {
            warn!("APF_DATA_DIR is empty; form snapshots will not survive a restart");
            Arc::new(InMemorySnapshotStore::new())
        }
    };

    let settings = config.session_settings();
    info!(
        "Persist debounce {:?}, live mode {} (debounce {:?})",
        settings.persist_debounce, settings.live_mode, settings.live_debounce
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        sessions: SessionRegistry::new(store, settings),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the form UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
