use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{api_router, SharedStorage};
use crate::config::ServerConfig;
use crate::storage::MemoryStorage;

/// Build the application router around an injected store.
pub fn build_router(storage: SharedStorage) -> Router {
    api_router()
        .layer(TraceLayer::new_for_http())
        .with_state(storage)
}

/// Start the kanban server with a fresh in-memory store.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let storage: SharedStorage = Arc::new(MemoryStorage::new());
    let app = build_router(storage);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let local_addr = listener.local_addr()?;
    info!("Kanban server listening on http://{}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}
