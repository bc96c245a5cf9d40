//! Doc Cache - A read-through document cache
//!
//! Serves the cache-fronted document API over HTTP, backed by the in-process
//! document store.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use doc_cache::api::create_router;
use doc_cache::{spawn_cleanup_task, AppState, Config, MemoryDocumentStore};

/// Main entry point for the document cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the document store and the cache-fronted service
/// 4. Start the background TTL sweep, unless disabled
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting document cache server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_ttl={}s, cache_max={}MB, port={}, cleanup_interval={}s",
        config.cache_ttl_seconds,
        config.cache_max_megabytes,
        config.server_port,
        config.cleanup_interval
    );

    let store = Arc::new(MemoryDocumentStore::new());
    let state = AppState::from_config(store, &config);
    info!("Document service initialized");

    let cleanup_handle = if config.cleanup_interval > 0 {
        let handle = spawn_cleanup_task(state.service.cache().clone(), config.cleanup_interval);
        info!("Background TTL sweep started");
        Some(handle)
    } else {
        info!("Background TTL sweep disabled");
        None
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then aborts the sweep task.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("TTL sweep task aborted");
    }
}
