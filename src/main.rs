//! Smart Cache - A predictive, priority-aware in-memory cache server
//!
//! Serves the cache manager over HTTP with scored eviction, dependency
//! invalidation, and predictive preload hints.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use smart_cache::api::create_router;
use smart_cache::tasks::spawn_preload_listener;
use smart_cache::{AppState, CacheHandle, Config};

/// Main entry point for the Smart Cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Start the cache handle (cleanup driver and metrics sampler)
/// 4. Subscribe a listener to preload hints
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Destroy the cache on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smart_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Smart Cache Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_size={}MB, max_entries={}, default_ttl={}ms, cleanup_interval={}ms, port={}",
        config.cache.max_size_mb,
        config.cache.max_entries,
        config.cache.default_ttl_ms,
        config.cache.cleanup_interval_ms,
        config.server_port
    );

    let handle =
        CacheHandle::start(config.cache.clone()).with_metrics_sampling(config.metrics_interval_ms);
    let state = AppState::from_shared(handle.cache());

    // Stand-in for a data-fetch layer: warming is left to clients
    let listener_handle = spawn_preload_listener(handle.subscribe().await, |hint| {
        info!(key = %hint.key, "preload suggested");
    });

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    listener_handle.abort();
    handle.destroy().await;
    info!("Cache destroyed, background tasks stopped");

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
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
}
