//! YouTube Player - A thin YouTube search proxy
//!
//! Serves the browser UI and the `/api` endpoints, backed by the YouTube
//! Data API or the mock catalog.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use youtube_player::{api::create_router_with_ui, spawn_cleanup_task, AppState, Config};

/// Main entry point for the search proxy server.
///
/// # Startup Sequence
/// 1. Load `.env` and configuration from environment variables
/// 2. Initialize tracing subscriber for logging
/// 3. Pick the video source (probing the API key if asked) and create the search cache
/// 4. Start background cache cleanup task
/// 5. Create Axum router with all endpoints and the static UI
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let config = Config::from_env();

    // Defaults to "info" level ("debug" in development), can be overridden
    // with RUST_LOG env var
    let default_filter = if config.environment.is_development() {
        "youtube_player=debug,tower_http=debug"
    } else {
        "youtube_player=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting YouTube Player server");
    if dotenv_loaded {
        info!("Loaded environment from .env");
    }
    info!(
        "Configuration loaded: port={}, environment={:?}, cache_ttl={}s, cleanup_interval={}s, upstream_timeout={}s",
        config.server_port,
        config.environment,
        config.search_cache_ttl,
        config.cleanup_interval,
        config.upstream_timeout
    );

    let state = AppState::from_config(&config).await;
    info!(source = state.source.kind().as_str(), "Video source selected");

    // Start background cleanup task
    let cleanup_handle = spawn_cleanup_task(state.cache.clone(), config.cleanup_interval());
    info!("Background cleanup task started");

    let app = create_router_with_ui(state, config.static_dir.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);
    info!("Serving static files from {}", config.static_dir.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to install Ctrl+C handler");
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
                warn!(error = %err, "Failed to install SIGTERM handler");
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

    cleanup_handle.abort();
    warn!("Cleanup task aborted");
}
