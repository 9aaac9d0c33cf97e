//! Product Cache API - product read/update service with a cache-aside layer

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_cache_api::api::{create_router, AppState};
use product_cache_api::cache::{
    CacheClient, DisabledCacheClient, InMemoryCacheClient, RedisCacheClient, RedisCacheConfig,
};
use product_cache_api::config::{CacheBackend, Config};
use product_cache_api::store::InMemoryProductStore;
use product_cache_api::tasks::spawn_cleanup_task;

/// Main entry point for the product API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the cache client once, falling back to no cache if unreachable
/// 4. Create the product store and service
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_cache_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Product Cache API");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, cache_ttl={}s, cache_timeout={}ms, port={}",
        config.cache_backend, config.cache_ttl, config.cache_timeout_ms, config.server_port
    );

    let (cache, cleanup_handle) = connect_cache(&config).await;

    let store = InMemoryProductStore::seeded()
        .with_latency(Duration::from_millis(config.store_latency_ms));
    let state = AppState::from_parts(Arc::new(store), cache, &config);

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

/// Establishes the process-wide cache client.
///
/// An unreachable Redis is not fatal: the server starts with a disabled cache
/// and serves every read from the store.
async fn connect_cache(config: &Config) -> (Arc<dyn CacheClient>, Option<JoinHandle<()>>) {
    match config.cache_backend {
        CacheBackend::Memory => {
            let cache = Arc::new(InMemoryCacheClient::new());
            let handle = spawn_cleanup_task(cache.clone(), config.cleanup_interval);
            info!("Using in-memory cache");
            (cache as Arc<dyn CacheClient>, Some(handle))
        }
        CacheBackend::Redis => {
            let redis_config = RedisCacheConfig::new(config.redis_url.clone())
                .with_operation_timeout(config.cache_timeout());
            match RedisCacheClient::connect(redis_config).await {
                Ok(cache) => (Arc::new(cache) as Arc<dyn CacheClient>, None),
                Err(e) => {
                    warn!("Redis unavailable on startup, caching disabled: {}", e);
                    (
                        Arc::new(DisabledCacheClient::new(e.to_string())) as Arc<dyn CacheClient>,
                        None,
                    )
                }
            }
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
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

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
