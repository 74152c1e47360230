//! KubeRLy Test App - a demo service over PostgreSQL and Redis
//!
//! Serves records with cache-aside reads, a cache passthrough endpoint and a
//! dependency health check.

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kuberly_test_app::cache::RedisCache;
use kuberly_test_app::store::PgStore;
use kuberly_test_app::{create_router, AppState, Config};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect to PostgreSQL and create the table if needed
/// 4. Connect to Redis
/// 5. Serve HTTP until SIGINT/SIGTERM
///
/// Any failure before the listener is up ends the process with an error.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kuberly_test_app=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting KubeRLy Test App");

    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    let store = PgStore::connect(&config.database_url(), config.health_timeout())
        .await
        .context("failed to connect to postgres")?;
    store
        .ensure_schema()
        .await
        .context("failed to init database")?;

    let cache = RedisCache::connect(&config.redis_url(), config.health_timeout())
        .await
        .context("failed to connect to redis")?;

    let state = AppState::new(Arc::new(store), Arc::new(cache))
        .with_health_timeout(config.health_timeout());
    let app = create_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", err);
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
                tracing::error!("Failed to install SIGTERM handler: {}", err);
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
