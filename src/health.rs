//! Health Aggregator
//!
//! Pings the store and the cache independently and folds the results into a
//! [`HealthResponse`].

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::cache::CacheBackend;
use crate::error::Result;
use crate::models::{ComponentStatus, HealthResponse};
use crate::store::RecordStore;

/// Default bound on each dependency ping.
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs both pings concurrently; each one that errors or exceeds `timeout`
/// marks only its own component unhealthy.
pub async fn check(
    store: &dyn RecordStore,
    cache: &dyn CacheBackend,
    timeout: Duration,
) -> HealthResponse {
    let (database, cache) = tokio::join!(
        probe("database", timeout, store.ping()),
        probe("cache", timeout, cache.ping()),
    );
    HealthResponse::new(database, cache)
}

async fn probe<F>(component: &str, timeout: Duration, ping: F) -> ComponentStatus
where
    F: Future<Output = Result<()>>,
{
    match tokio::time::timeout(timeout, ping).await {
        Ok(Ok(())) => ComponentStatus::Healthy,
        Ok(Err(err)) => {
            warn!("Health check for {} failed: {}", component, err);
            ComponentStatus::Unhealthy
        }
        Err(_) => {
            warn!(
                "Health check for {} timed out after {}ms",
                component,
                timeout.as_millis()
            );
            ComponentStatus::Unhealthy
        }
    }
}
