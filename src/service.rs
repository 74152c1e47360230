//! Data-access service
//!
//! Cache-aside reads and invalidate-on-write for the `test_data` records.
//! The full record list is cached under [`SNAPSHOT_KEY`] as the exact JSON
//! body served to clients, so a HIT replays the bytes of the MISS that
//! populated it.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::CacheBackend;
use crate::error::Result;
use crate::models::Record;
use crate::store::RecordStore;

/// Cache key holding the serialized record list.
pub const SNAPSHOT_KEY: &str = "test_data_cache";

/// Expiry of the snapshot entry.
pub const SNAPSHOT_TTL: Duration = Duration::from_secs(300);

/// Where a listing was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    /// Value of the `X-Cache` response header.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// JSON array of records plus its provenance.
#[derive(Debug, Clone)]
pub struct Listing {
    pub body: String,
    pub cache_status: CacheStatus,
}

#[derive(Clone)]
pub struct DataService {
    store: Arc<dyn RecordStore>,
    cache: Arc<dyn CacheBackend>,
}

impl DataService {
    pub fn new(store: Arc<dyn RecordStore>, cache: Arc<dyn CacheBackend>) -> Self {
        Self { store, cache }
    }

    /// Inserts a record, then drops the snapshot.
    ///
    /// Invalidation runs after the insert succeeds and its failure is only
    /// logged. A reader racing between the two steps may still see the old
    /// snapshot.
    pub async fn create(&self, name: &str, data: &str) -> Result<i32> {
        let id = self.store.insert(name, data).await?;
        debug!("Inserted record {}", id);

        if let Err(err) = self.cache.delete(SNAPSHOT_KEY).await {
            warn!("Failed to invalidate {}: {}", SNAPSHOT_KEY, err);
        }
        Ok(id)
    }

    /// Serves the snapshot when cached, otherwise rebuilds it from the store.
    ///
    /// A cached snapshot is returned without checking freshness. Cache read
    /// and write failures degrade to a MISS served straight from the store.
    pub async fn list(&self) -> Result<Listing> {
        match self.cache.get(SNAPSHOT_KEY).await {
            Ok(Some(body)) => {
                return Ok(Listing {
                    body,
                    cache_status: CacheStatus::Hit,
                })
            }
            Ok(None) => {}
            Err(err) => warn!("Failed to read {}: {}", SNAPSHOT_KEY, err),
        }

        let records = self.store.list_all().await?;
        let body = serde_json::to_string(&records)?;

        if let Err(err) = self.cache.set(SNAPSHOT_KEY, &body, SNAPSHOT_TTL).await {
            warn!("Failed to populate {}: {}", SNAPSHOT_KEY, err);
        }

        Ok(Listing {
            body,
            cache_status: CacheStatus::Miss,
        })
    }

    /// Reads every record from the store, bypassing the cache.
    pub async fn list_uncached(&self) -> Result<Vec<Record>> {
        self.store.list_all().await
    }
}
