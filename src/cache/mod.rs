//! Cache Module
//!
//! Key/value cache adapters with TTL: Redis in production, an in-process map
//! in tests.

mod entry;
mod memory;
mod redis_cache;


use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::{CacheEntry, EntryValue};
pub use memory::MemoryCache;
pub use redis_cache::RedisCache;

/// Key/value operations the service and the self-test harness need.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Checks that the cache is reachable.
    async fn ping(&self) -> Result<()>;

    /// Returns the string stored at `key`, None when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` at `key`, replacing any previous value, expiring after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Removes `key`. Returns whether it existed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Sets `field` in the hash at `key`.
    async fn hset(&self, key: &str, field: &str, value: &str) -> Result<()>;

    async fn hget(&self, key: &str, field: &str) -> Result<Option<String>>;

    /// Pushes each value onto the head of the list at `key`. Returns the new length.
    async fn lpush(&self, key: &str, values: &[String]) -> Result<usize>;

    async fn llen(&self, key: &str) -> Result<usize>;
}
