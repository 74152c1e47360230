//! In-process cache used in place of Redis by the test suites.
//!
//! Expired entries are dropped lazily when touched.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CacheBackend, CacheEntry, EntryValue};
use crate::error::{AppError, Result};

/// HashMap-backed cache with Redis-like typed values.
///
/// [`MemoryCache::set_available`] simulates an outage: while unavailable every
/// call fails with [`AppError::Cache`].
#[derive(Debug)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    available: AtomicBool,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| !entry.is_expired())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Remaining TTL of `key`; None when absent or without expiry.
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        self.entries
            .read()
            .await
            .get(key)
            .filter(|entry| !entry.is_expired())
            .and_then(CacheEntry::ttl_remaining)
    }

    fn check_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::Cache("connection refused".to_string()))
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

fn purge_expired(entries: &mut HashMap<String, CacheEntry>, key: &str) {
    if entries.get(key).is_some_and(CacheEntry::is_expired) {
        entries.remove(key);
    }
}

fn wrong_type(key: &str, entry: &CacheEntry, wanted: &str) -> AppError {
    AppError::Cache(format!(
        "WRONGTYPE key '{}' holds a {}, not a {}",
        key,
        entry.kind(),
        wanted
    ))
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn ping(&self) -> Result<()> {
        self.check_available()
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        purge_expired(&mut entries, key);
        match entries.get(key) {
            None => Ok(None),
            Some(CacheEntry {
                value: EntryValue::Str(value),
                ..
            }) => Ok(Some(value.clone())),
            Some(entry) => Err(wrong_type(key, entry, "string")),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.check_available()?;
        let entry = CacheEntry::new(EntryValue::Str(value.to_string()), Some(ttl));
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        purge_expired(&mut entries, key);
        Ok(entries.remove(key).is_some())
    }

    async fn hset(&self, key: &str, field: &str, value: &str) -> Result<()> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        purge_expired(&mut entries, key);
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| CacheEntry::new(EntryValue::Hash(HashMap::new()), None));
        match &mut entry.value {
            EntryValue::Hash(hash) => {
                hash.insert(field.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(wrong_type(key, entry, "hash")),
        }
    }

    async fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        purge_expired(&mut entries, key);
        match entries.get(key) {
            None => Ok(None),
            Some(CacheEntry {
                value: EntryValue::Hash(hash),
                ..
            }) => Ok(hash.get(field).cloned()),
            Some(entry) => Err(wrong_type(key, entry, "hash")),
        }
    }

    async fn lpush(&self, key: &str, values: &[String]) -> Result<usize> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        purge_expired(&mut entries, key);
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| CacheEntry::new(EntryValue::List(VecDeque::new()), None));
        match &mut entry.value {
            EntryValue::List(list) => {
                for value in values {
                    list.push_front(value.clone());
                }
                Ok(list.len())
            }
            _ => Err(wrong_type(key, entry, "list")),
        }
    }

    async fn llen(&self, key: &str) -> Result<usize> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        purge_expired(&mut entries, key);
        match entries.get(key) {
            None => Ok(0),
            Some(CacheEntry {
                value: EntryValue::List(list),
                ..
            }) => Ok(list.len()),
            Some(entry) => Err(wrong_type(key, entry, "list")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new();
        cache.set("key1", "value1", Duration::from_secs(60)).await.unwrap();

        assert_eq!(cache.get("key1").await.unwrap(), Some("value1".to_string()));
        assert_eq!(cache.get("missing").await.unwrap(), None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_set_overwrites_and_resets_ttl() {
        let cache = MemoryCache::new();
        cache.set("k", "old", Duration::from_secs(5)).await.unwrap();
        cache.set("k", "new", Duration::from_secs(300)).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap(), Some("new".to_string()));
        assert!(cache.ttl("k").await.unwrap() > Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_expired_entry_is_absent() {
        let cache = MemoryCache::new();
        cache.set("short", "v", Duration::from_millis(30)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(cache.get("short").await.unwrap(), None);
        assert!(!cache.delete("short").await.unwrap());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = MemoryCache::new();
        cache.set("k", "v", Duration::from_secs(60)).await.unwrap();

        assert!(cache.delete("k").await.unwrap());
        assert!(!cache.delete("k").await.unwrap());
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_hash_operations() {
        let cache = MemoryCache::new();
        cache.hset("test_hash", "field1", "value1").await.unwrap();
        cache.hset("test_hash", "field2", "value2").await.unwrap();

        assert_eq!(
            cache.hget("test_hash", "field1").await.unwrap(),
            Some("value1".to_string())
        );
        assert_eq!(cache.hget("test_hash", "field3").await.unwrap(), None);
        assert_eq!(cache.hget("no_hash", "field1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_operations() {
        let cache = MemoryCache::new();
        let items: Vec<String> = vec!["item1".into(), "item2".into(), "item3".into()];

        assert_eq!(cache.lpush("test_list", &items).await.unwrap(), 3);
        assert_eq!(cache.llen("test_list").await.unwrap(), 3);
        assert_eq!(cache.llen("empty_list").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_wrong_type_is_error() {
        let cache = MemoryCache::new();
        cache.set("plain", "v", Duration::from_secs(60)).await.unwrap();

        assert!(matches!(
            cache.hset("plain", "f", "v").await,
            Err(AppError::Cache(_))
        ));
        assert!(cache.llen("plain").await.is_err());

        cache.hset("h", "f", "v").await.unwrap();
        assert!(cache.get("h").await.is_err());
    }

    #[tokio::test]
    async fn test_unavailable_cache_fails() {
        let cache = MemoryCache::new();
        cache.set("k", "v", Duration::from_secs(60)).await.unwrap();
        cache.set_available(false);

        assert!(cache.ping().await.is_err());
        assert!(cache.get("k").await.is_err());
        assert!(cache.delete("k").await.is_err());

        cache.set_available(true);
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));
    }
}
