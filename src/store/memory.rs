//! In-process store used in place of PostgreSQL by the test suites.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::RecordStore;
use crate::error::{AppError, Result};
use crate::models::Record;

/// Vec-backed store with SERIAL-style ids.
///
/// [`MemoryStore::set_available`] simulates an outage: while unavailable every
/// call fails with [`AppError::Database`].
#[derive(Debug)]
pub struct MemoryStore {
    records: RwLock<Vec<Record>>,
    available: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::Database("connection refused".to_string()))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        self.check_available()
    }

    async fn insert(&self, name: &str, data: &str) -> Result<i32> {
        self.check_available()?;
        let mut records = self.records.write().await;
        // Ids keep growing like a sequence, never reused.
        let id = records.last().map_or(1, |r| r.id + 1);
        records.push(Record {
            id,
            name: name.to_string(),
            data: data.to_string(),
            created_at: Some(chrono::Utc::now().naive_utc()),
        });
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Record>> {
        self.check_available()?;
        Ok(self.records.read().await.clone())
    }
}
