//! Store Module
//!
//! Relational store adapters for the `test_data` table.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Record;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Table bootstrap, run once at startup.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS test_data (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    data TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Source of truth for records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()>;

    /// Inserts a record and returns its generated id.
    async fn insert(&self, name: &str, data: &str) -> Result<i32>;

    /// Returns every record ordered by id ascending.
    async fn list_all(&self) -> Result<Vec<Record>>;
}
