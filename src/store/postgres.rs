//! PostgreSQL store backed by a sqlx connection pool.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info, instrument};

use super::{RecordStore, SCHEMA};
use crate::error::Result;
use crate::models::Record;

const MAX_CONNECTIONS: u32 = 5;

/// Shared, cloneable handle to the `test_data` table.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Opens a pool and verifies the server answers.
    ///
    /// The pool connects eagerly, so an unreachable server fails here rather
    /// than on the first request.
    #[instrument(skip(url), name = "connect_postgres")]
    pub async fn connect(url: &str, acquire_timeout: Duration) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await?;
        let store = Self::from_pool(pool);
        store.ping().await?;
        info!("PostgreSQL connection established");
        Ok(store)
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates `test_data` if it does not exist.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        debug!("Schema bootstrap complete");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    #[instrument(skip(self, data), level = "debug")]
    async fn insert(&self, name: &str, data: &str) -> Result<i32> {
        let id: i32 =
            sqlx::query_scalar("INSERT INTO test_data (name, data) VALUES ($1, $2) RETURNING id")
                .bind(name)
                .bind(data)
                .fetch_one(&self.pool)
                .await?;
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Record>> {
        let records = sqlx::query_as::<_, Record>(
            "SELECT id, name, COALESCE(data, '') AS data, created_at FROM test_data ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }
}
