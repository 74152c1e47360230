//! Redis cache backed by a reconnecting connection manager.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use tracing::{debug, info, instrument};

use super::CacheBackend;
use crate::error::{AppError, Result};

/// Cloneable handle to a single Redis server.
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RedisCache")
    }
}

impl RedisCache {
    /// Connects and verifies the server answers PING within `timeout`.
    #[instrument(skip(url), name = "connect_redis")]
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::open(url)?;
        let manager = tokio::time::timeout(timeout, client.get_connection_manager())
            .await
            .map_err(|_| {
                AppError::Cache(format!("Connection timed out after {}ms", timeout.as_millis()))
            })??;
        let cache = Self { manager };
        tokio::time::timeout(timeout, cache.ping())
            .await
            .map_err(|_| AppError::Cache("PING timed out".to_string()))??;
        info!("Redis connection established");
        Ok(cache)
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    async fn ping(&self) -> Result<()> {
        let mut conn = self.manager.clone();
        let response: String = redis::cmd("PING").query_async(&mut conn).await?;
        debug!("Redis PING response: {}", response);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    #[instrument(skip(self, value), level = "debug", fields(value_len = value.len()))]
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.manager.clone();
        // EX takes whole seconds and rejects zero.
        let seconds = ttl.as_secs().max(1);
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(seconds)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.manager.clone();
        let removed: usize = conn.del(key).await?;
        Ok(removed > 0)
    }

    async fn hset(&self, key: &str, field: &str, value: &str) -> Result<()> {
        let mut conn = self.manager.clone();
        let _: () = conn.hset(key, field, value).await?;
        Ok(())
    }

    async fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.hget(key, field).await?;
        Ok(value)
    }

    async fn lpush(&self, key: &str, values: &[String]) -> Result<usize> {
        let mut conn = self.manager.clone();
        let len: usize = conn.lpush(key, values).await?;
        Ok(len)
    }

    async fn llen(&self, key: &str) -> Result<usize> {
        let mut conn = self.manager.clone();
        let len: usize = conn.llen(key).await?;
        Ok(len)
    }
}
