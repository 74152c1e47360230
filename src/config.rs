//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with defaults that
/// match the docker-compose service names.
#[derive(Clone)]
pub struct Config {
    /// PostgreSQL host
    pub postgres_host: String,
    /// PostgreSQL port
    pub postgres_port: u16,
    /// PostgreSQL user
    pub postgres_user: String,
    /// PostgreSQL password
    pub postgres_password: String,
    /// PostgreSQL database name
    pub postgres_db: String,
    /// Redis host
    pub redis_host: String,
    /// Redis port
    pub redis_port: u16,
    /// HTTP listen port
    pub server_port: u16,
    /// Upper bound in seconds for each health check ping
    pub health_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POSTGRES_HOST` (default: postgres)
    /// - `POSTGRES_PORT` (default: 5432)
    /// - `POSTGRES_USER` (default: postgres)
    /// - `POSTGRES_PASSWORD` (default: postgres)
    /// - `POSTGRES_DB` (default: testdb)
    /// - `REDIS_HOST` (default: redis)
    /// - `REDIS_PORT` (default: 6379)
    /// - `PORT` (default: 8080)
    /// - `HEALTH_TIMEOUT_SECS` (default: 5)
    ///
    /// Empty or unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            postgres_host: string_var("POSTGRES_HOST").unwrap_or(defaults.postgres_host),
            postgres_port: parsed_var("POSTGRES_PORT").unwrap_or(defaults.postgres_port),
            postgres_user: string_var("POSTGRES_USER").unwrap_or(defaults.postgres_user),
            postgres_password: string_var("POSTGRES_PASSWORD")
                .unwrap_or(defaults.postgres_password),
            postgres_db: string_var("POSTGRES_DB").unwrap_or(defaults.postgres_db),
            redis_host: string_var("REDIS_HOST").unwrap_or(defaults.redis_host),
            redis_port: parsed_var("REDIS_PORT").unwrap_or(defaults.redis_port),
            server_port: parsed_var("PORT").unwrap_or(defaults.server_port),
            health_timeout: parsed_var("HEALTH_TIMEOUT_SECS").unwrap_or(defaults.health_timeout),
        }
    }

    /// PostgreSQL connection URL for sqlx.
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode=disable",
            self.postgres_user,
            self.postgres_password,
            self.postgres_host,
            self.postgres_port,
            self.postgres_db
        )
    }

    /// Redis connection URL, database 0, no password.
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/0", self.redis_host, self.redis_port)
    }

    /// Address the HTTP server binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.server_port))
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            postgres_host: "postgres".to_string(),
            postgres_port: 5432,
            postgres_user: "postgres".to_string(),
            postgres_password: "postgres".to_string(),
            postgres_db: "testdb".to_string(),
            redis_host: "redis".to_string(),
            redis_port: 6379,
            server_port: 8080,
            health_timeout: 5,
        }
    }
}

// Password stays out of the startup log line.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("postgres_host", &self.postgres_host)
            .field("postgres_port", &self.postgres_port)
            .field("postgres_user", &self.postgres_user)
            .field("postgres_password", &"***")
            .field("postgres_db", &self.postgres_db)
            .field("redis_host", &self.redis_host)
            .field("redis_port", &self.redis_port)
            .field("server_port", &self.server_port)
            .field("health_timeout", &self.health_timeout)
            .finish()
    }
}

fn string_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn parsed_var<T: FromStr>(name: &str) -> Option<T> {
    string_var(name).and_then(|v| v.parse().ok())
}
