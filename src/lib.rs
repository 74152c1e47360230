//! KubeRLy Test App - a demo service over PostgreSQL and Redis
//!
//! Serves records with cache-aside reads, a cache passthrough endpoint and a
//! dependency health check.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod health;
pub mod models;
pub mod service;
pub mod store;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{AppError, Result};
