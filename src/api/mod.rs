//! API Module
//!
//! HTTP handlers and routing for the service REST API.
//!
//! # Endpoints
//! - `GET /` - Route listing
//! - `GET /health` - Health check
//! - `GET /api/test` - Records from the store
//! - `GET /api/data` / `POST /api/data` - Cache-aside records
//! - `GET /api/cache` / `POST /api/cache` - Cache passthrough

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
