//! API Handlers
//!
//! HTTP request handlers for each service endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::cache::CacheBackend;
use crate::error::{AppError, Result};
use crate::health::{self, DEFAULT_HEALTH_TIMEOUT};
use crate::models::{
    CacheQuery, CacheValueResponse, CreateRecordRequest, HealthResponse, Record, SetCacheRequest,
    StatusResponse,
};
use crate::service::DataService;
use crate::store::RecordStore;

/// Response header reporting whether a listing came from the cache.
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Application state shared across all handlers.
///
/// Holds the process-wide store and cache handles. Both are injected so tests
/// can substitute the in-memory adapters.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub cache: Arc<dyn CacheBackend>,
    pub data: DataService,
    pub health_timeout: Duration,
}

impl AppState {
    /// Creates a new AppState over the given store and cache.
    pub fn new(store: Arc<dyn RecordStore>, cache: Arc<dyn CacheBackend>) -> Self {
        Self {
            data: DataService::new(store.clone(), cache.clone()),
            store,
            cache,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
        }
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }
}

/// Handler for GET /
pub async fn root_handler() -> &'static str {
    "Hello from KubeRLy Test App!\n\
     Available endpoints:\n\
     - /health - Health check with DB status\n\
     - /api/test - Test data from database\n\
     - /api/data - CRUD operations on test data\n\
     - /api/cache - Redis cache operations\n"
}

/// Handler for GET /health
///
/// Always answers 200; the body carries the per-dependency verdicts.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health::check(state.store.as_ref(), state.cache.as_ref(), state.health_timeout).await)
}

/// Handler for GET /api/test
///
/// Lists records straight from the store.
pub async fn list_test_handler(State(state): State<AppState>) -> Result<Json<Vec<Record>>> {
    Ok(Json(state.data.list_uncached().await?))
}

/// Handler for GET /api/data
///
/// Cache-aside listing tagged with `X-Cache: HIT|MISS`.
pub async fn list_data_handler(State(state): State<AppState>) -> Result<Response> {
    let listing = state.data.list().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (X_CACHE, listing.cache_status.as_str()),
        ],
        listing.body,
    )
        .into_response())
}

/// Handler for POST /api/data
pub async fn create_data_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateRecordRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StatusResponse>)> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let id = state.data.create(&req.name, req.data()).await?;
    info!("Created record {}", id);

    Ok((StatusCode::CREATED, Json(StatusResponse::created())))
}

/// Handler for GET /api/cache?key=K
pub async fn get_cache_handler(
    State(state): State<AppState>,
    Query(query): Query<CacheQuery>,
) -> Result<Json<CacheValueResponse>> {
    let key = query
        .key
        .filter(|key| !key.is_empty())
        .ok_or_else(|| AppError::InvalidRequest("Missing key parameter".to_string()))?;

    match state.cache.get(&key).await? {
        Some(value) => Ok(Json(CacheValueResponse::new(key, value))),
        None => Err(AppError::NotFound(key)),
    }
}

/// Handler for POST /api/cache
///
/// A `ttl` of 0 or none stores the entry for five minutes.
pub async fn set_cache_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SetCacheRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StatusResponse>)> {
    let Json(req) = payload?;
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    state
        .cache
        .set(&req.key, &req.value, req.effective_ttl())
        .await?;

    Ok((StatusCode::CREATED, Json(StatusResponse::cached())))
}
