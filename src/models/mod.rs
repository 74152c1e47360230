//! Request and Response models for the service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies, plus the
//! persisted record type.

pub mod record;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use record::Record;
pub use requests::{CacheQuery, CreateRecordRequest, SetCacheRequest};
pub use responses::{
    CacheValueResponse, ComponentStatus, ErrorResponse, HealthResponse, OverallStatus,
    StatusResponse,
};
