//! Response DTOs for the service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};

/// Reachability of a single dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Healthy,
    Unhealthy,
}

/// Top-level status derived from the component checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Healthy,
    Degraded,
}

impl OverallStatus {
    /// Healthy only when every component is.
    pub fn from_components(components: &[ComponentStatus]) -> Self {
        if components.iter().all(|c| *c == ComponentStatus::Healthy) {
            OverallStatus::Healthy
        } else {
            OverallStatus::Degraded
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: OverallStatus,
    /// Current timestamp in RFC 3339 format
    pub timestamp: String,
    pub version: String,
    pub database: ComponentStatus,
    pub cache: ComponentStatus,
}

impl HealthResponse {
    /// Builds a response stamped with the current time and crate version.
    pub fn new(database: ComponentStatus, cache: ComponentStatus) -> Self {
        Self {
            status: OverallStatus::from_components(&[database, cache]),
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
            cache,
        }
    }
}

/// Acknowledgement body for the POST endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn created() -> Self {
        Self {
            status: "created".to_string(),
        }
    }

    pub fn cached() -> Self {
        Self {
            status: "cached".to_string(),
        }
    }
}

/// Response body for GET /api/cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheValueResponse {
    pub key: String,
    pub value: String,
}

impl CacheValueResponse {
    /// Creates a new CacheValueResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_all_healthy() {
        let resp = HealthResponse::new(ComponentStatus::Healthy, ComponentStatus::Healthy);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["database"], "healthy");
        assert_eq!(json["cache"], "healthy");
        assert_eq!(json["version"], "1.0.0");
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_health_response_degraded() {
        let resp = HealthResponse::new(ComponentStatus::Healthy, ComponentStatus::Unhealthy);
        assert_eq!(resp.status, OverallStatus::Degraded);
        assert_eq!(resp.database, ComponentStatus::Healthy);

        let resp = HealthResponse::new(ComponentStatus::Unhealthy, ComponentStatus::Healthy);
        assert_eq!(resp.status, OverallStatus::Degraded);
        assert_eq!(resp.cache, ComponentStatus::Healthy);
    }

    #[test]
    fn test_status_responses() {
        let json = serde_json::to_string(&StatusResponse::created()).unwrap();
        assert_eq!(json, r#"{"status":"created"}"#);
        let json = serde_json::to_string(&StatusResponse::cached()).unwrap();
        assert_eq!(json, r#"{"status":"cached"}"#);
    }

    #[test]
    fn test_cache_value_response_serialize() {
        let resp = CacheValueResponse::new("test_key", "test_value");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"key":"test_key","value":"test_value"}"#);
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
