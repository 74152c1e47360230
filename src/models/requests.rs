//! Request DTOs for the service API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use std::time::Duration;

use serde::Deserialize;

/// Expiry applied to passthrough entries posted with `ttl` omitted or zero.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Longest `name` the `VARCHAR(255)` column accepts.
pub const MAX_NAME_LENGTH: usize = 255;

/// Request body for POST /api/data
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecordRequest {
    pub name: String,
    /// Absent or null stores an empty string
    #[serde(default)]
    pub data: Option<String>,
}

impl CreateRecordRequest {
    pub fn data(&self) -> &str {
        self.data.as_deref().unwrap_or("")
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.is_empty() {
            return Some("Name cannot be empty".to_string());
        }
        if self.name.chars().count() > MAX_NAME_LENGTH {
            return Some(format!(
                "Name exceeds maximum length of {} characters",
                MAX_NAME_LENGTH
            ));
        }
        None
    }
}

/// Request body for POST /api/cache
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The value to store
/// - `ttl`: TTL in seconds, 0, null or absent selects [`DEFAULT_CACHE_TTL`]
#[derive(Debug, Clone, Deserialize)]
pub struct SetCacheRequest {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl SetCacheRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }

    /// Expiry to store the entry with.
    pub fn effective_ttl(&self) -> Duration {
        match self.ttl.unwrap_or(0) {
            0 => DEFAULT_CACHE_TTL,
            secs => Duration::from_secs(secs),
        }
    }
}

/// Query string for GET /api/cache
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheQuery {
    pub key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_data_defaults_to_empty() {
        let req: CreateRecordRequest = serde_json::from_str(r#"{"name": "test1"}"#).unwrap();
        assert_eq!(req.name, "test1");
        assert_eq!(req.data(), "");
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_create_request_requires_name() {
        assert!(serde_json::from_str::<CreateRecordRequest>(r#"{"data": "x"}"#).is_err());

        let req = CreateRecordRequest {
            name: String::new(),
            data: Some("x".to_string()),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_create_request_name_too_long() {
        let req = CreateRecordRequest {
            name: "n".repeat(MAX_NAME_LENGTH + 1),
            data: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_set_cache_request_ttl() {
        let req: SetCacheRequest =
            serde_json::from_str(r#"{"key": "k", "value": "v", "ttl": 60}"#).unwrap();
        assert_eq!(req.effective_ttl(), Duration::from_secs(60));

        let req: SetCacheRequest = serde_json::from_str(r#"{"key": "k", "value": "v"}"#).unwrap();
        assert_eq!(req.ttl, None);
        assert_eq!(req.effective_ttl(), DEFAULT_CACHE_TTL);
    }

    #[test]
    fn test_null_optional_fields() {
        let req: CreateRecordRequest =
            serde_json::from_str(r#"{"name": "a", "data": null}"#).unwrap();
        assert_eq!(req.data(), "");

        let req: SetCacheRequest =
            serde_json::from_str(r#"{"key": "k", "value": "v", "ttl": null}"#).unwrap();
        assert_eq!(req.effective_ttl(), DEFAULT_CACHE_TTL);

        let req: SetCacheRequest =
            serde_json::from_str(r#"{"key": "k", "value": "v", "ttl": 0}"#).unwrap();
        assert_eq!(req.effective_ttl(), DEFAULT_CACHE_TTL);
    }

    #[test]
    fn test_set_cache_request_negative_ttl_rejected() {
        let parsed = serde_json::from_str::<SetCacheRequest>(r#"{"key": "k", "value": "v", "ttl": -1}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_validate_empty_key() {
        let req = SetCacheRequest {
            key: String::new(),
            value: "v".to_string(),
            ttl: None,
        };
        assert!(req.validate().is_some());
    }
}
