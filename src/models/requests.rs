//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{CacheError, Result};

/// Request body for the SET operation (POST /cache)
///
/// Missing fields take their zero values, so `{}` stores `""` under `""`
/// with an already-elapsed TTL.
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The value to store
/// - `expiration`: TTL in whole seconds; zero or negative expires immediately
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: String,
    /// TTL in seconds
    pub expiration: i64,
}

impl SetRequest {
    /// Decodes a JSON body, whatever content type it was sent with.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|err| CacheError::InvalidRequest(err.to_string()))
    }

    /// TTL to store the entry with. Non-positive expirations map to zero.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(u64::try_from(self.expiration).unwrap_or(0))
    }
}

/// Query string for the GET operation (GET /cache?key=...)
///
/// An absent `key` parameter reads as the empty key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GetQuery {
    /// The cache key
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_deserialize() {
        let json = br#"{"key": "test", "value": "hello", "expiration": 60}"#;
        let req = SetRequest::from_json(json).unwrap();
        assert_eq!(req.key, "test");
        assert_eq!(req.value, "hello");
        assert_eq!(req.expiration, 60);
        assert_eq!(req.ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_set_request_defaults() {
        let req = SetRequest::from_json(b"{}").unwrap();
        assert_eq!(req.key, "");
        assert_eq!(req.value, "");
        assert_eq!(req.expiration, 0);
        assert_eq!(req.ttl(), Duration::ZERO);
    }

    #[test]
    fn test_set_request_accepts_any_key() {
        let long_key = "k".repeat(300);
        let body = format!(r#"{{"key": "{}", "value": "v", "expiration": 5}}"#, long_key);
        let req = SetRequest::from_json(body.as_bytes()).unwrap();
        assert_eq!(req.key, long_key);
    }

    #[test]
    fn test_set_request_wrong_type_is_rejected() {
        let json = br#"{"key": "k", "value": "v", "expiration": "soon"}"#;
        let result = SetRequest::from_json(json);
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[test]
    fn test_set_request_malformed_is_rejected() {
        let result = SetRequest::from_json(br#"{"invalid json"#);
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
        assert!(SetRequest::from_json(b"").is_err());
    }

    #[test]
    fn test_negative_expiration_maps_to_zero_ttl() {
        let req = SetRequest {
            key: "k".to_string(),
            value: "v".to_string(),
            expiration: -30,
        };
        assert_eq!(req.ttl(), Duration::ZERO);
    }

    #[test]
    fn test_get_query_missing_key_is_empty() {
        let query: GetQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.key, "");
    }
}
