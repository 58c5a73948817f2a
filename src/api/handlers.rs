//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::cache::{CacheEngine, Lookup};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{GetQuery, HealthResponse, SetRequest};

/// Application state shared across all handlers.
///
/// The engine does its own locking, so handlers only need a shared reference.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache engine
    pub cache: Arc<CacheEngine>,
}

impl AppState {
    /// Creates a new AppState around the given engine.
    pub fn new(cache: CacheEngine) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheEngine::new(config.capacity))
    }
}

/// Handler for GET /cache?key=...
///
/// Returns the stored value as plain text, or 404 if the key is missing or
/// expired. A request without a `key` parameter looks up the empty key.
pub async fn get_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<GetQuery>, QueryRejection>,
) -> Result<String> {
    let Query(query) =
        query.map_err(|rejection| CacheError::InvalidRequest(rejection.body_text()))?;
    let key = query.key;

    match state.cache.lookup(&key) {
        Lookup::Hit(value) => Ok(value),
        Lookup::Expired => {
            debug!(key = %key, "Lookup hit an expired entry");
            Err(CacheError::NotFound(key))
        }
        Lookup::Missing => Err(CacheError::NotFound(key)),
    }
}

/// Handler for POST /cache
///
/// Stores a key-value pair for `expiration` seconds. The body is decoded as
/// JSON regardless of its content type; only an undecodable body is rejected.
/// Responds with an empty 200 on success.
pub async fn set_handler(State(state): State<AppState>, body: Bytes) -> Result<StatusCode> {
    let req = SetRequest::from_json(&body)?;

    let ttl = req.ttl();
    state.cache.set(req.key, req.value, ttl);

    Ok(StatusCode::OK)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
