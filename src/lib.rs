//! LRU TTL Cache - A thread-safe in-memory cache server
//!
//! Capacity-bounded key-value cache with per-entry TTL, lazy expiration and
//! least-recently-used eviction, exposed over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::{create_router, AppState};
pub use cache::{CacheEngine, Lookup};
pub use config::Config;
pub use error::{CacheError, Result};
