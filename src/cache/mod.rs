//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod engine;
mod entry;
mod lru;
mod store;


// Re-export public types
pub use engine::CacheEngine;
pub use entry::CacheEntry;
pub use lru::{LruList, NodeId};
pub use store::{CacheStore, Lookup};
