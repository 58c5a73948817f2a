//! Cache Engine Module
//!
//! Thread-safe front of the cache. A single mutex guards the whole
//! [`CacheStore`], so every get and set is one atomic step with respect to all
//! other callers.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{CacheStore, Lookup};
use crate::error::Result;

// == Cache Engine ==
/// Shared, linearizable LRU cache with per-entry TTL.
///
/// Construct once and share it behind an `Arc`. Reads are mutating: a hit
/// promotes the entry and an expired entry is dropped on the spot.
#[derive(Debug)]
pub struct CacheEngine {
    capacity: usize,
    store: Mutex<CacheStore>,
}

impl CacheEngine {
    // == Constructor ==
    /// Creates an empty engine holding at most `capacity` entries.
    ///
    /// A capacity of 0 is accepted: each insert then replaces the previous
    /// entry, so the engine holds at most one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            store: Mutex::new(CacheStore::new(capacity)),
        }
    }

    // == Get ==
    /// Returns the value for `key` if present and not expired.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lookup(key).into_value()
    }

    // == Lookup ==
    /// Like [`get`](Self::get) but tells an expired entry apart from a missing one.
    pub fn lookup(&self, key: &str) -> Lookup {
        let outcome = self.lock().lookup(key, Instant::now());
        if outcome == Lookup::Expired {
            debug!(key, "Dropped expired entry on read");
        }
        outcome
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl`.
    ///
    /// A zero TTL is accepted and yields an entry that is expired on its next
    /// read.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>, ttl: Duration) {
        let evicted = self
            .lock()
            .insert(key.into(), value.into(), ttl, Instant::now());

        if let Some(entry) = evicted {
            debug!(key = %entry.key, "Evicted least recently used entry");
        }
    }

    // == Introspection ==
    /// Number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        self.lock().keys()
    }

    /// Verifies index/order consistency and the capacity bound.
    pub fn check_consistency(&self) -> Result<()> {
        self.lock().check_consistency()
    }

    fn lock(&self) -> MutexGuard<'_, CacheStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
