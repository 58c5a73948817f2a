//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with its key, value and deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The key this entry is indexed under
    pub key: String,
    /// The stored value
    pub value: String,
    /// Instant at which the entry becomes logically absent.
    /// None when `now + ttl` overflows, i.e. the entry never expires.
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` after `now`.
    ///
    /// A zero TTL produces an entry that is already expired.
    pub fn new(key: String, value: String, ttl: Duration, now: Instant) -> Self {
        Self {
            key,
            value,
            expires_at: now.checked_add(ttl),
        }
    }

    // == Refresh ==
    /// Overwrites the value and restarts the TTL from `now`.
    pub fn refresh(&mut self, value: String, ttl: Duration, now: Instant) {
        self.value = value;
        self.expires_at = now.checked_add(ttl);
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so a
    /// zero TTL is expired on the very next access.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }
}
