//! Cache Store Module
//!
//! Unsynchronized cache structure combining a HashMap index with the LRU list
//! and lazy TTL expiration. [`CacheEngine`](crate::cache::CacheEngine) wraps it
//! in a mutex.
//!
//! Every time-dependent operation takes `now` explicitly.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, LruList, NodeId};
use crate::error::{CacheError, Result};

// == Lookup Result ==
/// Outcome of reading a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Live entry; its value
    Hit(String),
    /// The entry existed but its TTL had elapsed; it has now been removed
    Expired,
    /// No entry under this key
    Missing,
}

impl Lookup {
    /// Collapses the outcome to found / not-found.
    pub fn into_value(self) -> Option<String> {
        match self {
            Lookup::Hit(value) => Some(value),
            Lookup::Expired | Lookup::Missing => None,
        }
    }

    #[cfg(test)]
    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit(_))
    }
}

// == Cache Store ==
/// Capacity-bounded store with LRU eviction and lazy TTL expiration.
#[derive(Debug)]
pub struct CacheStore {
    /// Key to position in `order`
    index: HashMap<String, NodeId>,
    /// Entries by recency, most recent first
    order: LruList,
    /// Maximum number of entries before eviction kicks in
    capacity: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            index: HashMap::new(),
            order: LruList::new(),
            capacity,
        }
    }

    // == Lookup ==
    /// Reads a key as of `now`.
    ///
    /// A live entry is promoted to most recently used. An expired entry is
    /// removed from both the index and the order.
    pub fn lookup(&mut self, key: &str, now: Instant) -> Lookup {
        let Some(&id) = self.index.get(key) else {
            return Lookup::Missing;
        };

        let Some(entry) = self.order.get(id) else {
            // Index pointed at a vacant slot; drop the dangling key.
            self.index.remove(key);
            return Lookup::Missing;
        };

        if entry.is_expired_at(now) {
            self.index.remove(key);
            self.order.remove(id);
            return Lookup::Expired;
        }

        let value = entry.value.clone();
        self.order.move_to_front(id);
        Lookup::Hit(value)
    }

    // == Insert ==
    /// Stores `value` under `key`, expiring `ttl` after `now`.
    ///
    /// An existing key is refreshed in place and promoted. A new key evicts the
    /// least recently used entry first when the store is full, whether or not
    /// that entry has expired. Returns the evicted entry, if any.
    pub fn insert(
        &mut self,
        key: String,
        value: String,
        ttl: Duration,
        now: Instant,
    ) -> Option<CacheEntry> {
        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(id) {
                entry.refresh(value, ttl, now);
                self.order.move_to_front(id);
                return None;
            }
            self.index.remove(&key);
        }

        let mut evicted = None;
        if self.order.len() >= self.capacity {
            // With capacity 0 the list can be empty here; the insert then
            // proceeds without evicting anything.
            if let Some(oldest) = self.order.pop_back() {
                self.index.remove(&oldest.key);
                evicted = Some(oldest);
            }
        }

        let entry = CacheEntry::new(key.clone(), value, ttl, now);
        let id = self.order.push_front(entry);
        self.index.insert(key, id);

        evicted
    }

    // == Introspection ==
    /// Number of physically present entries, live or expired.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys from most to least recently used, expired ones included.
    pub fn keys(&self) -> Vec<String> {
        self.order.iter().map(|(_, entry)| entry.key.clone()).collect()
    }

    // == Consistency Check ==
    /// Verifies that the index and the order describe the same set of entries
    /// and that the capacity bound holds.
    pub fn check_consistency(&self) -> Result<()> {
        self.order.check_links()?;

        if self.index.len() != self.order.len() {
            return Err(CacheError::Inconsistent(format!(
                "index has {} keys, order has {} entries",
                self.index.len(),
                self.order.len()
            )));
        }

        for (id, entry) in self.order.iter() {
            match self.index.get(&entry.key) {
                Some(&indexed) if indexed == id => {}
                Some(_) => {
                    return Err(CacheError::Inconsistent(format!(
                        "key '{}' indexed at a different node",
                        entry.key
                    )))
                }
                None => {
                    return Err(CacheError::Inconsistent(format!(
                        "key '{}' is ordered but not indexed",
                        entry.key
                    )))
                }
            }
        }

        // Capacity 0 may transiently hold one entry.
        let bound = self.capacity.max(1);
        if self.order.len() > bound {
            return Err(CacheError::Inconsistent(format!(
                "{} entries exceed capacity {}",
                self.order.len(),
                self.capacity
            )));
        }
        Ok(())
    }
}
