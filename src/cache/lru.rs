//! LRU List Module
//!
//! Recency ordering for cache eviction, stored as an index-based doubly
//! linked list so that touch, remove and evict are all O(1).

use crate::cache::CacheEntry;
use crate::error::{CacheError, Result};

// == Node Handle ==
/// Stable handle to an entry's position in an [`LruList`].
///
/// A handle stays valid until its entry is removed; the slot may then be
/// reused for a different entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    entry: CacheEntry,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU List ==
/// Entries ordered by access time.
///
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Nodes live in a slab of slots; vacated slots are kept on a free list and
/// reused by later inserts.
#[derive(Debug, Default)]
pub struct LruList {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl LruList {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push Front ==
    /// Inserts an entry at the most recently used position.
    pub fn push_front(&mut self, entry: CacheEntry) -> NodeId {
        let node = Node {
            entry,
            prev: None,
            next: self.head,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };

        match self.head {
            Some(old_head) => {
                if let Some(head) = self.node_mut(old_head) {
                    head.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }

        self.head = Some(idx);
        self.len += 1;
        NodeId(idx)
    }

    // == Move To Front ==
    /// Marks an entry as most recently used.
    pub fn move_to_front(&mut self, id: NodeId) {
        let idx = id.0;
        if self.head == Some(idx) || self.node(idx).is_none() {
            return;
        }

        self.unlink(idx);

        let old_head = self.head;
        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(head) = self.node_mut(h) {
                    head.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    // == Remove ==
    /// Removes an entry from the list and returns it.
    pub fn remove(&mut self, id: NodeId) -> Option<CacheEntry> {
        let idx = id.0;
        self.node(idx)?;
        self.unlink(idx);

        let node = self.nodes.get_mut(idx)?.take()?;
        self.free.push(idx);
        self.len -= 1;
        Some(node.entry)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<CacheEntry> {
        let tail = self.tail?;
        self.remove(NodeId(tail))
    }

    // == Accessors ==
    pub fn get(&self, id: NodeId) -> Option<&CacheEntry> {
        self.node(id.0).map(|node| &node.entry)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut CacheEntry> {
        self.node_mut(id.0).map(|node| &mut node.entry)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Link Check ==
    /// Walks the chain and verifies that prev/next links, head, tail and the
    /// length counter all agree.
    pub fn check_links(&self) -> Result<()> {
        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.head;

        while let Some(idx) = cursor {
            let node = self
                .node(idx)
                .ok_or_else(|| inconsistent(format!("link points at vacant slot {}", idx)))?;
            if node.prev != prev {
                return Err(inconsistent(format!(
                    "slot {} has prev {:?}, expected {:?}",
                    idx, node.prev, prev
                )));
            }
            count += 1;
            if count > self.len {
                return Err(inconsistent(format!(
                    "chain longer than recorded length {}",
                    self.len
                )));
            }
            prev = Some(idx);
            cursor = node.next;
        }

        if self.tail != prev {
            return Err(inconsistent(format!(
                "tail is {:?} but chain ends at {:?}",
                self.tail, prev
            )));
        }
        if count != self.len {
            return Err(inconsistent(format!(
                "chain has {} nodes, recorded length is {}",
                count, self.len
            )));
        }

        let occupied = self.nodes.iter().filter(|slot| slot.is_some()).count();
        if occupied != self.len {
            return Err(inconsistent(format!(
                "{} occupied slots for {} linked nodes",
                occupied, self.len
            )));
        }
        Ok(())
    }

    fn unlink(&mut self, idx: usize) {
        let Some((prev, next)) = self.node(idx).map(|node| (node.prev, node.next)) else {
            return;
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn node(&self, idx: usize) -> Option<&Node> {
        self.nodes.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node> {
        self.nodes.get_mut(idx).and_then(Option::as_mut)
    }
}

fn inconsistent(msg: String) -> CacheError {
    CacheError::Inconsistent(msg)
}

// == Iterator ==
/// Front-to-back iterator over an [`LruList`].
pub struct Iter<'a> {
    list: &'a LruList,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (NodeId, &'a CacheEntry);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.list.node(idx)?;
        self.cursor = node.next;
        Some((NodeId(idx), &node.entry))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn entry(key: &str) -> CacheEntry {
        CacheEntry::new(
            key.to_string(),
            format!("value_{}", key),
            Duration::from_secs(60),
            Instant::now(),
        )
    }

    fn keys(list: &LruList) -> Vec<String> {
        list.iter().map(|(_, e)| e.key.clone()).collect()
    }

    #[test]
    fn test_lru_new() {
        let lru = LruList::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert!(lru.iter().next().is_none());
        assert!(lru.check_links().is_ok());
    }

    #[test]
    fn test_lru_push_front() {
        let mut lru = LruList::new();

        lru.push_front(entry("key1"));
        lru.push_front(entry("key2"));
        lru.push_front(entry("key3"));

        assert_eq!(lru.len(), 3);
        assert_eq!(keys(&lru), vec!["key3", "key2", "key1"]);
        // key1 is oldest (added first)
        assert_eq!(keys(&lru).last().map(String::as_str), Some("key1"));
        assert!(lru.check_links().is_ok());
    }

    #[test]
    fn test_lru_move_to_front() {
        let mut lru = LruList::new();

        let a = lru.push_front(entry("a"));
        lru.push_front(entry("b"));
        lru.push_front(entry("c"));

        lru.move_to_front(a);

        assert_eq!(keys(&lru), vec!["a", "c", "b"]);
        assert_eq!(keys(&lru).last().map(String::as_str), Some("b"));
        assert!(lru.check_links().is_ok());
    }

    #[test]
    fn test_lru_move_head_and_middle() {
        let mut lru = LruList::new();

        lru.push_front(entry("a"));
        let b = lru.push_front(entry("b"));
        let c = lru.push_front(entry("c"));

        // Already at front: no-op
        lru.move_to_front(c);
        assert_eq!(keys(&lru), vec!["c", "b", "a"]);

        lru.move_to_front(b);
        assert_eq!(keys(&lru), vec!["b", "c", "a"]);
        assert!(lru.check_links().is_ok());
    }

    #[test]
    fn test_lru_pop_back() {
        let mut lru = LruList::new();

        lru.push_front(entry("key1"));
        lru.push_front(entry("key2"));
        lru.push_front(entry("key3"));

        assert_eq!(lru.pop_back().map(|e| e.key), Some("key1".to_string()));
        assert_eq!(lru.len(), 2);
        assert_eq!(lru.pop_back().map(|e| e.key), Some("key2".to_string()));
        assert_eq!(lru.pop_back().map(|e| e.key), Some("key3".to_string()));
        assert!(lru.is_empty());
        assert!(lru.check_links().is_ok());
    }

    #[test]
    fn test_lru_pop_back_empty() {
        let mut lru = LruList::new();
        assert!(lru.pop_back().is_none());
    }

    #[test]
    fn test_lru_remove_middle() {
        let mut lru = LruList::new();

        lru.push_front(entry("key1"));
        let key2 = lru.push_front(entry("key2"));
        lru.push_front(entry("key3"));

        let removed = lru.remove(key2);

        assert_eq!(removed.map(|e| e.key), Some("key2".to_string()));
        assert_eq!(keys(&lru), vec!["key3", "key1"]);
        assert!(lru.get(key2).is_none());
        assert!(lru.check_links().is_ok());
    }

    #[test]
    fn test_lru_remove_twice() {
        let mut lru = LruList::new();

        let key1 = lru.push_front(entry("key1"));
        assert!(lru.remove(key1).is_some());
        assert!(lru.remove(key1).is_none());
        assert_eq!(lru.len(), 0);
    }

    #[test]
    fn test_lru_slot_reuse() {
        let mut lru = LruList::new();

        let a = lru.push_front(entry("a"));
        lru.push_front(entry("b"));
        lru.remove(a);

        let c = lru.push_front(entry("c"));

        // The vacated slot is handed out again
        assert_eq!(c, a);
        assert_eq!(lru.get(c).map(|e| e.key.as_str()), Some("c"));
        assert_eq!(keys(&lru), vec!["c", "b"]);
        assert!(lru.check_links().is_ok());
    }

    #[test]
    fn test_lru_get_mut() {
        let mut lru = LruList::new();

        let id = lru.push_front(entry("a"));
        if let Some(e) = lru.get_mut(id) {
            e.value = "changed".to_string();
        }

        assert_eq!(lru.get(id).map(|e| e.value.as_str()), Some("changed"));
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = LruList::new();

        let a = lru.push_front(entry("a"));
        let b = lru.push_front(entry("b"));
        let c = lru.push_front(entry("c"));

        lru.move_to_front(a);
        lru.move_to_front(c);
        lru.move_to_front(b);

        // Most recent first: b, c, a
        assert_eq!(lru.pop_back().map(|e| e.key), Some("a".to_string()));
        assert_eq!(lru.pop_back().map(|e| e.key), Some("c".to_string()));
        assert_eq!(lru.pop_back().map(|e| e.key), Some("b".to_string()));
    }
}
