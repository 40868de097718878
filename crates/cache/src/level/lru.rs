//! LRU (Least Recently Used) level implementation

use super::traits::{CacheLevel, CacheNode};
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::trace;

/// Evicts the least recently used entry once `max_entries` is exceeded.
///
/// Lookups move the entry to the front, so even reads need the mutex.
pub struct LruLevel<V> {
    entries: Mutex<LruCache<String, Arc<CacheNode<V>>>>,
}

impl<V> LruLevel<V> {
    pub fn new(max_entries: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(max_entries)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }
}

impl<V: Send + Sync> CacheLevel<V> for LruLevel<V> {
    fn get(&self, key: &str) -> Option<Arc<CacheNode<V>>> {
        self.entries.lock().get(key).cloned()
    }

    fn put(&self, key: &str, node: Arc<CacheNode<V>>) -> bool {
        if let Some((evicted, _)) = self.entries.lock().push(key.to_string(), node) {
            if evicted != key {
                trace!("Evicted least recently used cache key '{}'", evicted);
            }
        }
        true
    }

    fn remove(&self, key: &str) -> Option<Arc<CacheNode<V>>> {
        self.entries.lock().pop(key)
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }
}
