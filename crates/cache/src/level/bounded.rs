//! Fixed-capacity level without eviction

use super::traits::{CacheLevel, CacheNode};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Stores entries until `capacity` is reached; new keys beyond that are
/// refused, existing keys can still be replaced. Meant for small enumerable
/// dimensions such as repositories.
pub struct BoundedLevel<V> {
    entries: RwLock<HashMap<String, Arc<CacheNode<V>>>>,
    capacity: usize,
}

impl<V> BoundedLevel<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::with_capacity(capacity.min(64))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<V: Send + Sync> CacheLevel<V> for BoundedLevel<V> {
    fn get(&self, key: &str) -> Option<Arc<CacheNode<V>>> {
        self.entries.read().get(key).cloned()
    }

    fn put(&self, key: &str, node: Arc<CacheNode<V>>) -> bool {
        let mut entries = self.entries.write();
        if entries.len() >= self.capacity && !entries.contains_key(key) {
            warn!(
                "Cache level full ({} entries), not caching key '{}'",
                self.capacity, key
            );
            return false;
        }
        entries.insert(key.to_string(), node);
        true
    }

    fn remove(&self, key: &str) -> Option<Arc<CacheNode<V>>> {
        self.entries.write().remove(key)
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }

    fn clear(&self) {
        self.entries.write().clear();
    }
}
