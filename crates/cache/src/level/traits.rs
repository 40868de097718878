//! Core cache level trait definition

use std::sync::Arc;

/// A node stored in a cache level: either the next level down or a value
pub enum CacheNode<V> {
    Level(Box<dyn CacheLevel<V>>),
    Value(V),
}

/// One level of a multi-level cache.
///
/// Levels are shared by concurrent readers of the owning cache, so every
/// method takes `&self` and implementations guard their own state.
pub trait CacheLevel<V>: Send + Sync {
    /// Look up a key; strategies may record the access
    fn get(&self, key: &str) -> Option<Arc<CacheNode<V>>>;

    /// Store a node. Returns `false` if the level refused the entry.
    fn put(&self, key: &str, node: Arc<CacheNode<V>>) -> bool;

    fn remove(&self, key: &str) -> Option<Arc<CacheNode<V>>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&self);
}
