//! Depth-N cache built from declaratively configured levels

use crate::level::{CacheLevel, CacheLevelSpec, CacheNode, LevelRegistry};
use cmis_core::{Error, Result};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// A cache addressed by a fixed-length key tuple.
///
/// Each key segment selects an entry in one level; the level kind at each
/// depth comes from the [`CacheLevelSpec`] list given at construction. The
/// root level is created eagerly, deeper levels on the first `put` that
/// needs them.
///
/// Readers share the outer lock. A `put` holds it exclusively for the whole
/// find-or-create-then-store walk, so two writers never race on creating
/// the same intermediate level.
pub struct MultiLevelCache<V> {
    specs: Vec<CacheLevelSpec>,
    registry: Arc<LevelRegistry<V>>,
    root: RwLock<Box<dyn CacheLevel<V>>>,
}

impl<V: Clone + Send + Sync + 'static> MultiLevelCache<V> {
    /// Build a cache with the built-in level strategies
    ///
    /// # Errors
    ///
    /// `Configuration` if `specs` is empty or names an unknown strategy or
    /// invalid parameters.
    pub fn initialize(specs: Vec<CacheLevelSpec>) -> Result<Self> {
        Self::with_registry(Arc::new(LevelRegistry::with_defaults()), specs)
    }

    /// Build a cache resolving strategies in `registry`
    ///
    /// # Errors
    ///
    /// Same as [`MultiLevelCache::initialize`].
    pub fn with_registry(
        registry: Arc<LevelRegistry<V>>,
        specs: Vec<CacheLevelSpec>,
    ) -> Result<Self> {
        if specs.is_empty() {
            return Err(Error::configuration(
                "cache needs at least one level specification",
            ));
        }

        // Deeper levels are built lazily; a typo there must still fail now.
        for spec in &specs[1..] {
            registry.create(spec)?;
        }
        let root = registry.create(&specs[0])?;

        trace!(
            "Initialized {}-level cache ({})",
            specs.len(),
            specs
                .iter()
                .map(|s| s.strategy.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self {
            specs,
            registry,
            root: RwLock::new(root),
        })
    }

    /// Number of key segments every lookup takes
    pub fn depth(&self) -> usize {
        self.specs.len()
    }

    /// Look up the value stored under `keys`
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `keys.len()` differs from [`depth`](Self::depth).
    pub fn get(&self, keys: &[&str]) -> Result<Option<V>> {
        self.check_arity(keys)?;
        let root = self.root.read();
        let value = walk(&**root, keys).and_then(|node| match &*node {
            CacheNode::Value(value) => Some(value.clone()),
            CacheNode::Level(_) => None,
        });
        if value.is_none() {
            trace!("Cache miss for {:?}", keys);
        }
        Ok(value)
    }

    /// Store `value` under `keys`, creating missing levels on the way.
    ///
    /// A bounded level that is full drops the entry; that is not an error.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` on a key arity mismatch.
    pub fn put(&self, value: V, keys: &[&str]) -> Result<()> {
        self.check_arity(keys)?;
        let root = self.root.write();
        self.put_at(&**root, 0, keys, value)
    }

    /// Remove the value under `keys`; a missing path is a no-op
    ///
    /// # Errors
    ///
    /// `InvalidArgument` on a key arity mismatch.
    pub fn remove(&self, keys: &[&str]) -> Result<()> {
        self.check_arity(keys)?;
        self.remove_path(keys);
        Ok(())
    }

    /// Remove everything stored below a key prefix of 1 to `depth` segments
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the prefix is empty or longer than the depth.
    pub fn remove_prefix(&self, prefix: &[&str]) -> Result<()> {
        if prefix.is_empty() || prefix.len() > self.depth() {
            return Err(Error::invalid_argument(format!(
                "expected between 1 and {} keys, got {}",
                self.depth(),
                prefix.len()
            )));
        }
        self.remove_path(prefix);
        Ok(())
    }

    /// Number of leading segments of `keys` that resolve to a stored node
    pub fn check(&self, keys: &[&str]) -> usize {
        let root = self.root.read();
        let mut resolved = 0;
        let mut node = match keys.first().and_then(|key| root.get(key)) {
            Some(node) => node,
            None => return 0,
        };
        resolved += 1;

        for key in keys.iter().take(self.depth()).skip(1) {
            let next = match &*node {
                CacheNode::Level(level) => level.get(key),
                CacheNode::Value(_) => None,
            };
            match next {
                Some(next) => {
                    node = next;
                    resolved += 1;
                }
                None => break,
            }
        }
        resolved
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.root.write().clear();
    }

    fn check_arity(&self, keys: &[&str]) -> Result<()> {
        if keys.len() != self.depth() {
            return Err(Error::invalid_argument(format!(
                "expected {} keys, got {}",
                self.depth(),
                keys.len()
            )));
        }
        Ok(())
    }

    fn put_at(
        &self,
        level: &dyn CacheLevel<V>,
        depth: usize,
        keys: &[&str],
        value: V,
    ) -> Result<()> {
        let key = keys[depth];
        if depth + 1 == keys.len() {
            level.put(key, Arc::new(CacheNode::Value(value)));
            return Ok(());
        }

        let child = match level.get(key) {
            Some(node) if matches!(*node, CacheNode::Level(_)) => node,
            _ => {
                let level_below = self.registry.create(&self.specs[depth + 1])?;
                let created = Arc::new(CacheNode::Level(level_below));
                trace!("Created cache level {} below '{}'", depth + 1, key);
                if !level.put(key, Arc::clone(&created)) {
                    return Ok(());
                }
                created
            }
        };

        match &*child {
            CacheNode::Level(next) => self.put_at(&**next, depth + 1, keys, value),
            CacheNode::Value(_) => Ok(()),
        }
    }

    fn remove_path(&self, keys: &[&str]) {
        let root = self.root.write();
        let Some((last, parents)) = keys.split_last() else {
            return;
        };
        if parents.is_empty() {
            root.remove(last);
            return;
        }
        if let Some(parent) = walk(&**root, parents) {
            if let CacheNode::Level(level) = &*parent {
                if level.remove(last).is_some() {
                    trace!("Removed cache entry {:?}", keys);
                }
            }
        }
    }
}

/// Follow `keys` from `root`, returning the node the last key selects
fn walk<V>(root: &dyn CacheLevel<V>, keys: &[&str]) -> Option<Arc<CacheNode<V>>> {
    let (first, rest) = keys.split_first()?;
    let mut node = root.get(first)?;
    for key in rest {
        let next = match &*node {
            CacheNode::Level(level) => level.get(key),
            CacheNode::Value(_) => None,
        }?;
        node = next;
    }
    Some(node)
}

impl<V> fmt::Debug for MultiLevelCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiLevelCache")
            .field("specs", &self.specs)
            .field("root_entries", &self.root.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn two_levels() -> MultiLevelCache<String> {
        MultiLevelCache::initialize(vec![CacheLevelSpec::bounded(2), CacheLevelSpec::lru(3)])
            .unwrap()
    }

    #[test]
    fn test_empty_specs_rejected() {
        let err = MultiLevelCache::<String>::initialize(Vec::new()).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unknown_deeper_strategy_rejected_eagerly() {
        let err = MultiLevelCache::<String>::initialize(vec![
            CacheLevelSpec::bounded(2),
            CacheLevelSpec::new("mru", HashMap::new()),
        ])
        .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_put_then_get() {
        let cache = two_levels();
        cache.put("v".to_string(), &["repo", "type"]).unwrap();
        assert_eq!(cache.get(&["repo", "type"]).unwrap(), Some("v".to_string()));
        assert_eq!(cache.get(&["repo", "other"]).unwrap(), None);
        assert_eq!(cache.get(&["missing", "type"]).unwrap(), None);
    }

    #[test]
    fn test_arity_mismatch() {
        let cache = two_levels();
        assert!(cache.get(&["repo"]).unwrap_err().is_invalid_argument());
        assert!(cache
            .put("v".to_string(), &["a", "b", "c"])
            .unwrap_err()
            .is_invalid_argument());
        assert!(cache.remove(&[]).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_remove_missing_path_is_noop() {
        let cache = two_levels();
        cache.remove(&["nope", "nothing"]).unwrap();
        cache.put("v".to_string(), &["repo", "type"]).unwrap();
        cache.remove(&["repo", "type"]).unwrap();
        assert_eq!(cache.get(&["repo", "type"]).unwrap(), None);
        // the intermediate level survives
        assert_eq!(cache.check(&["repo", "type"]), 1);
    }

    #[test]
    fn test_remove_prefix_drops_subtree() {
        let cache = two_levels();
        cache.put("a".to_string(), &["r1", "t1"]).unwrap();
        cache.put("b".to_string(), &["r1", "t2"]).unwrap();
        cache.put("c".to_string(), &["r2", "t1"]).unwrap();

        cache.remove_prefix(&["r1"]).unwrap();
        assert_eq!(cache.get(&["r1", "t1"]).unwrap(), None);
        assert_eq!(cache.get(&["r1", "t2"]).unwrap(), None);
        assert_eq!(cache.get(&["r2", "t1"]).unwrap(), Some("c".to_string()));

        assert!(cache.remove_prefix(&[]).is_err());
    }

    #[test]
    fn test_check_counts_resolved_segments() {
        let cache = two_levels();
        assert_eq!(cache.check(&["r", "t"]), 0);
        cache.put("v".to_string(), &["r", "t"]).unwrap();
        assert_eq!(cache.check(&["r", "x"]), 1);
        assert_eq!(cache.check(&["r", "t"]), 2);
    }

    #[test]
    fn test_full_bounded_root_drops_new_path() {
        let cache = two_levels();
        cache.put("1".to_string(), &["r1", "t"]).unwrap();
        cache.put("2".to_string(), &["r2", "t"]).unwrap();
        cache.put("3".to_string(), &["r3", "t"]).unwrap();
        assert_eq!(cache.get(&["r3", "t"]).unwrap(), None);
        assert_eq!(cache.get(&["r1", "t"]).unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_clear() {
        let cache = two_levels();
        cache.put("v".to_string(), &["r", "t"]).unwrap();
        cache.clear();
        assert_eq!(cache.check(&["r", "t"]), 0);
        assert_eq!(cache.depth(), 2);
    }
}
