//! Tests for cache level strategies

use super::*;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

fn value(v: u32) -> Arc<CacheNode<u32>> {
    Arc::new(CacheNode::Value(v))
}

fn read(level: &dyn CacheLevel<u32>, key: &str) -> Option<u32> {
    level.get(key).and_then(|node| match *node {
        CacheNode::Value(v) => Some(v),
        CacheNode::Level(_) => None,
    })
}

#[test]
fn test_bounded_rejects_new_keys_when_full() {
    let level = BoundedLevel::new(2);
    assert!(level.put("a", value(1)));
    assert!(level.put("b", value(2)));
    assert!(!level.put("c", value(3)));

    assert_eq!(level.len(), 2);
    assert_eq!(read(&level, "c"), None);

    // replacing an existing key is still allowed
    assert!(level.put("a", value(10)));
    assert_eq!(read(&level, "a"), Some(10));
}

#[test]
fn test_lru_evicts_least_recently_used() {
    let level = LruLevel::new(NonZeroUsize::new(3).unwrap());
    level.put("a", value(1));
    level.put("b", value(2));
    level.put("c", value(3));

    // touch 'a' so 'b' becomes the eviction candidate
    assert_eq!(read(&level, "a"), Some(1));
    level.put("d", value(4));

    assert_eq!(level.len(), 3);
    assert_eq!(read(&level, "b"), None);
    assert_eq!(read(&level, "a"), Some(1));
    assert_eq!(read(&level, "d"), Some(4));
}

#[test]
fn test_registry_builds_builtin_strategies() {
    let registry = LevelRegistry::<u32>::with_defaults();
    let bounded = registry.create(&CacheLevelSpec::bounded(1)).unwrap();
    assert!(bounded.put("a", value(1)));
    assert!(!bounded.put("b", value(2)));

    let lru = registry.create(&CacheLevelSpec::lru(1)).unwrap();
    lru.put("a", value(1));
    lru.put("b", value(2));
    assert_eq!(lru.len(), 1);
}

#[test]
fn test_registry_rejects_unknown_strategy() {
    let registry = LevelRegistry::<u32>::with_defaults();
    let err = registry
        .create(&CacheLevelSpec::new("fifo", HashMap::new()))
        .err()
        .unwrap();
    assert!(err.is_configuration());
}

#[test]
fn test_registry_rejects_invalid_size() {
    let registry = LevelRegistry::<u32>::with_defaults();
    assert!(registry.create(&CacheLevelSpec::lru(0)).is_err());

    let mut params = HashMap::new();
    params.insert("capacity".to_string(), "many".to_string());
    assert!(registry
        .create(&CacheLevelSpec::new("bounded", params))
        .is_err());
}

#[test]
fn test_registry_uses_default_size_when_missing() {
    let registry = LevelRegistry::<u32>::with_defaults();
    let level = registry
        .create(&CacheLevelSpec::new("lru", HashMap::new()))
        .unwrap();
    for i in 0..150 {
        level.put(&i.to_string(), value(i));
    }
    assert_eq!(level.len(), 100);
}

#[test]
fn test_custom_strategy_registration() {
    let mut registry = LevelRegistry::<u32>::empty();
    assert!(!registry.contains("single"));
    registry.register("single", |_params: &LevelParams| {
        Ok(Box::new(BoundedLevel::new(1)) as Box<dyn CacheLevel<u32>>)
    });
    assert!(registry.contains("single"));
    assert!(registry
        .create(&CacheLevelSpec::new("single", HashMap::new()))
        .is_ok());
}
