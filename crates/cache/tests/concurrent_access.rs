//! Concurrent readers and writers on shared caches

use cmis_cache::{CacheLevelSpec, MultiLevelCache, ObjectCache};
use cmis_core::{BaseType, ObjectData};
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_puts_on_shared_paths() {
    let cache: Arc<MultiLevelCache<usize>> = Arc::new(
        MultiLevelCache::initialize(vec![
            CacheLevelSpec::bounded(8),
            CacheLevelSpec::lru(1000),
            CacheLevelSpec::lru(1000),
        ])
        .unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..100 {
                    let object = format!("o{i}");
                    let key = format!("w{worker}");
                    cache.put(i, &["repo", object.as_str(), key.as_str()]).unwrap();
                    let keys = ["repo", object.as_str(), key.as_str()];
                    assert_eq!(cache.get(&keys).unwrap(), Some(i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // every worker wrote below the same intermediate levels
    for worker in 0..8 {
        for i in 0..100 {
            let object = format!("o{i}");
            let key = format!("w{worker}");
            assert_eq!(cache.get(&["repo", object.as_str(), key.as_str()]).unwrap(), Some(i));
        }
    }
}

#[test]
fn test_concurrent_object_cache_access() {
    let cache = Arc::new(ObjectCache::default());

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..50 {
                    let id = format!("f{worker}-{i}");
                    let path = format!("/w{worker}/{i}");
                    let folder = ObjectData::new(id.clone(), BaseType::Folder).with_path(path.clone());
                    cache.put(folder, "*");
                    assert_eq!(cache.get_by_path(&path, "*").map(|o| o.id), Some(id.clone()));
                    if i % 2 == 0 {
                        cache.remove(&id);
                        assert!(cache.get_by_path(&path, "*").is_none());
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), 100);
    assert_eq!(cache.path_count(), 100);
}
