//! Object and path cache

use crate::settings::{size_setting, ttl_setting};
use cmis_core::constants::{
    CACHE_SIZE_OBJECTS, CACHE_SIZE_PATHTOID, CACHE_TTL_OBJECTS, CACHE_TTL_PATHTOID,
    DEFAULT_CACHE_SIZE_OBJECTS, DEFAULT_CACHE_SIZE_PATHTOID, DEFAULT_CACHE_TTL_OBJECTS,
    DEFAULT_CACHE_TTL_PATHTOID,
};
use cmis_core::{ObjectData, Result, SessionContext};
use lru::LruCache;
use parking_lot::{Mutex, RwLock, RwLockUpgradableReadGuard};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tracing::trace;

/// Sizes and lifetimes of an [`ObjectCache`]. A zero TTL never expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectCacheConfig {
    pub objects: NonZeroUsize,
    pub object_ttl: Duration,
    pub paths: NonZeroUsize,
    pub path_ttl: Duration,
}

impl Default for ObjectCacheConfig {
    fn default() -> Self {
        let size = |n: usize| NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN);
        Self {
            objects: size(DEFAULT_CACHE_SIZE_OBJECTS),
            object_ttl: Duration::from_millis(DEFAULT_CACHE_TTL_OBJECTS),
            paths: size(DEFAULT_CACHE_SIZE_PATHTOID),
            path_ttl: Duration::from_millis(DEFAULT_CACHE_TTL_PATHTOID),
        }
    }
}

impl ObjectCacheConfig {
    /// Read `cmis.cache.size.objects`, `cmis.cache.ttl.objects`,
    /// `cmis.cache.size.pathtoid` and `cmis.cache.ttl.pathtoid`
    pub fn from_session(session: &SessionContext) -> Result<Self> {
        Ok(Self {
            objects: size_setting(session, CACHE_SIZE_OBJECTS, DEFAULT_CACHE_SIZE_OBJECTS)?,
            object_ttl: ttl_setting(session, CACHE_TTL_OBJECTS, DEFAULT_CACHE_TTL_OBJECTS)?,
            paths: size_setting(session, CACHE_SIZE_PATHTOID, DEFAULT_CACHE_SIZE_PATHTOID)?,
            path_ttl: ttl_setting(session, CACHE_TTL_PATHTOID, DEFAULT_CACHE_TTL_PATHTOID)?,
        })
    }
}

struct Timed<T> {
    value: T,
    stored: Instant,
}

impl<T> Timed<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            stored: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        !ttl.is_zero() && self.stored.elapsed() > ttl
    }
}

/// Objects of one repository.
///
/// An object id maps to the variants fetched with different cache keys
/// (typically the property filter). A second map resolves paths to object
/// ids; folders with a path are indexed automatically. Both maps evict the
/// least recently stored ids once full.
pub struct ObjectCache {
    objects: Mutex<LruCache<String, HashMap<String, Timed<ObjectData>>>>,
    paths: RwLock<LruCache<String, Timed<String>>>,
    object_ttl: Duration,
    path_ttl: Duration,
}

impl ObjectCache {
    pub fn new(config: ObjectCacheConfig) -> Self {
        Self {
            objects: Mutex::new(LruCache::new(config.objects)),
            paths: RwLock::new(LruCache::new(config.paths)),
            object_ttl: config.object_ttl,
            path_ttl: config.path_ttl,
        }
    }

    pub fn from_session(session: &SessionContext) -> Result<Self> {
        Ok(Self::new(ObjectCacheConfig::from_session(session)?))
    }

    /// Cache `object` under `cache_key`; a folder with a path is also
    /// indexed by path
    pub fn put(&self, object: ObjectData, cache_key: &str) {
        let path = object.path.clone().filter(|_| object.is_folder());
        let id = object.id.clone();
        self.store(object, cache_key);
        if let Some(path) = path {
            self.index_path(path, id);
        }
    }

    /// Cache `object` and index it under `path` whatever its base type
    pub fn put_with_path(&self, object: ObjectData, cache_key: &str, path: &str) {
        let id = object.id.clone();
        self.store(object, cache_key);
        self.index_path(path.to_string(), id);
    }

    pub fn get(&self, id: &str, cache_key: &str) -> Option<ObjectData> {
        let mut objects = self.objects.lock();
        let variants = objects.get_mut(id)?;

        let expired = variants
            .get(cache_key)
            .map(|entry| entry.is_expired(self.object_ttl))?;
        if expired {
            variants.remove(cache_key);
            if variants.is_empty() {
                objects.pop(id);
            }
            trace!("Object '{}' ({}) expired", id, cache_key);
            return None;
        }

        variants.get(cache_key).map(|entry| entry.value.clone())
    }

    /// Resolve `path` and look the object up. A path whose object is no
    /// longer cached is dropped from the path map.
    pub fn get_by_path(&self, path: &str, cache_key: &str) -> Option<ObjectData> {
        let paths = self.paths.upgradable_read();
        let (id, path_expired) = match paths.peek(path) {
            Some(entry) => (entry.value.clone(), entry.is_expired(self.path_ttl)),
            None => return None,
        };

        if !path_expired {
            if let Some(object) = self.get(&id, cache_key) {
                return Some(object);
            }
            if self.contains(&id) {
                return None;
            }
        }

        let mut paths = RwLockUpgradableReadGuard::upgrade(paths);
        paths.pop(path);
        trace!("Dropped stale path '{}' -> '{}'", path, id);
        None
    }

    /// Whether any variant of `id` is cached
    pub fn contains(&self, id: &str) -> bool {
        self.objects.lock().contains(id)
    }

    /// Drop every variant of `id`
    pub fn remove(&self, id: &str) {
        self.objects.lock().pop(id);
    }

    pub fn remove_path(&self, path: &str) {
        self.paths.write().pop(path);
    }

    pub fn clear(&self) {
        self.objects.lock().clear();
        self.paths.write().clear();
    }

    /// Number of cached object ids
    pub fn len(&self) -> usize {
        self.objects.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of indexed paths
    pub fn path_count(&self) -> usize {
        self.paths.read().len()
    }

    fn store(&self, object: ObjectData, cache_key: &str) {
        let mut objects = self.objects.lock();
        if let Some(variants) = objects.get_mut(&object.id) {
            variants.insert(cache_key.to_string(), Timed::new(object));
            return;
        }
        let id = object.id.clone();
        let variants = HashMap::from([(cache_key.to_string(), Timed::new(object))]);
        if let Some((evicted, _)) = objects.push(id.clone(), variants) {
            if evicted != id {
                trace!("Evicted object '{}'", evicted);
            }
        }
    }

    fn index_path(&self, path: String, id: String) {
        self.paths.write().push(path, Timed::new(id));
    }
}

impl Default for ObjectCache {
    fn default() -> Self {
        Self::new(ObjectCacheConfig::default())
    }
}

impl std::fmt::Debug for ObjectCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectCache")
            .field("objects", &self.len())
            .field("paths", &self.path_count())
            .field("object_ttl", &self.object_ttl)
            .field("path_ttl", &self.path_ttl)
            .finish()
    }
}
