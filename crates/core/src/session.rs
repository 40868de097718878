//! Per-session key/value state shared by every call a binding makes.
//!
//! Values are either persistent (stored as JSON, part of any snapshot of the
//! session) or transient (arbitrary shared objects such as providers or
//! caches, never persisted). Reads resolve the variant once and hand back the
//! plain value, so callers do not care which kind they stored.
//!
//! Single calls on [`SessionContext`] are atomic. To group several operations
//! into one region, hold the guard returned by [`SessionContext::read`] or
//! [`SessionContext::write`]; dropping the guard releases the lock.

use crate::errors::{Error, Result};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// A stored session value
#[derive(Clone)]
pub enum SessionValue {
    Persistent(serde_json::Value),
    Transient(Arc<dyn Any + Send + Sync>),
}

impl SessionValue {
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, SessionValue::Transient(_))
    }
}

impl fmt::Debug for SessionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionValue::Persistent(value) => f.debug_tuple("Persistent").field(value).finish(),
            SessionValue::Transient(_) => f.write_str("Transient(..)"),
        }
    }
}

/// The entry map behind a [`SessionContext`], reachable through its lock
/// guards
#[derive(Debug, Default)]
pub struct SessionEntries {
    entries: HashMap<String, SessionValue>,
}

impl SessionEntries {
    /// Typed read. Transient values are downcast, persistent ones
    /// deserialized; a value of another type reads as absent.
    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned + Clone + 'static,
    {
        match self.entries.get(key)? {
            SessionValue::Persistent(value) => serde_json::from_value(value.clone()).ok(),
            SessionValue::Transient(object) => object.downcast_ref::<T>().cloned(),
        }
    }

    pub fn get_or<T>(&self, key: &str, default: T) -> T
    where
        T: DeserializeOwned + Clone + 'static,
    {
        self.get(key).unwrap_or(default)
    }

    /// String view of a scalar value
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.entries.get(key)? {
            SessionValue::Persistent(serde_json::Value::Null) => None,
            SessionValue::Persistent(serde_json::Value::String(s)) => Some(s.clone()),
            SessionValue::Persistent(other) => Some(other.to_string()),
            SessionValue::Transient(object) => object
                .downcast_ref::<String>()
                .cloned()
                .or_else(|| object.downcast_ref::<&'static str>().map(|s| s.to_string())),
        }
    }

    /// Integer read that accepts stored integers and numeric strings. Any
    /// other value, including a non-numeric string, yields `default`.
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.entries.get(key) {
            Some(SessionValue::Persistent(serde_json::Value::Number(n))) => {
                n.as_i64().unwrap_or(default)
            }
            Some(SessionValue::Persistent(serde_json::Value::String(s))) => {
                s.trim().parse().unwrap_or(default)
            }
            Some(SessionValue::Transient(object)) => {
                if let Some(v) = object.downcast_ref::<i64>() {
                    *v
                } else if let Some(v) = object.downcast_ref::<i32>() {
                    i64::from(*v)
                } else if let Some(v) = object.downcast_ref::<u32>() {
                    i64::from(*v)
                } else if let Some(s) = object.downcast_ref::<String>() {
                    s.trim().parse().unwrap_or(default)
                } else {
                    default
                }
            }
            _ => default,
        }
    }

    /// Boolean read that accepts stored booleans and `"true"`/`"false"`
    /// strings in any case
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.entries.get(key) {
            Some(SessionValue::Persistent(serde_json::Value::Bool(b))) => *b,
            Some(SessionValue::Persistent(serde_json::Value::String(s))) => {
                parse_bool(s).unwrap_or(default)
            }
            Some(SessionValue::Transient(object)) => {
                if let Some(b) = object.downcast_ref::<bool>() {
                    *b
                } else {
                    object
                        .downcast_ref::<String>()
                        .and_then(|s| parse_bool(s))
                        .unwrap_or(default)
                }
            }
            _ => default,
        }
    }

    /// Shared handle to a transient object
    pub fn get_shared<T>(&self, key: &str) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        match self.entries.get(key)? {
            SessionValue::Transient(object) => Arc::clone(object).downcast::<T>().ok(),
            SessionValue::Persistent(_) => None,
        }
    }

    /// Store a persistent value
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the value cannot be serialized.
    pub fn put<T>(&mut self, key: impl Into<String>, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|e| {
            Error::invalid_argument(format!("value for '{key}' is not serializable: {e}"))
        })?;
        trace!("Session value '{}' set", key);
        self.entries.insert(key, SessionValue::Persistent(value));
        Ok(())
    }

    /// Store a value that is excluded from persistence
    pub fn put_transient<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: Any + Send + Sync,
    {
        let key = key.into();
        trace!("Transient session value '{}' set", key);
        self.entries
            .insert(key, SessionValue::Transient(Arc::new(value)));
    }

    pub fn insert(&mut self, key: impl Into<String>, value: SessionValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<SessionValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_transient(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(SessionValue::is_transient)
    }

    /// All keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every persistent entry; transient values are left out
    pub fn persistent_entries(&self) -> BTreeMap<String, serde_json::Value> {
        self.entries
            .iter()
            .filter_map(|(key, value)| match value {
                SessionValue::Persistent(v) => Some((key.clone(), v.clone())),
                SessionValue::Transient(_) => None,
            })
            .collect()
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Concurrent key/value store holding one session's configuration and
/// runtime state
#[derive(Debug, Default)]
pub struct SessionContext {
    entries: RwLock<SessionEntries>,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a context with string parameters, all persistent
    pub fn from_parameters<I, K, V>(parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = parameters
            .into_iter()
            .map(|(k, v)| {
                (
                    k.into(),
                    SessionValue::Persistent(serde_json::Value::String(v.into())),
                )
            })
            .collect();
        Self {
            entries: RwLock::new(SessionEntries { entries }),
        }
    }

    /// Shared lock over the entries for a group of reads
    pub fn read(&self) -> RwLockReadGuard<'_, SessionEntries> {
        self.entries.read()
    }

    /// Exclusive lock over the entries, e.g. for read-then-conditional-write
    pub fn write(&self) -> RwLockWriteGuard<'_, SessionEntries> {
        self.entries.write()
    }

    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned + Clone + 'static,
    {
        self.read().get(key)
    }

    pub fn get_or<T>(&self, key: &str, default: T) -> T
    where
        T: DeserializeOwned + Clone + 'static,
    {
        self.read().get_or(key, default)
    }

    pub fn get_str(&self, key: &str) -> Option<String> {
        self.read().get_str(key)
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.read().get_int(key, default)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.read().get_bool(key, default)
    }

    pub fn get_shared<T>(&self, key: &str) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.read().get_shared(key)
    }

    /// See [`SessionEntries::put`]
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the value cannot be serialized.
    pub fn put<T>(&self, key: impl Into<String>, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.write().put(key, value)
    }

    pub fn put_transient<T>(&self, key: impl Into<String>, value: T)
    where
        T: Any + Send + Sync,
    {
        self.write().put_transient(key, value);
    }

    pub fn remove(&self, key: &str) -> Option<SessionValue> {
        self.write().remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.read().keys()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn persistent_entries(&self) -> BTreeMap<String, serde_json::Value> {
        self.read().persistent_entries()
    }

    /// JSON snapshot of the persistent entries
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(self.persistent_entries().into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::thread;

    #[test]
    fn test_put_and_get_round_trip() {
        let session = SessionContext::new();
        session.put("name", "repository").unwrap();
        session.put("count", &3_u32).unwrap();
        session.put("flags", &vec![true, false]).unwrap();

        assert_eq!(session.get::<String>("name").as_deref(), Some("repository"));
        assert_eq!(session.get::<u32>("count"), Some(3));
        assert_eq!(session.get::<Vec<bool>>("flags"), Some(vec![true, false]));
        assert_eq!(session.get::<String>("missing"), None);
        assert_eq!(session.get_or("missing", 7_u32), 7);
    }

    #[test]
    fn test_transient_values_read_like_persistent_ones() {
        let session = SessionContext::new();
        session.put_transient("token", "secret".to_string());
        session.put("user", "alice").unwrap();

        assert_eq!(session.get::<String>("token").as_deref(), Some("secret"));
        assert_eq!(session.get_str("token").as_deref(), Some("secret"));
        assert!(session.read().is_transient("token"));
        assert!(!session.read().is_transient("user"));
    }

    #[test]
    fn test_transient_values_are_not_persisted() {
        let session = SessionContext::new();
        session.put("user", "alice").unwrap();
        session.put_transient("handle", Arc::new(42_u8));

        let snapshot = session.to_json();
        assert_eq!(snapshot, serde_json::json!({ "user": "alice" }));
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_non_serializable_persistent_value_is_rejected() {
        let session = SessionContext::new();
        let mut map: HashMap<(u8, u8), u8> = HashMap::new();
        map.insert((1, 2), 3);

        let err = session.put("map", &map).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(!session.contains_key("map"));

        // the same value is fine when it is never persisted
        session.put_transient("map", map);
        assert!(session.contains_key("map"));
    }

    #[test]
    fn test_get_int_coercion() {
        let session = SessionContext::from_parameters([
            ("numeric", "42"),
            ("padded", " 7 "),
            ("text", "lots"),
        ]);
        session.put("number", &12_i64).unwrap();
        session.put_transient("boxed", 5_i32);

        assert_eq!(session.get_int("numeric", 0), 42);
        assert_eq!(session.get_int("padded", 0), 7);
        assert_eq!(session.get_int("text", 99), 99);
        assert_eq!(session.get_int("number", 0), 12);
        assert_eq!(session.get_int("boxed", 0), 5);
        assert_eq!(session.get_int("missing", -1), -1);
    }

    #[test]
    fn test_get_bool_accepts_strings() {
        let session =
            SessionContext::from_parameters([("a", "TRUE"), ("b", "false"), ("c", "yes")]);
        assert!(session.get_bool("a", false));
        assert!(!session.get_bool("b", true));
        assert!(session.get_bool("c", true));
        assert!(!session.get_bool("missing", false));
    }

    #[test]
    fn test_get_shared_returns_same_object() {
        let session = SessionContext::new();
        session.put_transient("list", vec![1, 2, 3]);

        let first = session.get_shared::<Vec<i32>>("list").unwrap();
        let second = session.get_shared::<Vec<i32>>("list").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(session.get_shared::<String>("list").is_none());
    }

    #[test]
    fn test_remove() {
        let session = SessionContext::from_parameters([("k", "v")]);
        assert!(session.remove("k").is_some());
        assert!(session.remove("k").is_none());
        assert!(session.is_empty());
    }

    #[test]
    fn test_write_guard_groups_read_then_write() {
        let session = Arc::new(SessionContext::new());
        session.put("counter", &0_i64).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let session = Arc::clone(&session);
                thread::spawn(move || {
                    for _ in 0..100 {
                        let mut entries = session.write();
                        let current = entries.get_int("counter", 0);
                        entries.put("counter", &(current + 1)).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(session.get_int("counter", 0), 800);
    }

    #[test]
    fn test_conditional_insert_under_one_guard() {
        let session = SessionContext::new();
        {
            let mut entries = session.write();
            if !entries.contains_key("once") {
                entries.put("once", "first").unwrap();
            }
        }
        {
            let mut entries = session.write();
            if !entries.contains_key("once") {
                entries.put("once", "second").unwrap();
            }
        }
        assert_eq!(session.get_str("once").as_deref(), Some("first"));
    }
}
