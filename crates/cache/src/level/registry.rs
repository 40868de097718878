//! Registry of cache level strategies

use super::bounded::BoundedLevel;
use super::lru::LruLevel;
use super::traits::CacheLevel;
use cmis_core::constants::{LEVEL_BOUNDED, LEVEL_LRU, LEVEL_PARAM_CAPACITY, LEVEL_PARAM_MAX_ENTRIES};
use cmis_core::{Error, Result};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Strategy parameters of one level
pub type LevelParams = HashMap<String, String>;

/// Builds a level from its parameters
pub type LevelConstructor<V> =
    Arc<dyn Fn(&LevelParams) -> Result<Box<dyn CacheLevel<V>>> + Send + Sync>;

/// Used when a level spec does not name its size
const DEFAULT_LEVEL_CAPACITY: usize = 100;

/// Strategy identifier and parameters of one cache level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLevelSpec {
    pub strategy: String,
    pub params: LevelParams,
}

impl CacheLevelSpec {
    pub fn new(strategy: impl Into<String>, params: LevelParams) -> Self {
        Self {
            strategy: strategy.into(),
            params,
        }
    }

    /// A `bounded` level holding at most `capacity` keys
    pub fn bounded(capacity: usize) -> Self {
        Self::new(
            LEVEL_BOUNDED,
            HashMap::from([(LEVEL_PARAM_CAPACITY.to_string(), capacity.to_string())]),
        )
    }

    /// An `lru` level holding at most `max_entries` keys
    pub fn lru(max_entries: usize) -> Self {
        Self::new(
            LEVEL_LRU,
            HashMap::from([(LEVEL_PARAM_MAX_ENTRIES.to_string(), max_entries.to_string())]),
        )
    }
}

/// Maps strategy identifiers to level constructors
pub struct LevelRegistry<V> {
    constructors: HashMap<String, LevelConstructor<V>>,
}

impl<V: Send + Sync + 'static> LevelRegistry<V> {
    /// A registry without any strategy
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// A registry with the built-in `bounded` and `lru` strategies
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(LEVEL_BOUNDED, |params: &LevelParams| {
            let capacity = size_param(params, LEVEL_PARAM_CAPACITY)?;
            Ok(Box::new(BoundedLevel::new(capacity.get())) as Box<dyn CacheLevel<V>>)
        });
        registry.register(LEVEL_LRU, |params: &LevelParams| {
            let max_entries = size_param(params, LEVEL_PARAM_MAX_ENTRIES)?;
            Ok(Box::new(LruLevel::new(max_entries)) as Box<dyn CacheLevel<V>>)
        });
        registry
    }

    /// Register or replace a strategy
    pub fn register<F>(&mut self, strategy: &str, constructor: F)
    where
        F: Fn(&LevelParams) -> Result<Box<dyn CacheLevel<V>>> + Send + Sync + 'static,
    {
        self.constructors
            .insert(strategy.to_string(), Arc::new(constructor));
    }

    pub fn contains(&self, strategy: &str) -> bool {
        self.constructors.contains_key(strategy)
    }

    /// Build a level for `spec`
    ///
    /// # Errors
    ///
    /// `Configuration` if the strategy is unknown or rejects its parameters.
    pub fn create(&self, spec: &CacheLevelSpec) -> Result<Box<dyn CacheLevel<V>>> {
        let constructor = self.constructors.get(&spec.strategy).ok_or_else(|| {
            Error::configuration(format!("unknown cache level strategy: {}", spec.strategy))
        })?;
        constructor(&spec.params)
    }
}

impl<V: Send + Sync + 'static> Default for LevelRegistry<V> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn size_param(params: &LevelParams, name: &str) -> Result<NonZeroUsize> {
    let Some(raw) = params.get(name) else {
        return Ok(NonZeroUsize::new(DEFAULT_LEVEL_CAPACITY).unwrap_or(NonZeroUsize::MIN));
    };
    raw.trim()
        .parse::<usize>()
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| {
            Error::configuration(format!(
                "cache level parameter '{name}' must be a positive integer, got '{raw}'"
            ))
        })
}
