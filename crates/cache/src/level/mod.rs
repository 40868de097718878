//! Per-level container strategies of a multi-level cache
//!
//! A level maps one key segment to the next node. The strategy decides what
//! happens when the level fills up; strategies are looked up by identifier
//! in a [`LevelRegistry`].

mod bounded;
mod lru;
mod registry;
mod traits;

pub use self::bounded::BoundedLevel;
pub use self::lru::LruLevel;
pub use self::registry::{CacheLevelSpec, LevelConstructor, LevelParams, LevelRegistry};
pub use self::traits::{CacheLevel, CacheNode};

#[cfg(test)]
mod tests;
