//! Multi-level caches for the CMIS binding layer
//!
//! ## Key Components
//!
//! - **`level`**: per-level container strategies (`bounded`, `lru`) and the
//!   registry that builds them from a strategy identifier.
//! - **`MultiLevelCache`**: a depth-N cache addressed by key tuples, with
//!   levels created lazily along each key path.
//! - **`RepositoryInfoCache`**, **`TypeDefinitionCache`**, **`LinkCache`**:
//!   fixed-shape specialisations sized from the session.
//! - **`ObjectCache`**: per-repository objects with a path index and
//!   time-to-live expiry.

pub mod level;
pub mod links;
pub mod multi_level;
pub mod objects;
pub mod repository;
mod settings;
pub mod type_definitions;

pub use level::{CacheLevel, CacheLevelSpec, CacheNode, LevelRegistry};
pub use links::LinkCache;
pub use multi_level::MultiLevelCache;
pub use objects::{ObjectCache, ObjectCacheConfig};
pub use repository::RepositoryInfoCache;
pub use type_definitions::TypeDefinitionCache;
