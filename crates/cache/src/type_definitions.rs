//! Type definition cache

use crate::level::CacheLevelSpec;
use crate::multi_level::MultiLevelCache;
use crate::settings::size_setting;
use cmis_core::constants::{
    CACHE_SIZE_REPOSITORIES, CACHE_SIZE_TYPES, DEFAULT_CACHE_SIZE_REPOSITORIES,
    DEFAULT_CACHE_SIZE_TYPES,
};
use cmis_core::{Result, SessionContext, TypeDefinition};
use tracing::trace;

/// Type definitions keyed by (repository id, type id).
///
/// Repositories live in a bounded level, type ids in an LRU level per
/// repository.
#[derive(Debug)]
pub struct TypeDefinitionCache {
    cache: MultiLevelCache<TypeDefinition>,
}

impl TypeDefinitionCache {
    pub fn new(repositories: usize, types: usize) -> Result<Self> {
        Ok(Self {
            cache: MultiLevelCache::initialize(vec![
                CacheLevelSpec::bounded(repositories),
                CacheLevelSpec::lru(types),
            ])?,
        })
    }

    /// Sized by `cmis.cache.size.repositories` and `cmis.cache.size.types`
    pub fn from_session(session: &SessionContext) -> Result<Self> {
        let repositories = size_setting(
            session,
            CACHE_SIZE_REPOSITORIES,
            DEFAULT_CACHE_SIZE_REPOSITORIES,
        )?;
        let types = size_setting(session, CACHE_SIZE_TYPES, DEFAULT_CACHE_SIZE_TYPES)?;
        Self::new(repositories.get(), types.get())
    }

    /// Cache `definition`; one without an id is ignored
    pub fn put(&self, repository_id: &str, definition: &TypeDefinition) -> Result<()> {
        let Some(type_id) = definition.id.as_deref() else {
            trace!("Not caching type definition without id for '{}'", repository_id);
            return Ok(());
        };
        self.cache.put(definition.clone(), &[repository_id, type_id])
    }

    pub fn get(&self, repository_id: &str, type_id: Option<&str>) -> Option<TypeDefinition> {
        let type_id = type_id?;
        self.cache.get(&[repository_id, type_id]).ok().flatten()
    }

    pub fn remove_type(&self, repository_id: &str, type_id: &str) -> Result<()> {
        self.cache.remove(&[repository_id, type_id])
    }

    /// Drop every definition of one repository
    pub fn remove(&self, repository_id: &str) -> Result<()> {
        self.cache.remove_prefix(&[repository_id])
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmis_core::BaseType;

    #[test]
    fn test_definition_without_id_is_ignored() {
        let cache = TypeDefinitionCache::new(10, 100).unwrap();
        let mut definition = TypeDefinition::new("x", BaseType::Document);
        definition.id = None;

        cache.put("repo", &definition).unwrap();
        assert!(cache.get("repo", None).is_none());
    }

    #[test]
    fn test_put_get_and_remove_repository() {
        let cache = TypeDefinitionCache::new(10, 100).unwrap();
        cache
            .put("repo", &TypeDefinition::new("cmis:folder", BaseType::Folder))
            .unwrap();
        cache
            .put("repo", &TypeDefinition::new("cmis:document", BaseType::Document))
            .unwrap();

        let folder = cache.get("repo", Some("cmis:folder")).unwrap();
        assert_eq!(folder.base_type, BaseType::Folder);

        cache.remove_type("repo", "cmis:folder").unwrap();
        assert!(cache.get("repo", Some("cmis:folder")).is_none());
        assert!(cache.get("repo", Some("cmis:document")).is_some());

        cache.remove("repo").unwrap();
        assert!(cache.get("repo", Some("cmis:document")).is_none());
    }

    #[test]
    fn test_types_are_lru_bounded_per_repository() {
        let cache = TypeDefinitionCache::new(10, 2).unwrap();
        for id in ["t1", "t2", "t3"] {
            cache
                .put("repo", &TypeDefinition::new(id, BaseType::Item))
                .unwrap();
        }
        assert!(cache.get("repo", Some("t1")).is_none());
        assert!(cache.get("repo", Some("t2")).is_some());
        assert!(cache.get("repo", Some("t3")).is_some());
    }
}
