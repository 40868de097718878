//! AtomPub link cache

use crate::level::CacheLevelSpec;
use crate::multi_level::MultiLevelCache;
use crate::settings::size_setting;
use cmis_core::constants::{
    CACHE_SIZE_LINKS, CACHE_SIZE_REPOSITORIES, DEFAULT_CACHE_SIZE_LINKS,
    DEFAULT_CACHE_SIZE_REPOSITORIES,
};
use cmis_core::{Result, SessionContext};

/// Distinct link relations kept per object
const MAX_RELATIONS_PER_OBJECT: usize = 64;

/// Link hrefs keyed by (repository id, object id, link relation)
#[derive(Debug)]
pub struct LinkCache {
    cache: MultiLevelCache<String>,
}

impl LinkCache {
    pub fn new(repositories: usize, objects: usize) -> Result<Self> {
        Ok(Self {
            cache: MultiLevelCache::initialize(vec![
                CacheLevelSpec::bounded(repositories),
                CacheLevelSpec::lru(objects),
                CacheLevelSpec::bounded(MAX_RELATIONS_PER_OBJECT),
            ])?,
        })
    }

    /// Sized by `cmis.cache.size.repositories` and `cmis.cache.size.links`
    pub fn from_session(session: &SessionContext) -> Result<Self> {
        let repositories = size_setting(
            session,
            CACHE_SIZE_REPOSITORIES,
            DEFAULT_CACHE_SIZE_REPOSITORIES,
        )?;
        let links = size_setting(session, CACHE_SIZE_LINKS, DEFAULT_CACHE_SIZE_LINKS)?;
        Self::new(repositories.get(), links.get())
    }

    pub fn add_link(
        &self,
        repository_id: &str,
        object_id: &str,
        rel: &str,
        href: &str,
    ) -> Result<()> {
        self.cache
            .put(href.to_string(), &[repository_id, object_id, rel])
    }

    pub fn get_link(&self, repository_id: &str, object_id: &str, rel: &str) -> Option<String> {
        self.cache
            .get(&[repository_id, object_id, rel])
            .ok()
            .flatten()
    }

    /// Forget every link of one object
    pub fn remove_links(&self, repository_id: &str, object_id: &str) -> Result<()> {
        self.cache.remove_prefix(&[repository_id, object_id])
    }

    pub fn remove_repository(&self, repository_id: &str) -> Result<()> {
        self.cache.remove_prefix(&[repository_id])
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_by_object_and_relation() {
        let cache = LinkCache::new(10, 400).unwrap();
        cache
            .add_link("repo", "doc1", "self", "http://h/entry?id=doc1")
            .unwrap();
        cache
            .add_link("repo", "doc1", "edit", "http://h/edit?id=doc1")
            .unwrap();

        assert_eq!(
            cache.get_link("repo", "doc1", "self").as_deref(),
            Some("http://h/entry?id=doc1")
        );
        assert!(cache.get_link("repo", "doc2", "self").is_none());

        cache.remove_links("repo", "doc1").unwrap();
        assert!(cache.get_link("repo", "doc1", "edit").is_none());
    }

    #[test]
    fn test_remove_repository() {
        let cache = LinkCache::new(10, 400).unwrap();
        cache.add_link("r1", "o", "self", "a").unwrap();
        cache.add_link("r2", "o", "self", "b").unwrap();
        cache.remove_repository("r1").unwrap();
        assert!(cache.get_link("r1", "o", "self").is_none());
        assert_eq!(cache.get_link("r2", "o", "self").as_deref(), Some("b"));
    }
}
