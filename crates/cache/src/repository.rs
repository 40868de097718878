//! Repository info cache

use crate::level::CacheLevelSpec;
use crate::multi_level::MultiLevelCache;
use crate::settings::size_setting;
use cmis_core::constants::{CACHE_SIZE_REPOSITORIES, DEFAULT_CACHE_SIZE_REPOSITORIES};
use cmis_core::{RepositoryInfo, Result, SessionContext};

/// Repository infos keyed by repository id
#[derive(Debug)]
pub struct RepositoryInfoCache {
    cache: MultiLevelCache<RepositoryInfo>,
}

impl RepositoryInfoCache {
    pub fn new(repositories: usize) -> Result<Self> {
        Ok(Self {
            cache: MultiLevelCache::initialize(vec![CacheLevelSpec::bounded(repositories)])?,
        })
    }

    /// Sized by `cmis.cache.size.repositories`
    pub fn from_session(session: &SessionContext) -> Result<Self> {
        let size = size_setting(
            session,
            CACHE_SIZE_REPOSITORIES,
            DEFAULT_CACHE_SIZE_REPOSITORIES,
        )?;
        Self::new(size.get())
    }

    pub fn put(&self, info: RepositoryInfo) -> Result<()> {
        let id = info.id.clone();
        self.cache.put(info, &[id.as_str()])
    }

    pub fn get(&self, repository_id: &str) -> Option<RepositoryInfo> {
        self.cache.get(&[repository_id]).ok().flatten()
    }

    pub fn remove(&self, repository_id: &str) -> Result<()> {
        self.cache.remove(&[repository_id])
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}
