//! State shared by every call of one binding

use crate::transport::Transport;
use cmis_cache::{
    LinkCache, ObjectCache, ObjectCacheConfig, RepositoryInfoCache, TypeDefinitionCache,
};
use cmis_config::SessionParameters;
use cmis_core::{Error, Result, SessionContext};
use cmis_security::AuthenticationProvider;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Transient session entry holding the authentication provider
pub const AUTHENTICATION_PROVIDER_INSTANCE: &str = "cmis.binding.auth.provider.instance";

/// Everything a binding needs across calls: the session context seeded from
/// the resolved parameters, the caches and the transport.
pub struct BindingSession {
    id: Uuid,
    context: SessionContext,
    transport: Arc<dyn Transport>,
    repositories: RepositoryInfoCache,
    types: TypeDefinitionCache,
    links: LinkCache,
    objects: DashMap<String, Arc<ObjectCache>>,
    object_config: ObjectCacheConfig,
}

impl BindingSession {
    /// Seed a session from resolved parameters
    ///
    /// # Errors
    ///
    /// `Configuration` if a cache size or TTL parameter is invalid.
    pub fn new(
        parameters: &SessionParameters,
        transport: Arc<dyn Transport>,
        authentication_provider: Option<Arc<dyn AuthenticationProvider>>,
    ) -> Result<Self> {
        let context = SessionContext::from_parameters(parameters.iter());
        if let Some(provider) = authentication_provider {
            context.put_transient(AUTHENTICATION_PROVIDER_INSTANCE, provider);
        }

        let session = Self {
            id: Uuid::new_v4(),
            repositories: RepositoryInfoCache::from_session(&context)?,
            types: TypeDefinitionCache::from_session(&context)?,
            links: LinkCache::from_session(&context)?,
            objects: DashMap::new(),
            object_config: ObjectCacheConfig::from_session(&context)?,
            context,
            transport,
        };
        debug!("Created binding session {}", session.id);
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// String value of a session parameter
    pub fn parameter(&self, key: &str) -> Option<String> {
        self.context.get_str(key)
    }

    /// Value of a parameter that must be set
    ///
    /// # Errors
    ///
    /// `Configuration` naming `key` if it is absent or blank.
    pub fn required_parameter(&self, key: &str) -> Result<String> {
        self.parameter(key)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| Error::missing_parameter(key))
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn authentication_provider(&self) -> Option<Arc<dyn AuthenticationProvider>> {
        self.context
            .get_shared::<Arc<dyn AuthenticationProvider>>(AUTHENTICATION_PROVIDER_INSTANCE)
            .map(|provider| Arc::clone(&*provider))
    }

    pub fn repository_infos(&self) -> &RepositoryInfoCache {
        &self.repositories
    }

    pub fn type_definitions(&self) -> &TypeDefinitionCache {
        &self.types
    }

    pub fn links(&self) -> &LinkCache {
        &self.links
    }

    /// Object cache of one repository, created on first use
    pub fn object_cache(&self, repository_id: &str) -> Arc<ObjectCache> {
        if let Some(cache) = self.objects.get(repository_id) {
            return Arc::clone(cache.value());
        }
        let cache = self
            .objects
            .entry(repository_id.to_string())
            .or_insert_with(|| Arc::new(ObjectCache::new(self.object_config)));
        Arc::clone(cache.value())
    }

    pub fn clear_caches(&self) {
        self.repositories.clear();
        self.types.clear();
        self.links.clear();
        self.objects.clear();
        debug!("Cleared all caches of session {}", self.id);
    }

    /// Drop everything cached for one repository
    pub fn clear_repository(&self, repository_id: &str) -> Result<()> {
        self.repositories.remove(repository_id)?;
        self.types.remove(repository_id)?;
        self.links.remove_repository(repository_id)?;
        self.objects.remove(repository_id);
        debug!("Cleared caches of repository '{}'", repository_id);
        Ok(())
    }
}

impl fmt::Debug for BindingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingSession")
            .field("id", &self.id)
            .field("context", &self.context)
            .field("repositories_with_objects", &self.objects.len())
            .finish_non_exhaustive()
    }
}
