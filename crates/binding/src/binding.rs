//! The handle applications use to talk to a repository

use crate::session::BindingSession;
use crate::spi::{
    AclService, CmisSpi, DiscoveryService, MultiFilingService, NavigationService, ObjectService,
    PolicyService, RelationshipService, RepositoryService, VersioningService,
};
use cmis_config::SessionParameters;
use cmis_core::BindingType;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A constructed binding: the resolved parameters, the session state and
/// the protocol implementation serving the CMIS services.
pub struct CmisBinding {
    binding_type: BindingType,
    parameters: SessionParameters,
    session: Arc<BindingSession>,
    spi: Box<dyn CmisSpi>,
}

impl CmisBinding {
    pub(crate) fn new(
        binding_type: BindingType,
        parameters: SessionParameters,
        session: Arc<BindingSession>,
        spi: Box<dyn CmisSpi>,
    ) -> Self {
        Self {
            binding_type,
            parameters,
            session,
            spi,
        }
    }

    pub fn binding_type(&self) -> BindingType {
        self.binding_type
    }

    /// The parameters after defaults were applied
    pub fn parameters(&self) -> &SessionParameters {
        &self.parameters
    }

    pub fn session(&self) -> &Arc<BindingSession> {
        &self.session
    }

    pub fn spi(&self) -> &dyn CmisSpi {
        self.spi.as_ref()
    }

    pub fn repository_service(&self) -> &dyn RepositoryService {
        self.spi.repository_service()
    }

    pub fn navigation_service(&self) -> &dyn NavigationService {
        self.spi.navigation_service()
    }

    pub fn object_service(&self) -> &dyn ObjectService {
        self.spi.object_service()
    }

    pub fn versioning_service(&self) -> &dyn VersioningService {
        self.spi.versioning_service()
    }

    pub fn relationship_service(&self) -> &dyn RelationshipService {
        self.spi.relationship_service()
    }

    pub fn discovery_service(&self) -> &dyn DiscoveryService {
        self.spi.discovery_service()
    }

    pub fn multi_filing_service(&self) -> &dyn MultiFilingService {
        self.spi.multi_filing_service()
    }

    pub fn acl_service(&self) -> &dyn AclService {
        self.spi.acl_service()
    }

    pub fn policy_service(&self) -> &dyn PolicyService {
        self.spi.policy_service()
    }

    pub fn clear_all_caches(&self) {
        self.spi.clear_all_caches();
    }

    pub fn clear_repository_cache(&self, repository_id: &str) {
        self.spi.clear_repository_cache(repository_id);
    }

    pub fn close(self) {
        self.spi.close();
        debug!("Closed {} binding {}", self.binding_type, self.session.id());
    }
}

impl fmt::Debug for CmisBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CmisBinding")
            .field("binding_type", &self.binding_type)
            .field("session", &self.session.id())
            .finish_non_exhaustive()
    }
}
