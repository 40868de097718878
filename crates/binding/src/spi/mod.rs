//! Protocol implementations behind the binding facade
//!
//! A [`CmisSpi`] provides the nine service interfaces for one wire
//! protocol. The built-in ones are [`ProtocolSpi`] instantiations; others
//! can be added to a [`SpiRegistry`].

mod generic;
mod protocol;
mod registry;
mod services;

pub use generic::ProtocolSpi;
pub use protocol::{AtomPub, Browser, Local, Protocol, WebServices};
pub use registry::{SpiConstructor, SpiRegistry};
pub use services::{
    AclService, DiscoveryService, MultiFilingService, NavigationService, ObjectService,
    PolicyService, RelationshipService, RepositoryService, VersioningService,
};

/// One protocol implementation of the CMIS services
pub trait CmisSpi: Send + Sync {
    fn repository_service(&self) -> &dyn RepositoryService;
    fn navigation_service(&self) -> &dyn NavigationService;
    fn object_service(&self) -> &dyn ObjectService;
    fn versioning_service(&self) -> &dyn VersioningService;
    fn relationship_service(&self) -> &dyn RelationshipService;
    fn discovery_service(&self) -> &dyn DiscoveryService;
    fn multi_filing_service(&self) -> &dyn MultiFilingService;
    fn acl_service(&self) -> &dyn AclService;
    fn policy_service(&self) -> &dyn PolicyService;

    fn clear_all_caches(&self);

    fn clear_repository_cache(&self, repository_id: &str);

    /// Release resources; the SPI is not used afterwards
    fn close(&self);
}
