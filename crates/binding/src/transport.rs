//! The boundary between the binding layer and the wire
//!
//! Bindings resolve everything protocol specific (endpoint, authentication)
//! into a [`ServiceCall`]; a [`Transport`] encodes it, performs the request
//! and hands back the decoded response document.

use cmis_core::constants::{
    WEBSERVICES_ACL_SERVICE, WEBSERVICES_DISCOVERY_SERVICE, WEBSERVICES_MULTIFILING_SERVICE,
    WEBSERVICES_NAVIGATION_SERVICE, WEBSERVICES_OBJECT_SERVICE, WEBSERVICES_POLICY_SERVICE,
    WEBSERVICES_RELATIONSHIP_SERVICE, WEBSERVICES_REPOSITORY_SERVICE,
    WEBSERVICES_VERSIONING_SERVICE,
};
use cmis_core::{BindingType, Error, Result};
use cmis_security::{HttpHeaders, SecurityHeader};
use serde::Serialize;
use std::fmt;

/// The CMIS service a call belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Repository,
    Navigation,
    Object,
    Versioning,
    Relationship,
    Discovery,
    MultiFiling,
    Acl,
    Policy,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 9] = [
        Self::Repository,
        Self::Navigation,
        Self::Object,
        Self::Versioning,
        Self::Relationship,
        Self::Discovery,
        Self::MultiFiling,
        Self::Acl,
        Self::Policy,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Repository => "repository",
            Self::Navigation => "navigation",
            Self::Object => "object",
            Self::Versioning => "versioning",
            Self::Relationship => "relationship",
            Self::Discovery => "discovery",
            Self::MultiFiling => "multifiling",
            Self::Acl => "acl",
            Self::Policy => "policy",
        }
    }

    /// Session key holding the Web Services endpoint of this service
    pub const fn webservices_endpoint_key(&self) -> &'static str {
        match self {
            Self::Repository => WEBSERVICES_REPOSITORY_SERVICE,
            Self::Navigation => WEBSERVICES_NAVIGATION_SERVICE,
            Self::Object => WEBSERVICES_OBJECT_SERVICE,
            Self::Versioning => WEBSERVICES_VERSIONING_SERVICE,
            Self::Relationship => WEBSERVICES_RELATIONSHIP_SERVICE,
            Self::Discovery => WEBSERVICES_DISCOVERY_SERVICE,
            Self::MultiFiling => WEBSERVICES_MULTIFILING_SERVICE,
            Self::Acl => WEBSERVICES_ACL_SERVICE,
            Self::Policy => WEBSERVICES_POLICY_SERVICE,
        }
    }

    /// SOAP port name of this service
    pub const fn port_name(&self) -> &'static str {
        match self {
            Self::Repository => "RepositoryServicePort",
            Self::Navigation => "NavigationServicePort",
            Self::Object => "ObjectServicePort",
            Self::Versioning => "VersioningServicePort",
            Self::Relationship => "RelationshipServicePort",
            Self::Discovery => "DiscoveryServicePort",
            Self::MultiFiling => "MultiFilingServicePort",
            Self::Acl => "ACLServicePort",
            Self::Policy => "PolicyServicePort",
        }
    }

    /// AtomPub link relation leading to this service's resource for an
    /// object. Services addressed through the service document have none.
    pub const fn link_relation(&self) -> Option<&'static str> {
        match self {
            Self::Navigation => Some("down"),
            Self::Object | Self::MultiFiling => Some("self"),
            Self::Versioning => Some("version-history"),
            Self::Relationship => Some("relationships"),
            Self::Acl => Some("http://docs.oasis-open.org/ns/cmis/link/200908/acl"),
            Self::Policy => Some("http://docs.oasis-open.org/ns/cmis/link/200908/policies"),
            Self::Repository | Self::Discovery => None,
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved service request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCall {
    pub binding: BindingType,
    pub service: ServiceKind,
    pub operation: String,
    pub repository_id: Option<String>,
    pub endpoint: String,
    pub args: serde_json::Value,
    pub http_headers: HttpHeaders,
    pub soap_header: Option<SecurityHeader>,
}

impl ServiceCall {
    /// Short form for logs and errors, `service.operation@endpoint`
    pub fn describe(&self) -> String {
        format!("{}.{}@{}", self.service, self.operation, self.endpoint)
    }
}

/// Performs service calls on the wire
pub trait Transport: Send + Sync {
    /// Execute `call` and return the response document
    fn invoke(&self, call: &ServiceCall) -> Result<serde_json::Value>;
}

/// The transport of a factory nobody attached a wire layer to. Every call
/// fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedTransport;

impl Transport for DetachedTransport {
    fn invoke(&self, call: &ServiceCall) -> Result<serde_json::Value> {
        Err(Error::transport(
            call.operation.clone(),
            format!("no transport attached, cannot reach {}", call.endpoint),
        ))
    }
}
