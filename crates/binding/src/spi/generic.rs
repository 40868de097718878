use super::protocol::Protocol;
use super::services::{
    AclService, DiscoveryService, MultiFilingService, NavigationService, ObjectService,
    PolicyService, RelationshipService, RepositoryService, VersioningService,
};
use super::CmisSpi;
use crate::session::BindingSession;
use crate::transport::{ServiceCall, ServiceKind};
use cmis_core::{
    Acl, AclPropagation, Error, ObjectData, ObjectList, RepositoryInfo, Result, ResultExt,
    TypeDefinition,
};
use cmis_security::acl;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Cache key of objects fetched without a property filter
const DEFAULT_FILTER: &str = "*";

/// The service implementation shared by all built-in protocols. `P`
/// decides endpoints, authentication and how ACL changes are sent; caching
/// and response decoding are the same everywhere.
pub struct ProtocolSpi<P> {
    session: Arc<BindingSession>,
    protocol: PhantomData<fn() -> P>,
}

impl<P: Protocol> ProtocolSpi<P> {
    pub fn new(session: Arc<BindingSession>) -> Self {
        debug!("Creating {} SPI for session {}", P::BINDING, session.id());
        Self {
            session,
            protocol: PhantomData,
        }
    }

    pub fn session(&self) -> &Arc<BindingSession> {
        &self.session
    }

    fn invoke(
        &self,
        service: ServiceKind,
        operation: &str,
        repository_id: Option<&str>,
        object_id: Option<&str>,
        args: Value,
    ) -> Result<Value> {
        let endpoint = P::endpoint(&self.session, service, repository_id, object_id)?;
        let mut call = ServiceCall {
            binding: P::BINDING,
            service,
            operation: operation.to_string(),
            repository_id: repository_id.map(str::to_string),
            endpoint,
            args,
            http_headers: Default::default(),
            soap_header: None,
        };

        if let Some(provider) = self.session.authentication_provider() {
            let context = self.session.context();
            if P::HTTP_AUTHENTICATION {
                call.http_headers = provider.http_headers(context, &call.endpoint);
            }
            if P::SOAP_AUTHENTICATION {
                call.soap_header = provider.soap_headers(context, service.port_name());
            }
        }

        debug!("Invoking {}", call.describe());
        let response = self.session.transport().invoke(&call)?;
        P::absorb_response(&self.session, repository_id, &response);
        Ok(response)
    }

    fn evict(&self, repository_id: &str, object_id: &str) {
        self.session.object_cache(repository_id).remove(object_id);
    }
}

/// Decode a response; `null` means the repository has no such thing
fn decode<T: DeserializeOwned>(response: Value, what: &str) -> Result<T> {
    if response.is_null() {
        return Err(Error::not_found(what.to_string()));
    }
    serde_json::from_value(response).with_context(|| format!("decoding {what}"))
}

impl<P: Protocol> RepositoryService for ProtocolSpi<P> {
    fn get_repository_infos(&self) -> Result<Vec<RepositoryInfo>> {
        let response = self.invoke(
            ServiceKind::Repository,
            "getRepositoryInfos",
            None,
            None,
            json!({}),
        )?;
        let infos: Vec<RepositoryInfo> = decode(response, "repository infos")?;
        for info in &infos {
            self.session.repository_infos().put(info.clone())?;
        }
        Ok(infos)
    }

    fn get_repository_info(&self, repository_id: &str) -> Result<RepositoryInfo> {
        if let Some(info) = self.session.repository_infos().get(repository_id) {
            trace!("Repository info of '{}' served from cache", repository_id);
            return Ok(info);
        }
        let response = self.invoke(
            ServiceKind::Repository,
            "getRepositoryInfo",
            Some(repository_id),
            None,
            json!({ "repositoryId": repository_id }),
        )?;
        let info: RepositoryInfo = decode(response, &format!("repository '{repository_id}'"))?;
        self.session.repository_infos().put(info.clone())?;
        Ok(info)
    }

    fn get_type_definition(&self, repository_id: &str, type_id: &str) -> Result<TypeDefinition> {
        let types = self.session.type_definitions();
        if let Some(definition) = types.get(repository_id, Some(type_id)) {
            trace!("Type '{}' served from cache", type_id);
            return Ok(definition);
        }
        let response = self.invoke(
            ServiceKind::Repository,
            "getTypeDefinition",
            Some(repository_id),
            None,
            json!({ "typeId": type_id }),
        )?;
        let definition: TypeDefinition = decode(response, &format!("type '{type_id}'"))?;
        types.put(repository_id, &definition)?;
        Ok(definition)
    }

    fn get_type_children(
        &self,
        repository_id: &str,
        type_id: Option<&str>,
    ) -> Result<Vec<TypeDefinition>> {
        let response = self.invoke(
            ServiceKind::Repository,
            "getTypeChildren",
            Some(repository_id),
            None,
            json!({ "typeId": type_id }),
        )?;
        let children: Vec<TypeDefinition> = decode(response, "type children")?;
        for child in &children {
            self.session.type_definitions().put(repository_id, child)?;
        }
        Ok(children)
    }
}

impl<P: Protocol> NavigationService for ProtocolSpi<P> {
    fn get_children(&self, repository_id: &str, folder_id: &str) -> Result<ObjectList> {
        let response = self.invoke(
            ServiceKind::Navigation,
            "getChildren",
            Some(repository_id),
            Some(folder_id),
            json!({ "folderId": folder_id }),
        )?;
        decode(response, &format!("children of '{folder_id}'"))
    }

    fn get_folder_parent(&self, repository_id: &str, folder_id: &str) -> Result<ObjectData> {
        let response = self.invoke(
            ServiceKind::Navigation,
            "getFolderParent",
            Some(repository_id),
            Some(folder_id),
            json!({ "folderId": folder_id }),
        )?;
        decode(response, &format!("parent of '{folder_id}'"))
    }
}

impl<P: Protocol> ObjectService for ProtocolSpi<P> {
    fn get_object(
        &self,
        repository_id: &str,
        object_id: &str,
        filter: Option<&str>,
    ) -> Result<ObjectData> {
        let cache_key = filter.unwrap_or(DEFAULT_FILTER);
        let cache = self.session.object_cache(repository_id);
        if let Some(object) = cache.get(object_id, cache_key) {
            trace!("Object '{}' served from cache", object_id);
            return Ok(object);
        }

        let response = self.invoke(
            ServiceKind::Object,
            "getObject",
            Some(repository_id),
            Some(object_id),
            json!({ "objectId": object_id, "filter": filter }),
        )?;
        let object: ObjectData = decode(response, &format!("object '{object_id}'"))?;
        cache.put(object.clone(), cache_key);
        Ok(object)
    }

    fn get_object_by_path(
        &self,
        repository_id: &str,
        path: &str,
        filter: Option<&str>,
    ) -> Result<ObjectData> {
        let cache_key = filter.unwrap_or(DEFAULT_FILTER);
        let cache = self.session.object_cache(repository_id);
        if let Some(object) = cache.get_by_path(path, cache_key) {
            trace!("Object at '{}' served from cache", path);
            return Ok(object);
        }

        let response = self.invoke(
            ServiceKind::Object,
            "getObjectByPath",
            Some(repository_id),
            None,
            json!({ "path": path, "filter": filter }),
        )?;
        let object: ObjectData = decode(response, &format!("object at '{path}'"))?;
        cache.put_with_path(object.clone(), cache_key, path);
        Ok(object)
    }

    fn delete_object(&self, repository_id: &str, object_id: &str) -> Result<()> {
        self.invoke(
            ServiceKind::Object,
            "deleteObject",
            Some(repository_id),
            Some(object_id),
            json!({ "objectId": object_id }),
        )?;
        self.evict(repository_id, object_id);
        self.session.links().remove_links(repository_id, object_id)
    }
}

impl<P: Protocol> VersioningService for ProtocolSpi<P> {
    fn check_out(&self, repository_id: &str, object_id: &str) -> Result<String> {
        let response = self.invoke(
            ServiceKind::Versioning,
            "checkOut",
            Some(repository_id),
            Some(object_id),
            json!({ "objectId": object_id }),
        )?;
        self.evict(repository_id, object_id);
        let working_copy: ObjectData =
            decode(response, &format!("private working copy of '{object_id}'"))?;
        Ok(working_copy.id)
    }

    fn cancel_check_out(&self, repository_id: &str, object_id: &str) -> Result<()> {
        self.invoke(
            ServiceKind::Versioning,
            "cancelCheckOut",
            Some(repository_id),
            Some(object_id),
            json!({ "objectId": object_id }),
        )?;
        self.evict(repository_id, object_id);
        Ok(())
    }

    fn get_all_versions(&self, repository_id: &str, object_id: &str) -> Result<Vec<ObjectData>> {
        let response = self.invoke(
            ServiceKind::Versioning,
            "getAllVersions",
            Some(repository_id),
            Some(object_id),
            json!({ "objectId": object_id }),
        )?;
        decode(response, &format!("versions of '{object_id}'"))
    }
}

impl<P: Protocol> RelationshipService for ProtocolSpi<P> {
    fn get_object_relationships(&self, repository_id: &str, object_id: &str) -> Result<ObjectList> {
        let response = self.invoke(
            ServiceKind::Relationship,
            "getObjectRelationships",
            Some(repository_id),
            Some(object_id),
            json!({ "objectId": object_id }),
        )?;
        decode(response, &format!("relationships of '{object_id}'"))
    }
}

impl<P: Protocol> DiscoveryService for ProtocolSpi<P> {
    fn query(&self, repository_id: &str, statement: &str) -> Result<ObjectList> {
        let response = self.invoke(
            ServiceKind::Discovery,
            "query",
            Some(repository_id),
            None,
            json!({ "statement": statement }),
        )?;
        decode(response, "query results")
    }
}

impl<P: Protocol> MultiFilingService for ProtocolSpi<P> {
    fn add_object_to_folder(
        &self,
        repository_id: &str,
        object_id: &str,
        folder_id: &str,
    ) -> Result<()> {
        self.invoke(
            ServiceKind::MultiFiling,
            "addObjectToFolder",
            Some(repository_id),
            Some(object_id),
            json!({ "objectId": object_id, "folderId": folder_id }),
        )?;
        self.evict(repository_id, object_id);
        Ok(())
    }

    fn remove_object_from_folder(
        &self,
        repository_id: &str,
        object_id: &str,
        folder_id: Option<&str>,
    ) -> Result<()> {
        self.invoke(
            ServiceKind::MultiFiling,
            "removeObjectFromFolder",
            Some(repository_id),
            Some(object_id),
            json!({ "objectId": object_id, "folderId": folder_id }),
        )?;
        self.evict(repository_id, object_id);
        Ok(())
    }
}

impl<P: Protocol> AclService for ProtocolSpi<P> {
    fn get_acl(&self, repository_id: &str, object_id: &str) -> Result<Acl> {
        let response = self.invoke(
            ServiceKind::Acl,
            "getACL",
            Some(repository_id),
            Some(object_id),
            json!({ "objectId": object_id }),
        )?;
        decode(response, &format!("ACL of '{object_id}'"))
    }

    fn apply_acl(
        &self,
        repository_id: &str,
        object_id: &str,
        add: Option<&Acl>,
        remove: Option<&Acl>,
        propagation: AclPropagation,
    ) -> Result<Acl> {
        let args = if P::REPLACES_ACL {
            if !acl::is_merge_required(add, remove) {
                trace!("Nothing to change in the ACL of '{}'", object_id);
                return self.get_acl(repository_id, object_id);
            }
            let current = self.get_acl(repository_id, object_id)?;
            let merged = acl::merge(Some(&current), add, remove);
            json!({
                "objectId": object_id,
                "acl": merged,
                "propagation": propagation.as_str(),
            })
        } else {
            json!({
                "objectId": object_id,
                "addAces": add,
                "removeAces": remove,
                "propagation": propagation.as_str(),
            })
        };

        let response = self.invoke(
            ServiceKind::Acl,
            "applyACL",
            Some(repository_id),
            Some(object_id),
            args,
        )?;
        self.evict(repository_id, object_id);
        decode(response, &format!("ACL of '{object_id}'"))
    }
}

impl<P: Protocol> PolicyService for ProtocolSpi<P> {
    fn apply_policy(&self, repository_id: &str, policy_id: &str, object_id: &str) -> Result<()> {
        self.invoke(
            ServiceKind::Policy,
            "applyPolicy",
            Some(repository_id),
            Some(object_id),
            json!({ "policyId": policy_id, "objectId": object_id }),
        )?;
        self.evict(repository_id, object_id);
        Ok(())
    }

    fn get_applied_policies(
        &self,
        repository_id: &str,
        object_id: &str,
    ) -> Result<Vec<ObjectData>> {
        let response = self.invoke(
            ServiceKind::Policy,
            "getAppliedPolicies",
            Some(repository_id),
            Some(object_id),
            json!({ "objectId": object_id }),
        )?;
        decode(response, &format!("policies of '{object_id}'"))
    }
}

impl<P: Protocol> CmisSpi for ProtocolSpi<P> {
    fn repository_service(&self) -> &dyn RepositoryService {
        self
    }

    fn navigation_service(&self) -> &dyn NavigationService {
        self
    }

    fn object_service(&self) -> &dyn ObjectService {
        self
    }

    fn versioning_service(&self) -> &dyn VersioningService {
        self
    }

    fn relationship_service(&self) -> &dyn RelationshipService {
        self
    }

    fn discovery_service(&self) -> &dyn DiscoveryService {
        self
    }

    fn multi_filing_service(&self) -> &dyn MultiFilingService {
        self
    }

    fn acl_service(&self) -> &dyn AclService {
        self
    }

    fn policy_service(&self) -> &dyn PolicyService {
        self
    }

    fn clear_all_caches(&self) {
        self.session.clear_caches();
    }

    fn clear_repository_cache(&self, repository_id: &str) {
        if let Err(err) = self.session.clear_repository(repository_id) {
            warn!("Could not clear caches of '{}': {}", repository_id, err);
        }
    }

    fn close(&self) {
        self.session.clear_caches();
        debug!("Closed {} SPI of session {}", P::BINDING, self.session.id());
    }
}

impl<P: Protocol> fmt::Debug for ProtocolSpi<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolSpi")
            .field("binding", &P::BINDING)
            .field("session", &self.session.id())
            .finish()
    }
}
