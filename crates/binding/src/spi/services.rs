//! The CMIS service interfaces every binding exposes

use cmis_core::{
    Acl, AclPropagation, ObjectData, ObjectList, RepositoryInfo, Result, TypeDefinition,
};

pub trait RepositoryService: Send + Sync {
    fn get_repository_infos(&self) -> Result<Vec<RepositoryInfo>>;

    /// Served from the repository info cache when possible
    fn get_repository_info(&self, repository_id: &str) -> Result<RepositoryInfo>;

    /// Served from the type definition cache when possible
    fn get_type_definition(&self, repository_id: &str, type_id: &str) -> Result<TypeDefinition>;

    /// Children of `type_id`, or the base types when `None`
    fn get_type_children(
        &self,
        repository_id: &str,
        type_id: Option<&str>,
    ) -> Result<Vec<TypeDefinition>>;
}

pub trait NavigationService: Send + Sync {
    fn get_children(&self, repository_id: &str, folder_id: &str) -> Result<ObjectList>;

    fn get_folder_parent(&self, repository_id: &str, folder_id: &str) -> Result<ObjectData>;
}

pub trait ObjectService: Send + Sync {
    /// `filter` selects the returned properties; it is also the cache key
    fn get_object(
        &self,
        repository_id: &str,
        object_id: &str,
        filter: Option<&str>,
    ) -> Result<ObjectData>;

    fn get_object_by_path(
        &self,
        repository_id: &str,
        path: &str,
        filter: Option<&str>,
    ) -> Result<ObjectData>;

    fn delete_object(&self, repository_id: &str, object_id: &str) -> Result<()>;
}

pub trait VersioningService: Send + Sync {
    /// Returns the id of the private working copy
    fn check_out(&self, repository_id: &str, object_id: &str) -> Result<String>;

    fn cancel_check_out(&self, repository_id: &str, object_id: &str) -> Result<()>;

    fn get_all_versions(&self, repository_id: &str, object_id: &str) -> Result<Vec<ObjectData>>;
}

pub trait RelationshipService: Send + Sync {
    fn get_object_relationships(&self, repository_id: &str, object_id: &str) -> Result<ObjectList>;
}

pub trait DiscoveryService: Send + Sync {
    fn query(&self, repository_id: &str, statement: &str) -> Result<ObjectList>;
}

pub trait MultiFilingService: Send + Sync {
    fn add_object_to_folder(
        &self,
        repository_id: &str,
        object_id: &str,
        folder_id: &str,
    ) -> Result<()>;

    fn remove_object_from_folder(
        &self,
        repository_id: &str,
        object_id: &str,
        folder_id: Option<&str>,
    ) -> Result<()>;
}

pub trait AclService: Send + Sync {
    fn get_acl(&self, repository_id: &str, object_id: &str) -> Result<Acl>;

    /// Grant `add` and revoke `remove`, returning the resulting ACL
    fn apply_acl(
        &self,
        repository_id: &str,
        object_id: &str,
        add: Option<&Acl>,
        remove: Option<&Acl>,
        propagation: AclPropagation,
    ) -> Result<Acl>;
}

pub trait PolicyService: Send + Sync {
    fn apply_policy(&self, repository_id: &str, policy_id: &str, object_id: &str) -> Result<()>;

    fn get_applied_policies(&self, repository_id: &str, object_id: &str)
        -> Result<Vec<ObjectData>>;
}
