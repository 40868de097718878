//! Repository, type and object data

use super::acl::Acl;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The base type every CMIS object type derives from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseType {
    Document,
    Folder,
    Relationship,
    Policy,
    Item,
    Secondary,
}

/// Repository capabilities and identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_version: Option<String>,
    #[serde(default)]
    pub cmis_version: Option<String>,
    #[serde(default)]
    pub root_folder_id: Option<String>,
}

/// An object type definition. Responses may omit the id, in which case the
/// definition is never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    #[serde(default)]
    pub id: Option<String>,
    pub base_type: BaseType,
    #[serde(default)]
    pub parent_type_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creatable: bool,
    #[serde(default)]
    pub queryable: bool,
    #[serde(default)]
    pub fileable: bool,
}

impl TypeDefinition {
    #[must_use]
    pub fn new(id: impl Into<String>, base_type: BaseType) -> Self {
        Self {
            id: Some(id.into()),
            base_type,
            parent_type_id: None,
            display_name: None,
            description: None,
            creatable: false,
            queryable: false,
            fileable: false,
        }
    }
}

/// A repository object as returned by the object, navigation, versioning,
/// relationship and discovery services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub id: String,
    pub base_type: BaseType,
    #[serde(default)]
    pub type_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Only folders carry a path
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl: Option<Acl>,
}

impl ObjectData {
    #[must_use]
    pub fn new(id: impl Into<String>, base_type: BaseType) -> Self {
        Self {
            id: id.into(),
            base_type,
            type_id: None,
            name: None,
            path: None,
            parent_id: None,
            properties: BTreeMap::new(),
            acl: None,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.base_type == BaseType::Folder
    }
}

/// A page of objects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectList {
    #[serde(default)]
    pub objects: Vec<ObjectData>,
    #[serde(default)]
    pub has_more_items: bool,
    #[serde(default)]
    pub num_items: Option<u64>,
}
