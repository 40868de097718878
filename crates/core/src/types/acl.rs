//! Access control types

use serde::{Deserialize, Serialize};

/// A principal together with the permissions granted to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ace {
    pub principal_id: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Whether the entry was set on the object itself rather than inherited
    #[serde(default = "default_direct")]
    pub direct: bool,
}

fn default_direct() -> bool {
    true
}

impl Ace {
    pub fn new<I, S>(principal_id: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            principal_id: principal_id.into(),
            permissions: permissions.into_iter().map(Into::into).collect(),
            direct: true,
        }
    }
}

/// An ordered list of access control entries.
///
/// Nothing stops a caller from building a list with two entries for the same
/// principal; ACL merging normalises that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acl {
    #[serde(default)]
    pub aces: Vec<Ace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact: Option<bool>,
}

impl Acl {
    #[must_use]
    pub fn new(aces: Vec<Ace>) -> Self {
        Self { aces, exact: None }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aces.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.aces.len()
    }

    /// First entry for the given principal
    #[must_use]
    pub fn ace(&self, principal_id: &str) -> Option<&Ace> {
        self.aces.iter().find(|ace| ace.principal_id == principal_id)
    }
}

impl FromIterator<Ace> for Acl {
    fn from_iter<T: IntoIterator<Item = Ace>>(iter: T) -> Self {
        Acl::new(iter.into_iter().collect())
    }
}

/// How an ACL change spreads to dependent objects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AclPropagation {
    #[default]
    RepositoryDetermined,
    ObjectOnly,
    Propagate,
}

impl AclPropagation {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RepositoryDetermined => "repositorydetermined",
            Self::ObjectOnly => "objectonly",
            Self::Propagate => "propagate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ace_defaults_direct_when_missing() {
        let ace: Ace =
            serde_json::from_str(r#"{"principalId":"alice","permissions":["cmis:read"]}"#).unwrap();
        assert!(ace.direct);
        assert_eq!(ace.permissions, vec!["cmis:read"]);
    }

    #[test]
    fn test_acl_lookup_by_principal() {
        let acl: Acl = vec![Ace::new("p1", ["read"]), Ace::new("p2", ["write"])]
            .into_iter()
            .collect();
        assert_eq!(acl.len(), 2);
        assert_eq!(acl.ace("p2").unwrap().permissions, vec!["write"]);
        assert!(acl.ace("p3").is_none());
    }
}
