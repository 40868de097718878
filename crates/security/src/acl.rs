//! Client-side ACL reconciliation
//!
//! AtomPub can only replace an object's ACL as a whole. To apply an
//! add/remove delta the current ACL is merged with the delta locally and
//! the result sent in full.

use cmis_core::{Ace, Acl};
use indexmap::{IndexMap, IndexSet};

/// Whether `add` or `remove` carries any entry
pub fn is_merge_required(add: Option<&Acl>, remove: Option<&Acl>) -> bool {
    add.is_some_and(|acl| !acl.is_empty()) || remove.is_some_and(|acl| !acl.is_empty())
}

/// Apply `remove` and then `add` to `original`.
///
/// The result holds one entry per principal, in the order principals first
/// appear in `original` and then `add`. Principals left without permissions
/// are dropped. Removing an absent principal or permission does nothing.
pub fn merge(original: Option<&Acl>, add: Option<&Acl>, remove: Option<&Acl>) -> Acl {
    if !is_merge_required(add, remove) {
        return original.cloned().unwrap_or_default();
    }

    let mut permissions: IndexMap<&str, IndexSet<&str>> = IndexMap::new();

    for ace in aces(original) {
        permissions
            .entry(ace.principal_id.as_str())
            .or_default()
            .extend(ace.permissions.iter().map(String::as_str));
    }

    for ace in aces(remove) {
        if let Some(granted) = permissions.get_mut(ace.principal_id.as_str()) {
            for permission in &ace.permissions {
                granted.shift_remove(permission.as_str());
            }
        }
    }

    for ace in aces(add) {
        permissions
            .entry(ace.principal_id.as_str())
            .or_default()
            .extend(ace.permissions.iter().map(String::as_str));
    }

    permissions
        .into_iter()
        .filter(|(_, granted)| !granted.is_empty())
        .map(|(principal, granted)| Ace::new(principal, granted))
        .collect()
}

fn aces(acl: Option<&Acl>) -> impl Iterator<Item = &Ace> {
    acl.into_iter().flat_map(|acl| acl.aces.iter())
}
