//! Authentication and access control for the CMIS binding layer
//!
//! - **`auth`**: the `AuthenticationProvider` trait, the standard HTTP Basic
//!   and WS-Security implementation, and the provider registry.
//! - **`acl`**: merging an ACL with an add/remove delta for bindings that
//!   can only replace ACLs wholesale.

pub mod acl;
pub mod auth;

pub use auth::{
    AuthProviderRegistry, AuthenticationProvider, Credentials, HttpHeaders, SecurityHeader,
    StandardAuthenticationProvider,
};
