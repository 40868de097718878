//! Domain value types exchanged between the binding layer and its callers.
//!
//! - **`acl`**: access control entries and lists
//! - **`binding`**: the binding kinds the factory can construct
//! - **`objects`**: repository, type and object data as decoded from a
//!   service response

pub mod acl;
pub mod binding;
pub mod objects;

pub use acl::*;
pub use binding::*;
pub use objects::*;
