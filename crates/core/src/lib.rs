//! Core domain types, errors, and constants for the CMIS binding layer.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum and `Result` alias shared by every crate in
//!   the workspace.
//! - **`constants`**: session parameter keys, their defaults and the
//!   identifiers of the built-in plugins.
//! - **`types`**: ACLs, binding kinds and the repository/type/object data
//!   decoded from service responses.
//! - **`session`**: the per-session concurrent key/value store.

pub mod constants;
pub mod errors;
pub mod session;
pub mod types;

pub use self::{
    errors::{Error, Result, ResultExt},
    session::{SessionContext, SessionEntries, SessionValue},
    types::*,
};
