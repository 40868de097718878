//! Session parameter handling for the CMIS binding layer
//!
//! This crate holds the flat configuration map applications fill in before
//! creating a binding, plus its line-oriented text representation.

pub mod format;
pub mod loader;
pub mod parameters;

pub use parameters::SessionParameters;
