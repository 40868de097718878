//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for binding operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for binding operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing, empty or malformed session parameters and unknown plugin
    /// identifiers. Always raised while a binding is being constructed.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A call was made with arguments that violate the callee's contract
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The transport layer rejected or failed a service call
    #[error("transport error during '{operation}': {message}")]
    Transport { operation: String, message: String },

    /// The repository answered without the requested object
    #[error("not found: {message}")]
    NotFound { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },
}
