//! Extension traits for error handling

use super::types::{Error, Result};

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a lazy message
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| with_message(e.into(), message.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| with_message(e.into(), f()))
    }
}

// Keeps the variant so callers can still match on the error kind.
fn with_message(error: Error, context: String) -> Error {
    match error {
        Error::Configuration { message } => Error::Configuration {
            message: format!("{context}: {message}"),
        },
        Error::InvalidArgument { message } => Error::InvalidArgument {
            message: format!("{context}: {message}"),
        },
        Error::Transport { operation, message } => Error::Transport {
            operation,
            message: format!("{context}: {message}"),
        },
        Error::NotFound { message } => Error::NotFound {
            message: format!("{context}: {message}"),
        },
        Error::Json { message, source } => Error::Json {
            message: format!("{context}: {message}"),
            source,
        },
        other @ Error::FileSystem { .. } => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_preserves_variant() {
        let result: std::result::Result<(), Error> = Err(Error::missing_parameter("cmis.user"));
        let err = result.context("creating binding").unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "configuration error: creating binding: parameter 'cmis.user' is missing"
        );
    }

    #[test]
    fn test_with_context_on_json_error() {
        let result: std::result::Result<serde_json::Value, serde_json::Error> =
            serde_json::from_str("{");
        let err = result
            .with_context(|| "decoding response".to_string())
            .unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
        assert!(err.to_string().starts_with("JSON error: decoding response"));
    }
}
