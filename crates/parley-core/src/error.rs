use core::result::Result as CoreResult;
use std::io::Error as IoError;

use serde_json::Error as SerdeJsonError;
use thiserror::Error;
use toml::de::Error as TomlError;

/// Result type for core operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors that can occur while resolving a conversational turn.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] SerdeJsonError),

    /// TOML deserialization failed.
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The intents catalog could not be loaded.
    #[error("Catalog load failed: {0}")]
    CatalogLoad(String),

    /// The vocabulary artifact could not be loaded.
    #[error("Vocabulary load failed: {0}")]
    VocabularyLoad(String),

    /// The external text-generation service failed.
    #[error("External generation failed: {0}")]
    Generation(String),

    /// The classifier model has not been loaded yet.
    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// The fallback intent has no responses to choose from.
    #[error("Fallback intent '{0}' has no responses")]
    EmptyFallback(String),

    /// A conversation transition was requested from the wrong state.
    #[error("Invalid state transition: {0}")]
    InvalidState(String),

    /// A general error not covered by other variants.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether a defined local fallback exists for this error.
    ///
    /// Load failures fall back to built-in defaults, generation failures to
    /// pattern matching, and a missing classifier to a loading message.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::CatalogLoad(_)
                | Self::VocabularyLoad(_)
                | Self::Generation(_)
                | Self::ClassifierUnavailable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value as JsonValue, from_str};
    use std::io;

    #[test]
    fn test_error_display() {
        let error1 = Error::Config("invalid threshold".to_owned());
        assert_eq!(error1.to_string(), "Configuration error: invalid threshold");

        let error2 = Error::Generation("connection refused".to_owned());
        assert_eq!(
            error2.to_string(),
            "External generation failed: connection refused"
        );

        let error3 = Error::EmptyFallback("unknown".to_owned());
        assert_eq!(error3.to_string(), "Fallback intent 'unknown' has no responses");
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::CatalogLoad("missing".to_owned()).is_recoverable());
        assert!(Error::VocabularyLoad("missing".to_owned()).is_recoverable());
        assert!(Error::Generation("timeout".to_owned()).is_recoverable());
        assert!(Error::ClassifierUnavailable("loading".to_owned()).is_recoverable());

        assert!(!Error::EmptyFallback("unknown".to_owned()).is_recoverable());
        assert!(!Error::Config("bad".to_owned()).is_recoverable());
    }

    #[test]
    fn test_error_from_io() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = from_str::<JsonValue>("invalid json").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
