use core::result::Result as CoreResult;

use parley_core::Error as CoreError;
use reqwest::Error as HttpError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Result type for local model operations.
pub type Result<T> = CoreResult<T, LocalError>;

/// Errors raised while talking to the local Ollama server.
#[derive(Debug, Error)]
pub enum LocalError {
    /// Error from the core crate.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Payload could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] SerdeJsonError),

    /// The server did not answer.
    #[error("Ollama not available: {0}")]
    OllamaUnavailable(String),

    /// The server answered with an error status.
    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl From<LocalError> for CoreError {
    fn from(error: LocalError) -> Self {
        match error {
            LocalError::Core(inner) => inner,
            other => Self::Generation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_to_generation_error() {
        let error = CoreError::from(LocalError::OllamaUnavailable("refused".to_owned()));
        assert!(matches!(error, CoreError::Generation(ref message) if message.contains("refused")));
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_core_error_round_trips() {
        let error = CoreError::from(LocalError::Core(CoreError::Config("bad".to_owned())));
        assert!(matches!(error, CoreError::Config(_)));
    }
}
