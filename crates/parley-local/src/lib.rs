//! Ollama client for local text generation and intent classification.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        reason = "Allow for tests"
    )
)]

/// Error types and result definitions.
pub mod error;
/// Reply generation and intent classification.
pub mod generator;
/// Server availability and model listing.
pub mod manager;
/// Wire types and model descriptions.
pub mod models;

pub use error::{LocalError, Result};
pub use generator::{INTENT_LABELS, OTHER_LABEL, OllamaGenerator, clean_reply, parse_intent_label};
pub use manager::{DEFAULT_OLLAMA_URL, OllamaManager};
pub use models::{
    GenerateOptions, ModelInfo, OllamaGenerateRequest, OllamaGenerateResponse, OllamaListResponse,
    OllamaModel,
};
