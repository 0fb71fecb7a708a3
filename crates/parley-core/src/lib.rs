//! Core types and traits for the Parley conversational front-end.
//!
//! This crate provides the intent catalog, the classifier vocabulary, error
//! handling and the trait definitions for external collaborators.
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

/// Intent catalog with guaranteed fallback.
pub mod catalog;
/// Built-in catalog and vocabulary.
pub mod defaults;
/// Error types and result definitions.
pub mod error;
/// Trait definitions for external services.
pub mod traits;
/// Core data types for turns, matches and replies.
pub mod types;
/// Classifier vocabulary and labels.
pub mod vocabulary;

pub use catalog::{CODE_TAG, Catalog, Intent, UNKNOWN_TAG};
pub use error::{Error, Result};
pub use traits::{ScoreModel, TextGenerator};
pub use types::{MatchResult, Reply, ReplySource, Turn};
pub use vocabulary::Vocabulary;
