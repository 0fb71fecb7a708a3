//! Intent resolution for a conversational assistant.
//!
//! User text is normalized, scored against a catalog of intent patterns and
//! answered with a canned response. Optional strategies sit in front of the
//! pattern matcher: a local language model, a bag-of-words classifier and a
//! detector that diverts pasted source code. They are tried in priority
//! order and any failure falls through to pattern matching.
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

/// Matching, vectorization and selection primitives
pub mod analyzer;
/// Configuration file handling
pub mod config;
/// Turn-taking state machine
pub mod conversation;
/// High-level chat entry point
pub mod orchestrator;
/// Ranked strategy dispatch
pub mod router;

pub use analyzer::{
    DEFAULT_CONFIDENCE_THRESHOLD, IntentMatcher, ResponseSelector, Vectorizer, find_best_intent,
    label_from_scores, looks_like_code, matching_probes, normalize, select_response, similarity,
    vectorize,
};
pub use config::{CONFIG_ENV_VAR, GenerationConfig, MatchingConfig, ParleyConfig, StrategyConfig};
pub use conversation::{Conversation, TurnState};
pub use orchestrator::ChatOrchestrator;
pub use router::{
    ClassifierStrategy, CodeAnalysisStrategy, GenerationStrategy, ModelSlot, PatternMatchStrategy,
    ResponseStrategy, StrategyRouter,
};
