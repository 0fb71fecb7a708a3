//! Intent resolution primitives.
//!
//! This module provides text normalization, pattern similarity scoring,
//! best-intent search, bag-of-words vectorization, response selection and
//! the source-code heuristic.

/// Source-code detection heuristic
pub mod code;
/// Best-intent search over a catalog
pub mod matcher;
/// Text normalization into tokens
pub mod normalize;
/// Random response selection
pub mod selector;
/// Blended Jaccard/coverage similarity
pub mod similarity;
/// Bag-of-words vectorization and label decoding
pub mod vectorizer;

pub use code::{looks_like_code, matching_probes};
pub use matcher::{DEFAULT_CONFIDENCE_THRESHOLD, IntentMatcher, find_best_intent};
pub use normalize::normalize;
pub use selector::{ResponseSelector, select_response};
pub use similarity::similarity;
pub use vectorizer::{Vectorizer, label_from_scores, vectorize};
