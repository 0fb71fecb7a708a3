use parley_core::{Catalog, MatchResult, UNKNOWN_TAG};

use super::similarity::similarity;

/// Minimum similarity accepted before falling back to `unknown`.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.2;

/// Finds the catalog intent whose patterns best match free text.
#[derive(Debug, Clone, Copy)]
pub struct IntentMatcher {
    threshold: f64,
}

impl IntentMatcher {
    /// Creates a matcher with a custom confidence threshold, clamped to `[0, 1]`.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// The confidence threshold in use.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the best-matching intent for `input`.
    ///
    /// Every pattern of every intent is scored in catalog order and the first
    /// strictly greater score wins. Below the threshold the tag becomes
    /// `unknown` but the best similarity is still reported.
    pub fn find_best_intent(&self, input: &str, catalog: &Catalog) -> MatchResult {
        if input.trim().is_empty() || !catalog.has_patterns() {
            return MatchResult::unknown();
        }

        let mut best_tag = UNKNOWN_TAG;
        let mut best_similarity = 0.0;

        for intent in catalog.intents() {
            for pattern in &intent.patterns {
                let score = similarity(input, pattern);
                tracing::debug!(
                    "Pattern '{pattern}' ({}) similarity: {score:.3}",
                    intent.tag
                );
                if score > best_similarity {
                    best_similarity = score;
                    best_tag = intent.tag.as_str();
                }
            }
        }

        if best_similarity < self.threshold {
            tracing::debug!(
                "Best match '{best_tag}' at {best_similarity:.3} is below threshold {:.2}",
                self.threshold
            );
            return MatchResult::new(UNKNOWN_TAG, best_similarity);
        }

        MatchResult::new(best_tag, best_similarity)
    }
}

impl Default for IntentMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

/// Matches `input` against `catalog` with the default threshold.
pub fn find_best_intent(input: &str, catalog: &Catalog) -> MatchResult {
    IntentMatcher::default().find_best_intent(input, catalog)
}
