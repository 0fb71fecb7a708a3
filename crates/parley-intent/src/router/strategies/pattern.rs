use std::sync::Arc;

use async_trait::async_trait;
use parley_core::{Catalog, MatchResult, Reply, ReplySource, Result, Turn};

use super::super::strategy::ResponseStrategy;
use crate::analyzer::{IntentMatcher, ResponseSelector};

/// Lexical pattern matching against the intent catalog. Always answers.
pub struct PatternMatchStrategy {
    catalog: Arc<Catalog>,
    matcher: IntentMatcher,
    selector: Arc<ResponseSelector>,
}

impl PatternMatchStrategy {
    /// Creates the strategy with the default confidence threshold.
    pub fn new(catalog: Arc<Catalog>, selector: Arc<ResponseSelector>) -> Self {
        Self {
            catalog,
            matcher: IntentMatcher::default(),
            selector,
        }
    }

    /// Replaces the matcher, e.g. to change the threshold.
    #[must_use]
    pub fn with_matcher(mut self, matcher: IntentMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Best intent for `input` without picking a response.
    pub fn match_input(&self, input: &str) -> MatchResult {
        self.matcher.find_best_intent(input, &self.catalog)
    }

    /// Matches `input` and picks a response for the resolved intent.
    pub fn reply(&self, input: &str) -> Reply {
        let matched = self.match_input(input);
        let text = self.selector.select(&matched.tag, &self.catalog);
        Reply::new(text, ReplySource::PatternMatch)
            .with_confidence(matched.similarity)
            .with_tag(matched.tag)
    }
}

#[async_trait]
impl ResponseStrategy for PatternMatchStrategy {
    fn applies_to(&self, _turn: &Turn) -> bool {
        true
    }

    async fn resolve(&self, turn: &Turn) -> Result<Reply> {
        Ok(self.reply(&turn.input))
    }

    fn priority(&self) -> u8 {
        10
    }

    fn name(&self) -> &'static str {
        "PatternMatch"
    }
}
