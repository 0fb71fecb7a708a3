use std::sync::Arc;

use parley_core::{Reply, Turn};

use super::strategies::PatternMatchStrategy;
use super::strategy::ResponseStrategy;

/// Tries strategies from highest to lowest priority; the first success wins.
///
/// Pattern matching always answers, so routing never fails.
pub struct StrategyRouter {
    strategies: Vec<Arc<dyn ResponseStrategy>>,
    fallback: Arc<PatternMatchStrategy>,
}

impl StrategyRouter {
    /// Creates a router that only pattern-matches.
    pub fn new(fallback: Arc<PatternMatchStrategy>) -> Self {
        Self {
            strategies: Vec::new(),
            fallback,
        }
    }

    /// Registers a strategy, keeping the list ordered by priority.
    ///
    /// Equal priorities keep registration order.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Arc<dyn ResponseStrategy>) -> Self {
        let position = self
            .strategies
            .iter()
            .position(|existing| existing.priority() < strategy.priority())
            .unwrap_or(self.strategies.len());
        self.strategies.insert(position, strategy);
        self
    }

    /// Names of the registered strategies in the order they are tried.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies
            .iter()
            .map(|strategy| strategy.name())
            .chain([self.fallback.name()])
            .collect()
    }

    /// The always-available pattern matcher.
    pub fn fallback(&self) -> &PatternMatchStrategy {
        &self.fallback
    }

    /// Resolves a turn to a reply.
    pub async fn route(&self, turn: &Turn) -> Reply {
        for strategy in &self.strategies {
            if !strategy.applies_to(turn) {
                continue;
            }
            match strategy.resolve(turn).await {
                Ok(reply) => {
                    tracing::info!(
                        "Turn {} answered by {} | tag: {} | confidence: {:.2}",
                        turn.sequence,
                        strategy.name(),
                        reply.tag.as_deref().unwrap_or("-"),
                        reply.confidence
                    );
                    return reply;
                }
                Err(error) => {
                    tracing::warn!(
                        "Strategy {} failed for turn {}: {error}",
                        strategy.name(),
                        turn.sequence
                    );
                }
            }
        }

        let reply = self.fallback.reply(&turn.input);
        tracing::info!(
            "Turn {} answered by {} | tag: {} | confidence: {:.2}",
            turn.sequence,
            self.fallback.name(),
            reply.tag.as_deref().unwrap_or("-"),
            reply.confidence
        );
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::ResponseSelector;
    use async_trait::async_trait;
    use parley_core::{Catalog, Error, Intent, ReplySource, Result};

    struct FixedStrategy {
        name: &'static str,
        priority: u8,
        outcome: Option<&'static str>,
    }

    #[async_trait]
    impl ResponseStrategy for FixedStrategy {
        fn applies_to(&self, _turn: &Turn) -> bool {
            true
        }

        async fn resolve(&self, _turn: &Turn) -> Result<Reply> {
            self.outcome.map_or_else(
                || Err(Error::Generation(format!("{} failed", self.name))),
                |text| Ok(Reply::new(text, ReplySource::Generation)),
            )
        }

        fn priority(&self) -> u8 {
            self.priority
        }

        fn name(&self) -> &'static str {
            self.name
        }
    }

    fn pattern_strategy() -> Arc<PatternMatchStrategy> {
        let catalog = Catalog::new(vec![
            Intent::new("greeting")
                .with_patterns(vec!["hello".to_owned()])
                .with_responses(vec!["Hi!".to_owned()]),
        ])
        .expect("catalog should build");
        Arc::new(PatternMatchStrategy::new(
            Arc::new(catalog),
            Arc::new(ResponseSelector::with_seed(0)),
        ))
    }

    #[tokio::test]
    async fn test_priority_order() {
        let router = StrategyRouter::new(pattern_strategy())
            .with_strategy(Arc::new(FixedStrategy {
                name: "low",
                priority: 10,
                outcome: Some("low"),
            }))
            .with_strategy(Arc::new(FixedStrategy {
                name: "high",
                priority: 90,
                outcome: Some("high"),
            }));

        assert_eq!(router.strategy_names(), ["high", "low", "PatternMatch"]);
        let reply = router.route(&Turn::new("hello")).await;
        assert_eq!(reply.text, "high");
    }

    #[tokio::test]
    async fn test_failure_falls_through() {
        let router = StrategyRouter::new(pattern_strategy())
            .with_strategy(Arc::new(FixedStrategy {
                name: "broken",
                priority: 90,
                outcome: None,
            }))
            .with_strategy(Arc::new(FixedStrategy {
                name: "working",
                priority: 50,
                outcome: Some("working"),
            }));

        let reply = router.route(&Turn::new("hello")).await;
        assert_eq!(reply.text, "working");
    }

    #[tokio::test]
    async fn test_all_failures_use_pattern_matching() {
        let router = StrategyRouter::new(pattern_strategy()).with_strategy(Arc::new(
            FixedStrategy {
                name: "broken",
                priority: 90,
                outcome: None,
            },
        ));

        let reply = router.route(&Turn::new("hello there")).await;
        assert_eq!(reply.text, "Hi!");
        assert_eq!(reply.source, ReplySource::PatternMatch);
        assert_eq!(reply.tag.as_deref(), Some("greeting"));
    }
}
