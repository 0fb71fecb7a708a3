use std::sync::Arc;

use parley_core::{Catalog, MatchResult, Reply, Result, TextGenerator, Vocabulary};
use tokio::sync::Mutex;

use crate::{
    ClassifierStrategy, CodeAnalysisStrategy, Conversation, GenerationStrategy, IntentMatcher,
    ModelSlot, ParleyConfig, PatternMatchStrategy, ResponseSelector, StrategyRouter, TurnState,
    Vectorizer,
};

/// High-level entry point that runs turns through the router
pub struct ChatOrchestrator {
    router: StrategyRouter,
    catalog: Arc<Catalog>,
    conversation: Mutex<Conversation>,
}

impl ChatOrchestrator {
    /// Creates an orchestrator around an already assembled router.
    pub fn new(router: StrategyRouter, catalog: Arc<Catalog>) -> Self {
        Self {
            router,
            catalog,
            conversation: Mutex::new(Conversation::new()),
        }
    }

    /// Builds the router described by `config`.
    ///
    /// Catalog and vocabulary are loaded from the configured paths, falling
    /// back to the built-in defaults. Generation strategies are registered
    /// only when a generator is supplied and generation is enabled. The
    /// classifier is registered only when its model slot is loaded.
    pub fn from_config(
        config: &ParleyConfig,
        generator: Option<Arc<dyn TextGenerator>>,
        model: Arc<ModelSlot>,
    ) -> Self {
        let catalog = Arc::new(Catalog::load_or_default(
            config.matching.catalog_path.as_deref(),
        ));
        let selector = Arc::new(ResponseSelector::new());
        let generator = generator.filter(|_| config.generation.enabled);

        let pattern = PatternMatchStrategy::new(Arc::clone(&catalog), Arc::clone(&selector))
            .with_matcher(IntentMatcher::new(config.matching.threshold));
        let mut router = StrategyRouter::new(Arc::new(pattern));

        if config.strategies.code_analysis {
            let mut code = CodeAnalysisStrategy::new(Arc::clone(&catalog), Arc::clone(&selector));
            if let Some(generator) = &generator {
                code = code.with_generator(Arc::clone(generator), config.generation.model.clone());
            }
            router = router.with_strategy(Arc::new(code));
        }

        if let Some(generator) = generator {
            router = router.with_strategy(Arc::new(GenerationStrategy::new(
                generator,
                config.generation.model.clone(),
            )));
        }

        if config.strategies.classifier {
            if model.is_loaded() {
                let vocabulary = Arc::new(Vocabulary::load_or_default(
                    config.matching.vocabulary_path.as_deref(),
                ));
                let vectorizer = Vectorizer::new(vocabulary);
                tracing::debug!("Classifier input has {} features", vectorizer.dimension());
                router = router.with_strategy(Arc::new(ClassifierStrategy::new(
                    vectorizer,
                    model,
                    Arc::clone(&catalog),
                    selector,
                )));
            } else {
                tracing::warn!("Classifier enabled but no model is loaded; using pattern matching");
            }
        }

        tracing::info!("Strategies: {}", router.strategy_names().join(" -> "));
        Self::new(router, catalog)
    }

    /// Resolves one message and marks the reply as displayed.
    ///
    /// Returns `None` when a newer message was submitted while this one was
    /// resolving.
    ///
    /// # Errors
    /// Returns `InvalidState` if the conversation cannot accept the message.
    pub async fn respond(&self, input: &str) -> Result<Option<Reply>> {
        let turn = self.conversation.lock().await.submit(input)?;
        let reply = self.router.route(&turn).await;

        let mut conversation = self.conversation.lock().await;
        if !conversation.complete(turn.sequence, reply)? {
            return Ok(None);
        }
        conversation.displayed().map(Some)
    }

    /// Best pattern match for `input`, without picking a response.
    pub fn match_input(&self, input: &str) -> MatchResult {
        self.router.fallback().match_input(input)
    }

    /// Current conversation state.
    pub async fn state(&self) -> TurnState {
        self.conversation.lock().await.state()
    }

    /// Catalog used by the pattern strategies.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Registered strategy names in dispatch order.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.router.strategy_names()
    }
}
