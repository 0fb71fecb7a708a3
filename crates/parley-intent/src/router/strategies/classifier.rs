use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use parley_core::{Catalog, Error, Reply, ReplySource, Result, ScoreModel, Turn};

use super::super::strategy::ResponseStrategy;
use crate::analyzer::{ResponseSelector, Vectorizer};

/// Holds the classifier once it has finished loading.
#[derive(Default)]
pub struct ModelSlot {
    model: OnceLock<Arc<dyn ScoreModel>>,
}

impl ModelSlot {
    /// Creates an empty slot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a slot that already holds a model.
    pub fn loaded(model: Arc<dyn ScoreModel>) -> Self {
        Self {
            model: OnceLock::from(model),
        }
    }

    /// The model, if loaded.
    pub fn get(&self) -> Option<&Arc<dyn ScoreModel>> {
        self.model.get()
    }

    /// Whether the model has been installed.
    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }
}

/// Bag-of-words vector through an external classifier.
///
/// Answers with a loading notice until the model is installed.
pub struct ClassifierStrategy {
    vectorizer: Vectorizer,
    model: Arc<ModelSlot>,
    catalog: Arc<Catalog>,
    selector: Arc<ResponseSelector>,
}

impl ClassifierStrategy {
    /// Creates the strategy.
    pub fn new(
        vectorizer: Vectorizer,
        model: Arc<ModelSlot>,
        catalog: Arc<Catalog>,
        selector: Arc<ResponseSelector>,
    ) -> Self {
        Self {
            vectorizer,
            model,
            catalog,
            selector,
        }
    }
}

#[async_trait]
impl ResponseStrategy for ClassifierStrategy {
    fn applies_to(&self, turn: &Turn) -> bool {
        !turn.input.trim().is_empty()
    }

    async fn resolve(&self, turn: &Turn) -> Result<Reply> {
        let Some(model) = self.model.get() else {
            tracing::debug!("Classifier not loaded yet for turn {}", turn.sequence);
            return Ok(Reply::loading());
        };

        let features = self.vectorizer.vectorize(&turn.input);
        let scores = model
            .predict(&features)
            .await
            .map_err(|error| Error::ClassifierUnavailable(error.to_string()))?;
        let label = self.vectorizer.decode(&scores);
        let confidence = scores
            .iter()
            .copied()
            .filter(|score| !score.is_nan())
            .fold(0.0f32, f32::max)
            .clamp(0.0, 1.0);

        let text = self.selector.select(&label, &self.catalog);
        Ok(Reply::new(text, ReplySource::Classifier)
            .with_confidence(f64::from(confidence))
            .with_tag(label))
    }

    fn priority(&self) -> u8 {
        60
    }

    fn name(&self) -> &'static str {
        "Classifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::{UNKNOWN_TAG, Vocabulary};

    struct FixedModel {
        scores: Vec<f32>,
    }

    #[async_trait]
    impl ScoreModel for FixedModel {
        async fn predict(&self, _features: &[f32]) -> Result<Vec<f32>> {
            Ok(self.scores.clone())
        }
    }

    struct BrokenModel;

    #[async_trait]
    impl ScoreModel for BrokenModel {
        async fn predict(&self, _features: &[f32]) -> Result<Vec<f32>> {
            Err(Error::Other("tensor shape mismatch".to_owned()))
        }
    }

    fn strategy(slot: ModelSlot) -> ClassifierStrategy {
        ClassifierStrategy::new(
            Vectorizer::new(Arc::new(Vocabulary::default())),
            Arc::new(slot),
            Arc::new(Catalog::default()),
            Arc::new(ResponseSelector::with_seed(5)),
        )
    }

    fn one_hot(position: usize) -> Vec<f32> {
        let mut scores = vec![0.0; Vocabulary::default().labels().len()];
        scores[position] = 0.9;
        scores
    }

    #[tokio::test]
    async fn test_not_loaded_returns_loading_reply() {
        let reply = strategy(ModelSlot::empty())
            .resolve(&Turn::new("hello"))
            .await
            .expect("loading reply");
        assert_eq!(reply, Reply::loading());
    }

    #[tokio::test]
    async fn test_decodes_label_and_selects_response() {
        let model = Arc::new(FixedModel { scores: one_hot(1) });
        let reply = strategy(ModelSlot::loaded(model))
            .resolve(&Turn::new("bye"))
            .await
            .expect("classifier reply");

        assert_eq!(reply.tag.as_deref(), Some("goodbye"));
        assert_eq!(reply.source, ReplySource::Classifier);
        assert!((reply.confidence - 0.9).abs() < 1e-6);
        assert!(Catalog::default().responses_for("goodbye").contains(&reply.text));
    }

    #[tokio::test]
    async fn test_mismatched_scores_decode_to_unknown() {
        let model = Arc::new(FixedModel {
            scores: vec![0.2, 0.8],
        });
        let reply = strategy(ModelSlot::loaded(model))
            .resolve(&Turn::new("hello"))
            .await
            .expect("classifier reply");
        assert_eq!(reply.tag.as_deref(), Some(UNKNOWN_TAG));
    }

    #[tokio::test]
    async fn test_inference_failure_is_classifier_unavailable() {
        let result = strategy(ModelSlot::loaded(Arc::new(BrokenModel)))
            .resolve(&Turn::new("hello"))
            .await;
        assert!(matches!(result, Err(Error::ClassifierUnavailable(_))));
    }

    #[test]
    fn test_slot_loaded_state() {
        assert!(!ModelSlot::empty().is_loaded());
        assert!(ModelSlot::loaded(Arc::new(BrokenModel)).is_loaded());
    }
}
