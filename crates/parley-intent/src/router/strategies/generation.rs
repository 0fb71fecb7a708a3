use std::sync::Arc;

use async_trait::async_trait;
use parley_core::{Error, Reply, ReplySource, Result, TextGenerator, Turn};

use super::super::strategy::ResponseStrategy;

/// Confidence reported for generated replies.
const GENERATED_CONFIDENCE: f64 = 0.85;

/// Delegates the turn to an external language model.
pub struct GenerationStrategy {
    generator: Arc<dyn TextGenerator>,
    model_id: String,
}

impl GenerationStrategy {
    /// Creates the strategy for one model.
    pub fn new<T: Into<String>>(generator: Arc<dyn TextGenerator>, model_id: T) -> Self {
        Self {
            generator,
            model_id: model_id.into(),
        }
    }

    /// Model identifier passed to the generator.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// The user message, preceded by the previous reply when there is one.
    fn build_prompt(turn: &Turn) -> String {
        turn.previous.as_ref().map_or_else(
            || turn.input.trim().to_owned(),
            |previous| {
                format!(
                    "(Your previous reply was: \"{}\")\n{}",
                    previous.text,
                    turn.input.trim()
                )
            },
        )
    }
}

#[async_trait]
impl ResponseStrategy for GenerationStrategy {
    fn applies_to(&self, turn: &Turn) -> bool {
        !turn.input.trim().is_empty()
    }

    async fn resolve(&self, turn: &Turn) -> Result<Reply> {
        let prompt = Self::build_prompt(turn);
        let text = self
            .generator
            .generate(&prompt, &self.model_id)
            .await
            .map_err(|error| match error {
                Error::Generation(message) => Error::Generation(message),
                other => Error::Generation(other.to_string()),
            })?;

        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Generation(format!(
                "{} returned an empty reply",
                self.model_id
            )));
        }

        Ok(Reply::new(text, ReplySource::Generation).with_confidence(GENERATED_CONFIDENCE))
    }

    fn priority(&self) -> u8 {
        80
    }

    fn name(&self) -> &'static str {
        "Generation"
    }
}
