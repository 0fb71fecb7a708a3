use async_trait::async_trait;

use crate::Result;

/// External text-generation service, such as a local model server.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the identifier of this generator.
    fn name(&self) -> &'static str;

    /// Checks whether the service is reachable.
    async fn is_available(&self) -> bool;

    /// Generates a reply for `prompt` using the model `model_id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Generation`] if the request fails or the
    /// response cannot be parsed.
    async fn generate(&self, prompt: &str, model_id: &str) -> Result<String>;
}

/// External bag-of-words classifier.
///
/// Maps a binary feature vector to one score per label.
#[async_trait]
pub trait ScoreModel: Send + Sync {
    /// Scores the feature vector.
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails.
    async fn predict(&self, features: &[f32]) -> Result<Vec<f32>>;
}
