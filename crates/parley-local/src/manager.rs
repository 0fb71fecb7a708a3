use crate::models::{ModelInfo, OllamaListResponse, OllamaModel};
use crate::{LocalError, Result};
use reqwest::Client;

/// Default address of a local Ollama server.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Queries the Ollama server for its state and installed models
pub struct OllamaManager {
    /// HTTP client used to interact with the Ollama service.
    client: Client,
    /// Base URL pointing to the Ollama runtime.
    base_url: String,
}

impl OllamaManager {
    /// Creates a manager for the default local server.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_OLLAMA_URL.to_owned(),
        }
    }

    /// Points the manager at another server.
    #[must_use]
    pub fn with_url<T: Into<String>>(mut self, url: T) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Reuses an existing HTTP client.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Base URL of the server.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if Ollama is running
    pub async fn is_available(&self) -> bool {
        match self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(error) => {
                tracing::debug!("Ollama at {} is not running: {error}", self.base_url);
                false
            }
        }
    }

    /// List installed models
    ///
    /// # Errors
    ///
    /// Returns an error if Ollama is not available or if the response cannot be parsed
    pub async fn list_models(&self) -> Result<Vec<OllamaModel>> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
            .map_err(|err| LocalError::OllamaUnavailable(err.to_string()))?;

        if !response.status().is_success() {
            return Err(LocalError::OllamaUnavailable(format!(
                "model list returned {}",
                response.status()
            )));
        }

        let list: OllamaListResponse = response.json().await?;
        Ok(list.models)
    }

    /// Installed models with their family, size and category
    ///
    /// # Errors
    ///
    /// Returns an error if the model list cannot be retrieved
    pub async fn describe_models(&self) -> Result<Vec<ModelInfo>> {
        let models = self.list_models().await?;
        Ok(models
            .iter()
            .map(|model| ModelInfo::describe(&model.name))
            .collect())
    }
}

impl Default for OllamaManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Nothing listens on the discard port.
    const CLOSED_URL: &str = "http://127.0.0.1:9";

    #[test]
    fn ollama_manager_creation() {
        let manager = OllamaManager::new();
        assert_eq!(manager.base_url(), DEFAULT_OLLAMA_URL);
    }

    #[test]
    fn custom_url_drops_trailing_slash() {
        let manager = OllamaManager::new().with_url("http://custom:8080/");
        assert_eq!(manager.base_url(), "http://custom:8080");
    }

    #[tokio::test]
    async fn unreachable_server_is_unavailable() {
        let manager = OllamaManager::new().with_url(CLOSED_URL);
        assert!(!manager.is_available().await);
        assert!(matches!(
            manager.list_models().await,
            Err(LocalError::OllamaUnavailable(_))
        ));
    }
}
