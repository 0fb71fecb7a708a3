use core::time::Duration;

use async_trait::async_trait;
use parley_core::TextGenerator;
use reqwest::Client;

use crate::models::{GenerateOptions, OllamaGenerateRequest, OllamaGenerateResponse};
use crate::{DEFAULT_OLLAMA_URL, LocalError, OllamaManager, Result};

/// Instructions sent with every chat reply request.
const SYSTEM_PROMPT: &str = "You are a helpful and friendly AI assistant in a chatbot application. \
Provide a helpful, concise, and conversational response to the user's message. \
Keep your responses natural, friendly, and to the point. \
If you don't know something, be honest about it.";

/// Preambles that models sometimes put before the actual reply.
const REPLY_PREFIXES: [&str; 5] = [
    "I'll respond to that:",
    "Here's my response:",
    "My response:",
    "Response:",
    "Assistant:",
];

/// Labels understood by [`OllamaGenerator::classify_intent`], checked in order.
pub const INTENT_LABELS: [&str; 10] = [
    "greeting",
    "farewell",
    "help",
    "information",
    "weather",
    "time",
    "date",
    "joke",
    "question",
    "compliment",
];

/// Label used when the model's answer names none of [`INTENT_LABELS`].
pub const OTHER_LABEL: &str = "other";

/// Text generation backed by a local Ollama server
pub struct OllamaGenerator {
    client: Client,
    base_url: String,
    manager: OllamaManager,
    options: GenerateOptions,
}

impl OllamaGenerator {
    /// Creates a generator for `base_url` with a per-request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new<T: Into<String>>(base_url: T, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        let client = Client::builder().timeout(timeout).build()?;
        let manager = OllamaManager::new()
            .with_url(base_url.clone())
            .with_client(client.clone());

        Ok(Self {
            client,
            base_url,
            manager,
            options: GenerateOptions::default(),
        })
    }

    /// Creates a generator for the default local server.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn local(timeout: Duration) -> Result<Self> {
        Self::new(DEFAULT_OLLAMA_URL, timeout)
    }

    /// The server manager sharing this generator's client.
    pub fn manager(&self) -> &OllamaManager {
        &self.manager
    }

    /// Asks `model` to label `text` with one of [`INTENT_LABELS`].
    ///
    /// # Errors
    /// Returns an error if the server cannot be reached or answers with an error.
    pub async fn classify_intent(&self, text: &str, model: &str) -> Result<String> {
        let labels = INTENT_LABELS.join(", ");
        let prompt = format!(
            "You are an intent classifier. Your task is to classify the following text into \
             exactly one of these intents: {labels}, {OTHER_LABEL}.\n\n\
             Text: \"{text}\"\n\n\
             You must respond with ONLY the intent label and nothing else. For example, if the \
             text is a greeting, respond with just the word \"greeting\".\n\n\
             Intent:"
        );

        let request = OllamaGenerateRequest {
            model: model.to_owned(),
            prompt,
            system: None,
            stream: false,
            options: None,
        };
        let response = self.send(&request).await?;
        let label = parse_intent_label(&response.response);
        tracing::debug!("Classified {text:?} as {label}");
        Ok(label.to_owned())
    }

    async fn send(&self, request: &OllamaGenerateRequest) -> Result<OllamaGenerateResponse> {
        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|err| LocalError::OllamaUnavailable(err.to_string()))?;

        if !response.status().is_success() {
            return Err(LocalError::InferenceFailed(format!(
                "{} returned {}",
                request.model,
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    fn name(&self) -> &'static str {
        "Ollama"
    }

    async fn is_available(&self) -> bool {
        self.manager.is_available().await
    }

    async fn generate(&self, prompt: &str, model_id: &str) -> parley_core::Result<String> {
        let request = OllamaGenerateRequest {
            model: model_id.to_owned(),
            prompt: format!("User's message: \"{prompt}\"\n\nYour response:"),
            system: Some(SYSTEM_PROMPT.to_owned()),
            stream: false,
            options: Some(self.options),
        };

        let response = self.send(&request).await?;
        Ok(clean_reply(&response.response))
    }
}

/// Trims the reply and removes known preambles.
pub fn clean_reply(raw: &str) -> String {
    let mut reply = raw.trim();
    for prefix in REPLY_PREFIXES {
        if let Some(rest) = reply.strip_prefix(prefix) {
            reply = rest.trim_start();
        }
    }
    reply.to_owned()
}

/// First label contained in the model's answer, or [`OTHER_LABEL`].
pub fn parse_intent_label(answer: &str) -> &'static str {
    let answer = answer.trim().to_lowercase();
    INTENT_LABELS
        .iter()
        .find(|label| answer.contains(*label))
        .copied()
        .unwrap_or(OTHER_LABEL)
}
