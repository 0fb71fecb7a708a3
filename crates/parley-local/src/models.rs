use serde::{Deserialize, Serialize};

/// Known model families with their category and description.
const MODEL_FAMILIES: &[(&str, &str, &str)] = &[
    ("llama3", "General Purpose", "Good for general conversations and diverse tasks"),
    ("llama2", "General Purpose", "Balanced model for various tasks"),
    ("mistral", "General Purpose", "Efficient with good performance"),
    ("gemma", "General Purpose", "Lightweight yet capable model"),
    ("phi", "Small & Efficient", "Small but powerful model"),
    ("mixtral", "High Performance", "High quality responses for complex tasks"),
    ("falcon", "Balanced", "Good balance of size and performance"),
    ("codellama", "Code Specialist", "Specialized for programming tasks"),
    ("codegemma", "Code Specialist", "Optimized for code generation"),
    ("solar", "High Performance", "Strong reasoning capabilities"),
    ("nous-hermes", "Fine-tuned", "Instruction-tuned for helpfulness"),
    ("neural-chat", "Conversational", "Optimized for natural conversations"),
    ("stablelm", "Efficient", "Stable text generation"),
    ("yi", "High Performance", "Strong multilingual capabilities"),
];

/// Description of an installed model for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier used in Ollama.
    pub name: String,
    /// Recognised model family, if any.
    pub family: Option<String>,
    /// Parameter size tag (e.g., "8B"), empty when unknown.
    pub size: String,
    /// Broad use-case category.
    pub category: String,
    /// One-line description.
    pub description: String,
}

impl ModelInfo {
    /// Derives family, size and category from a model name such as `llama3:8b`.
    ///
    /// The longest matching family name wins, so `codegemma` is not mistaken
    /// for `gemma`.
    pub fn describe(name: &str) -> Self {
        let lower = name.to_lowercase();
        let family = MODEL_FAMILIES
            .iter()
            .filter(|(family, _, _)| lower.contains(family))
            .max_by_key(|(family, _, _)| family.len());

        let (category, description) =
            family.map_or(("Other", "Specialized model"), |entry| (entry.1, entry.2));

        Self {
            name: name.to_owned(),
            family: family.map(|entry| entry.0.to_owned()),
            size: size_tag(&lower),
            category: category.to_owned(),
            description: description.to_owned(),
        }
    }
}

/// Size suffix after `:` or the last `-`, when it names a parameter count.
fn size_tag(lower: &str) -> String {
    lower
        .split_once(':')
        .or_else(|| lower.rsplit_once('-'))
        .map(|(_, tag)| tag)
        .filter(|tag| tag.contains('b'))
        .map(str::to_uppercase)
        .unwrap_or_default()
}

/// Ollama API response for model list
#[derive(Debug, Deserialize)]
pub struct OllamaListResponse {
    /// List of models installed in Ollama.
    #[serde(default)]
    pub models: Vec<OllamaModel>,
}

/// Information about an Ollama model returned from the API.
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaModel {
    /// Model identifier.
    pub name: String,
    /// Size of the model in bytes.
    #[serde(default)]
    pub size: u64,
    /// Timestamp of last modification.
    #[serde(default)]
    pub modified_at: String,
}

/// Sampling options for a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerateOptions {
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling cutoff.
    pub top_p: f32,
    /// Maximum tokens to generate.
    pub num_predict: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            num_predict: 200,
        }
    }
}

/// Ollama API request for generation
#[derive(Debug, Serialize)]
pub struct OllamaGenerateRequest {
    /// Model to use for generation.
    pub model: String,
    /// Input prompt for the model.
    pub prompt: String,
    /// Optional system prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Whether to stream the response.
    pub stream: bool,
    /// Sampling options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerateOptions>,
}

/// Ollama API response for generation
#[derive(Debug, Deserialize)]
pub struct OllamaGenerateResponse {
    /// Model that generated the response.
    #[serde(default)]
    pub model: String,
    /// Generated text content.
    pub response: String,
    /// Whether generation is complete.
    #[serde(default)]
    pub done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn test_describe_known_family() {
        let info = ModelInfo::describe("llama3:8b");
        assert_eq!(info.family.as_deref(), Some("llama3"));
        assert_eq!(info.size, "8B");
        assert_eq!(info.category, "General Purpose");
    }

    #[test]
    fn test_describe_prefers_longest_family() {
        let info = ModelInfo::describe("codegemma:7b");
        assert_eq!(info.family.as_deref(), Some("codegemma"));
        assert_eq!(info.category, "Code Specialist");
    }

    #[test]
    fn test_describe_dash_size() {
        let info = ModelInfo::describe("neural-chat-7b");
        assert_eq!(info.family.as_deref(), Some("neural-chat"));
        assert_eq!(info.size, "7B");
    }

    #[test]
    fn test_describe_unknown_model() {
        let info = ModelInfo::describe("qwen2.5:latest");
        assert!(info.family.is_none());
        assert!(info.size.is_empty());
        assert_eq!(info.category, "Other");
        assert_eq!(info.description, "Specialized model");
    }

    #[test]
    fn test_request_serialization() {
        let request = OllamaGenerateRequest {
            model: "llama3".to_owned(),
            prompt: "hi".to_owned(),
            system: None,
            stream: false,
            options: Some(GenerateOptions::default()),
        };
        let value = to_value(&request).expect("serialize");
        assert!(value.get("system").is_none());
        assert_eq!(value["options"]["num_predict"], json!(200));
        assert_eq!(value["stream"], json!(false));
    }

    #[test]
    fn test_list_response_tolerates_missing_fields() {
        let list: OllamaListResponse =
            serde_json::from_str(r#"{"models":[{"name":"phi3:mini"}]}"#).expect("parse");
        assert_eq!(list.models.len(), 1);
        assert_eq!(list.models[0].size, 0);
    }
}
