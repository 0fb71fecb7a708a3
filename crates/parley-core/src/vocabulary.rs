//! Ordered word list and classifier labels.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_LABELS, DEFAULT_VOCABULARY};
use crate::{Error, Result};

/// On-disk vocabulary artifact.
#[derive(Debug, Serialize, Deserialize)]
struct VocabularyFile {
    vocabulary: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    input_shape: Option<usize>,
}

/// Known tokens in feature order, plus the classifier's output labels.
///
/// Token `i` always owns feature index `i`.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    tokens: Vec<String>,
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Builds a vocabulary. Repeated tokens keep their first position.
    pub fn new(tokens: Vec<String>, labels: Vec<String>) -> Self {
        let mut kept = Vec::with_capacity(tokens.len());
        let mut index = HashMap::with_capacity(tokens.len());
        for token in tokens {
            if index.contains_key(&token) {
                continue;
            }
            index.insert(token.clone(), kept.len());
            kept.push(token);
        }
        Self {
            tokens: kept,
            labels,
            index,
        }
    }

    /// Parses the `{vocabulary, tags}` JSON artifact.
    ///
    /// # Errors
    /// Returns [`Error::VocabularyLoad`] if the text is not a valid artifact.
    pub fn from_json(text: &str) -> Result<Self> {
        let file: VocabularyFile = serde_json::from_str(text)
            .map_err(|error| Error::VocabularyLoad(format!("invalid vocabulary JSON: {error}")))?;
        let vocabulary = Self::new(file.vocabulary, file.tags);
        if let Some(shape) = file.input_shape
            && shape != vocabulary.len()
        {
            tracing::warn!(
                "Vocabulary declares input_shape {shape} but has {} distinct tokens",
                vocabulary.len()
            );
        }
        Ok(vocabulary)
    }

    /// Loads the artifact from a JSON file.
    ///
    /// # Errors
    /// Returns [`Error::VocabularyLoad`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|error| {
            Error::VocabularyLoad(format!("failed to read {}: {error}", path.display()))
        })?;
        Self::from_json(&contents)
    }

    /// Loads the artifact, substituting the built-in vocabulary on failure.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        Self::load(path).unwrap_or_else(|error| {
            tracing::warn!("{error}; using built-in vocabulary");
            Self::default()
        })
    }

    /// Tokens in feature order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Classifier labels in output order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Feature index of `token`.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(
            DEFAULT_VOCABULARY.iter().map(|&word| word.to_owned()).collect(),
            DEFAULT_LABELS.iter().map(|&label| label.to_owned()).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_keep_first_index() {
        let vocabulary = Vocabulary::new(
            vec!["hello".to_owned(), "bye".to_owned(), "hello".to_owned()],
            Vec::new(),
        );
        assert_eq!(vocabulary.len(), 2);
        assert_eq!(vocabulary.index_of("hello"), Some(0));
        assert_eq!(vocabulary.index_of("bye"), Some(1));
        assert_eq!(vocabulary.index_of("nope"), None);
    }

    #[test]
    fn test_from_json() {
        let text = r#"{"vocabulary": ["hi", "bye"], "tags": ["greeting", "goodbye"], "input_shape": 2}"#;
        let vocabulary = Vocabulary::from_json(text).expect("vocabulary should parse");
        assert_eq!(vocabulary.tokens(), ["hi".to_owned(), "bye".to_owned()].as_slice());
        assert_eq!(vocabulary.labels().len(), 2);
    }

    #[test]
    fn test_from_json_invalid() {
        let result = Vocabulary::from_json(r#"{"tags": []}"#);
        assert!(matches!(result, Err(Error::VocabularyLoad(_))));
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let vocabulary = Vocabulary::load_or_default(Some(Path::new("/no/such/vocabulary.json")));
        assert_eq!(vocabulary.len(), DEFAULT_VOCABULARY.len());
        assert_eq!(vocabulary.labels().len(), DEFAULT_LABELS.len());
    }
}
