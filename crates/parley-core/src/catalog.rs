//! Intent catalog with a guaranteed fallback bucket.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::defaults::{default_intents, unknown_intent};
use crate::{Error, Result};

/// Tag of the fallback intent.
pub const UNKNOWN_TAG: &str = "unknown";
/// Tag of the bucket used for replies to pasted source code.
pub const CODE_TAG: &str = "code";

/// A named category of user request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Unique key of the intent
    pub tag: String,
    /// Example phrasings matched against user input
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Candidate replies, one picked at random
    #[serde(default)]
    pub responses: Vec<String>,
}

impl Intent {
    /// Creates an intent with no patterns and no responses.
    pub fn new<T: Into<String>>(tag: T) -> Self {
        Self {
            tag: tag.into(),
            patterns: Vec::new(),
            responses: Vec::new(),
        }
    }

    /// Sets the example patterns.
    #[must_use]
    pub fn with_patterns(mut self, patterns: Vec<String>) -> Self {
        self.patterns = patterns;
        self
    }

    /// Sets the candidate responses.
    #[must_use]
    pub fn with_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }
}

/// On-disk catalog layout: either `{"intents": [...]}` or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped { intents: Vec<Intent> },
    Bare(Vec<Intent>),
}

/// Immutable set of intents, iterated in load order.
#[derive(Debug, Clone)]
pub struct Catalog {
    intents: Vec<Intent>,
    index: HashMap<String, usize>,
    fallback: usize,
}

impl Catalog {
    /// Builds a catalog, synthesizing the fallback intent when absent.
    ///
    /// Duplicate tags keep their first occurrence.
    ///
    /// # Errors
    /// Returns [`Error::EmptyFallback`] if the supplied fallback intent has no
    /// responses.
    pub fn new(intents: Vec<Intent>) -> Result<Self> {
        let catalog = Self::assemble(intents);
        if catalog.fallback().responses.is_empty() {
            return Err(Error::EmptyFallback(UNKNOWN_TAG.to_owned()));
        }
        Ok(catalog)
    }

    fn assemble(intents: Vec<Intent>) -> Self {
        let mut kept = Vec::with_capacity(intents.len() + 1);
        let mut index = HashMap::with_capacity(intents.len() + 1);

        for intent in intents {
            if index.contains_key(&intent.tag) {
                tracing::warn!("Ignoring duplicate intent tag '{}'", intent.tag);
                continue;
            }
            index.insert(intent.tag.clone(), kept.len());
            kept.push(intent);
        }

        let fallback = index.get(UNKNOWN_TAG).copied().unwrap_or_else(|| {
            kept.push(unknown_intent());
            kept.len() - 1
        });
        index.entry(UNKNOWN_TAG.to_owned()).or_insert(fallback);

        Self {
            intents: kept,
            index,
            fallback,
        }
    }

    /// Parses a catalog from JSON text.
    ///
    /// # Errors
    /// Returns [`Error::CatalogLoad`] if the text is not a valid catalog.
    pub fn from_json(text: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(text)
            .map_err(|error| Error::CatalogLoad(format!("invalid catalog JSON: {error}")))?;
        let intents = match file {
            CatalogFile::Wrapped { intents } | CatalogFile::Bare(intents) => intents,
        };
        Self::new(intents).map_err(|error| Error::CatalogLoad(error.to_string()))
    }

    /// Loads a catalog from a JSON file.
    ///
    /// # Errors
    /// Returns [`Error::CatalogLoad`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|error| {
            Error::CatalogLoad(format!("failed to read {}: {error}", path.display()))
        })?;
        Self::from_json(&contents)
    }

    /// Loads a catalog, substituting the built-in one on any failure.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No catalog path configured, using built-in intents");
            return Self::default();
        };
        Self::load(path)
            .inspect(|catalog| {
                tracing::info!("Loaded {} intents from {}", catalog.len(), path.display());
            })
            .unwrap_or_else(|error| {
                tracing::warn!("{error}; using built-in intents");
                Self::default()
            })
    }

    /// All intents in load order.
    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// Looks up an intent by tag.
    pub fn get(&self, tag: &str) -> Option<&Intent> {
        self.index.get(tag).and_then(|&position| self.intents.get(position))
    }

    /// Whether an intent with this tag exists.
    pub fn contains(&self, tag: &str) -> bool {
        self.index.contains_key(tag)
    }

    /// The fallback intent. Always present.
    pub fn fallback(&self) -> &Intent {
        &self.intents[self.fallback]
    }

    /// Responses for `tag`, or the fallback responses when the tag is absent
    /// or has an empty bucket.
    pub fn responses_for(&self, tag: &str) -> &[String] {
        match self.get(tag) {
            Some(intent) if !intent.responses.is_empty() => &intent.responses,
            _ => &self.fallback().responses,
        }
    }

    /// Whether any intent has at least one pattern.
    pub fn has_patterns(&self) -> bool {
        self.intents.iter().any(|intent| !intent.patterns.is_empty())
    }

    /// Number of intents, including the fallback.
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// Always false: the fallback intent is always present.
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::assemble(default_intents())
    }
}
