use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::catalog::UNKNOWN_TAG;
use crate::defaults::LOADING_MESSAGE;

/// Best intent for a piece of input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Matched intent tag, `unknown` below the confidence threshold
    pub tag: String,
    /// Best similarity seen, in `[0, 1]`, even when the tag was overridden
    pub similarity: f64,
}

impl MatchResult {
    /// Creates a match result.
    pub fn new<T: Into<String>>(tag: T, similarity: f64) -> Self {
        Self {
            tag: tag.into(),
            similarity,
        }
    }

    /// The empty-input result: `unknown` with zero similarity.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_TAG, 0.0)
    }

    /// Whether the fallback intent was chosen.
    pub fn is_unknown(&self) -> bool {
        self.tag == UNKNOWN_TAG
    }
}

/// Which strategy produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplySource {
    /// External text-generation model
    Generation,
    /// Bag-of-words classifier
    Classifier,
    /// Lexical pattern matching
    PatternMatch,
    /// Source-code detection path
    CodeAnalysis,
    /// Placeholder while the classifier loads
    Loading,
}

impl Display for ReplySource {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        let label = match self {
            Self::Generation => "generation",
            Self::Classifier => "classifier",
            Self::PatternMatch => "pattern",
            Self::CodeAnalysis => "code",
            Self::Loading => "loading",
        };
        formatter.write_str(label)
    }
}

/// A response ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// Text shown to the user
    pub text: String,
    /// Intent the reply was chosen for, if any
    pub tag: Option<String>,
    /// Confidence of the resolution, in `[0, 1]`
    pub confidence: f64,
    /// Strategy that produced the reply
    pub source: ReplySource,
}

impl Reply {
    /// Creates a reply with no tag and full confidence.
    pub fn new<T: Into<String>>(text: T, source: ReplySource) -> Self {
        Self {
            text: text.into(),
            tag: None,
            confidence: 1.0,
            source,
        }
    }

    /// Attaches the resolved intent.
    #[must_use]
    pub fn with_tag<T: Into<String>>(mut self, tag: T) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Sets the confidence.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// The reply shown while the classifier is not yet loaded.
    pub fn loading() -> Self {
        Self::new(LOADING_MESSAGE, ReplySource::Loading).with_confidence(0.0)
    }
}

/// One submitted user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Monotonic turn number within the conversation
    pub sequence: u64,
    /// Raw user text
    pub input: String,
    /// Reply to the immediately preceding turn
    pub previous: Option<Reply>,
}

impl Turn {
    /// Creates a standalone turn with no history.
    pub fn new<T: Into<String>>(input: T) -> Self {
        Self {
            sequence: 0,
            input: input.into(),
            previous: None,
        }
    }

    /// Sets the sequence number.
    #[must_use]
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Attaches the previous turn's reply.
    #[must_use]
    pub fn with_previous(mut self, previous: Option<Reply>) -> Self {
        self.previous = previous;
        self
    }
}
