//! Built-in catalog and vocabulary used when the external artifacts are
//! missing or unreadable.

use crate::catalog::{CODE_TAG, Intent, UNKNOWN_TAG};

/// Vocabulary the bundled classifier was trained against.
pub const DEFAULT_VOCABULARY: [&str; 46] = [
    "hello", "hi", "hey", "greetings", "morning", "afternoon", "evening",
    "goodbye", "bye", "see", "later", "talk", "soon",
    "thanks", "thank", "you", "appreciate", "grateful",
    "help", "support", "problem", "issue", "question", "assist",
    "weather", "temperature", "forecast", "rain", "sunny", "cloudy",
    "name", "who", "are", "what", "your", "called",
    "joke", "funny", "laugh", "humor", "tell",
    "how", "going", "doing", "feel", "feeling",
];

/// Output labels of the bundled classifier, index-aligned with its scores.
pub const DEFAULT_LABELS: [&str; 9] = [
    "greeting",
    "goodbye",
    "thanks",
    "help",
    "weather",
    "name",
    "joke",
    "how_are_you",
    UNKNOWN_TAG,
];

/// Length of the zero vector produced when no vocabulary is available.
pub const FALLBACK_DIMENSION: usize = DEFAULT_VOCABULARY.len();

/// Responses for the fallback intent.
pub const UNKNOWN_RESPONSES: [&str; 4] = [
    "I'm not sure I understand. Could you rephrase that?",
    "I didn't quite catch that. Can you try again?",
    "I'm still learning! Could you say that differently?",
    "I'm not sure how to respond to that. Can you try asking something else?",
];

/// Reply shown while the classifier model is still loading.
pub const LOADING_MESSAGE: &str = "I'm still loading my language model. Please try again in a moment.";

/// (tag, patterns, responses) for every built-in intent.
const DEFAULT_INTENTS: &[(&str, &[&str], &[&str])] = &[
    (
        "greeting",
        &["hello", "hi", "hey", "greetings", "good morning", "good afternoon", "good evening"],
        &[
            "Hello! How can I help you today?",
            "Hi there! What can I do for you?",
            "Greetings! How may I assist you?",
            "Hello! It's nice to see you!",
        ],
    ),
    (
        "goodbye",
        &["bye", "goodbye", "see you later", "talk to you soon", "i have to go"],
        &[
            "Goodbye! Have a great day!",
            "See you later! Take care!",
            "Bye for now! Feel free to chat again anytime.",
            "Farewell! It was nice chatting with you.",
        ],
    ),
    (
        "thanks",
        &["thanks", "thank you", "i appreciate it", "that's helpful", "i'm grateful"],
        &[
            "You're welcome! Is there anything else I can help with?",
            "Happy to help! Let me know if you need anything else.",
            "Anytime! Don't hesitate if you have more questions.",
            "Glad I could assist! Anything else you'd like to know?",
        ],
    ),
    (
        "help",
        &["help", "i need help", "can you help me", "i have a problem", "support", "i have a question"],
        &[
            "I'm here to help! What do you need assistance with?",
            "I'd be happy to help. Could you tell me more about what you need?",
            "How can I assist you today? Please provide some details.",
            "I'm at your service! What kind of help are you looking for?",
        ],
    ),
    (
        "weather",
        &["weather", "what's the weather like", "is it going to rain", "temperature today", "forecast"],
        &[
            "I don't have access to real-time weather data. You might want to check a weather service for that information.",
            "I can't check the weather for you, but a quick online search should give you that information.",
            "Unfortunately, I don't have weather capabilities at the moment.",
            "I'm not connected to weather services, but I'd be happy to help with something else!",
        ],
    ),
    (
        "name",
        &["what is your name", "what's your name", "who are you", "what are you called"],
        &[
            "I'm Parley, your friendly assistant!",
            "My name is Parley. What can I call you?",
            "I go by Parley. What's your name?",
            "I'm Parley, built to make conversations more engaging!",
        ],
    ),
    (
        "joke",
        &["tell me a joke", "joke", "make me laugh", "say something funny"],
        &[
            "Why don't scientists trust atoms? Because they make up everything!",
            "Why did the scarecrow win an award? Because he was outstanding in his field!",
            "What did one wall say to the other wall? I'll meet you at the corner!",
            "How does a penguin build its house? Igloos it together!",
        ],
    ),
    (
        "how_are_you",
        &["how are you", "how are you doing", "how is it going", "how do you feel"],
        &[
            "I'm doing well, thanks for asking! How about you?",
            "I'm great! How are you feeling today?",
            "All systems operational! How's your day going?",
            "I'm good! Thanks for checking in. How are you?",
        ],
    ),
    (
        CODE_TAG,
        &[],
        &[
            "That looks like source code. I can't run it, but connect a local model and I'll walk through it with you.",
            "I spotted some code there. Describe what it should do and I'll try to help.",
        ],
    ),
];

/// Builds the built-in intents, ending with the fallback bucket.
pub fn default_intents() -> Vec<Intent> {
    let mut intents: Vec<Intent> = DEFAULT_INTENTS
        .iter()
        .map(|&(tag, patterns, responses)| {
            Intent::new(tag)
                .with_patterns(patterns.iter().map(|&pattern| pattern.to_owned()).collect())
                .with_responses(responses.iter().map(|&response| response.to_owned()).collect())
        })
        .collect();
    intents.push(unknown_intent());
    intents
}

/// The fallback intent with its built-in responses and no patterns.
pub fn unknown_intent() -> Intent {
    Intent::new(UNKNOWN_TAG).with_responses(
        UNKNOWN_RESPONSES
            .iter()
            .map(|&response| response.to_owned())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_vocabulary_is_unique() {
        let unique: HashSet<&str> = DEFAULT_VOCABULARY.iter().copied().collect();
        assert_eq!(unique.len(), DEFAULT_VOCABULARY.len());
        assert_eq!(FALLBACK_DIMENSION, 46);
    }

    #[test]
    fn test_default_intents_cover_required_tags() {
        let intents = default_intents();
        for tag in ["greeting", "goodbye", "thanks", "help", UNKNOWN_TAG] {
            assert!(
                intents.iter().any(|intent| intent.tag == tag),
                "missing built-in intent {tag}"
            );
        }
        assert!(intents.iter().all(|intent| !intent.responses.is_empty()));
    }

    #[test]
    fn test_labels_are_catalog_tags() {
        let intents = default_intents();
        for label in DEFAULT_LABELS {
            assert!(intents.iter().any(|intent| intent.tag == label));
        }
    }
}
