use std::sync::Arc;

use parley_core::defaults::FALLBACK_DIMENSION;
use parley_core::{UNKNOWN_TAG, Vocabulary};

use super::normalize::normalize;

/// Binary bag-of-words vector of `text` against `vocabulary`.
///
/// Each known token sets its index to 1; repeats do not accumulate. An empty
/// vocabulary yields a zero vector of [`FALLBACK_DIMENSION`] so consumers
/// always receive a well-formed shape.
pub fn vectorize(text: &str, vocabulary: &Vocabulary) -> Vec<f32> {
    if vocabulary.is_empty() {
        return vec![0.0; FALLBACK_DIMENSION];
    }

    let mut vector = vec![0.0; vocabulary.len()];
    for token in normalize(text) {
        if let Some(slot) = vocabulary
            .index_of(&token)
            .and_then(|position| vector.get_mut(position))
        {
            *slot = 1.0;
        }
    }
    vector
}

/// Label at the arg-max of `scores`.
///
/// Returns `unknown` when either side is empty, the lengths differ, or no
/// score is comparable.
pub fn label_from_scores(scores: &[f32], labels: &[String]) -> String {
    if scores.is_empty() || labels.is_empty() || scores.len() != labels.len() {
        return UNKNOWN_TAG.to_owned();
    }

    let mut best: Option<(usize, f32)> = None;
    for (position, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((position, score));
        }
    }

    best.and_then(|(position, _)| labels.get(position))
        .map_or_else(|| UNKNOWN_TAG.to_owned(), Clone::clone)
}

/// Vectorizer bound to one vocabulary.
#[derive(Debug, Clone)]
pub struct Vectorizer {
    vocabulary: Arc<Vocabulary>,
}

impl Vectorizer {
    /// Creates a vectorizer over a shared vocabulary.
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    /// The vocabulary in use.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Feature length produced by [`Self::vectorize`].
    pub fn dimension(&self) -> usize {
        if self.vocabulary.is_empty() {
            FALLBACK_DIMENSION
        } else {
            self.vocabulary.len()
        }
    }

    /// Vectorizes `text`.
    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        vectorize(text, &self.vocabulary)
    }

    /// Decodes classifier scores into a label.
    pub fn decode(&self, scores: &[f32]) -> String {
        label_from_scores(scores, self.vocabulary.labels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary(tokens: &[&str], labels: &[&str]) -> Vocabulary {
        Vocabulary::new(
            tokens.iter().map(|&token| token.to_owned()).collect(),
            labels.iter().map(|&label| label.to_owned()).collect(),
        )
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|&item| item.to_owned()).collect()
    }

    #[test]
    fn test_binary_presence() {
        let words = vocabulary(&["hello", "there", "bye"], &[]);
        let vector = vectorize("Hello hello HELLO there!", &words);
        assert_eq!(vector, [1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_length_and_values() {
        let words = Vocabulary::default();
        for text in ["", "hi", "thank you thank you", "what is the weather forecast"] {
            let vector = vectorize(text, &words);
            assert_eq!(vector.len(), words.len());
            let binary: Vec<f32> = vector.iter().map(|value| value.round().clamp(0.0, 1.0)).collect();
            assert_eq!(vector, binary);
        }
    }

    #[test]
    fn test_empty_vocabulary_fallback_shape() {
        let words = vocabulary(&[], &[]);
        let vector = vectorize("hello", &words);
        assert_eq!(vector.len(), FALLBACK_DIMENSION);
        assert_eq!(vector, vec![0.0f32; FALLBACK_DIMENSION]);
    }

    #[test]
    fn test_label_from_scores() {
        let names = labels(&["greeting", "goodbye", "unknown"]);
        assert_eq!(label_from_scores(&[0.1, 0.7, 0.2], &names), "goodbye");
        assert_eq!(label_from_scores(&[0.5, 0.5, 0.0], &names), "greeting");
        assert_eq!(label_from_scores(&[f32::NAN, 0.1, 0.3], &names), "unknown");
        assert_eq!(label_from_scores(&[f32::NAN, 0.4, 0.3], &names), "goodbye");
    }

    #[test]
    fn test_label_from_scores_degenerate_inputs() {
        let names = labels(&["greeting", "goodbye"]);
        assert_eq!(label_from_scores(&[], &names), UNKNOWN_TAG);
        assert_eq!(label_from_scores(&[0.9], &[]), UNKNOWN_TAG);
        assert_eq!(label_from_scores(&[0.1, 0.2, 0.9], &names), UNKNOWN_TAG);
        assert_eq!(label_from_scores(&[f32::NAN, f32::NAN], &names), UNKNOWN_TAG);
    }

    #[test]
    fn test_vectorizer_wrapper() {
        let vectorizer = Vectorizer::new(Arc::new(vocabulary(&["hi", "bye"], &["greeting", "goodbye"])));
        assert_eq!(vectorizer.dimension(), 2);
        assert_eq!(vectorizer.vectorize("bye now"), [0.0, 1.0]);
        assert_eq!(vectorizer.decode(&[0.8, 0.2]), "greeting");
    }
}
