use std::collections::HashSet;

use super::normalize::normalize;

/// Weight of the symmetric set-overlap term.
pub const JACCARD_WEIGHT: f64 = 0.4;
/// Weight of the pattern-coverage term.
pub const COVERAGE_WEIGHT: f64 = 0.6;

/// Scores how well `input` matches `pattern`, in `[0, 1]`.
///
/// Blends a Jaccard-style overlap with the share of the pattern's tokens
/// present in the input. The coverage term is relative to the pattern, so
/// the score is not symmetric: extra words in the input cost less than
/// missing pattern words.
pub fn similarity(input: &str, pattern: &str) -> f64 {
    let input_tokens = normalize(input);
    let pattern_tokens = normalize(pattern);

    if input_tokens.is_empty() || pattern_tokens.is_empty() {
        return 0.0;
    }

    if input.trim().to_lowercase() == pattern.trim().to_lowercase() {
        return 1.0;
    }

    let input_set: HashSet<&str> = input_tokens.iter().map(String::as_str).collect();
    let pattern_set: HashSet<&str> = pattern_tokens.iter().map(String::as_str).collect();

    // Duplicates in the input each count.
    let match_count = input_tokens
        .iter()
        .filter(|token| pattern_set.contains(token.as_str()))
        .count();
    let union = input_set.union(&pattern_set).count();
    let jaccard = match_count as f64 / union as f64;

    let covered = pattern_tokens
        .iter()
        .filter(|token| input_set.contains(token.as_str()))
        .count();
    let coverage = covered as f64 / pattern_tokens.len() as f64;

    JACCARD_WEIGHT
        .mul_add(jaccard, COVERAGE_WEIGHT * coverage)
        .clamp(0.0, 1.0)
}
