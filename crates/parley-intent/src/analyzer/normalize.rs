/// Lowercases `text`, strips punctuation and splits it into tokens.
///
/// Word characters, whitespace and apostrophes survive, so contractions such
/// as `don't` stay a single token.
pub fn normalize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|&character| is_kept(character))
        .collect();

    cleaned
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

fn is_kept(character: char) -> bool {
    character.is_alphanumeric() || character == '_' || character == '\'' || character.is_whitespace()
}
