use regex::Regex;
use std::sync::LazyLock;

/// Input must have strictly more lines than this to count as code.
const MIN_LINES: usize = 3;
/// Number of structural probes that must match.
const MIN_PROBES: usize = 2;

/// Structural probes, each matched independently against the whole input.
static CODE_PROBES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        (
            "imports",
            r"(?m)^\s*(import\s|from\s+\S+\s+import\s|#include\s*[<\x22]|using\s+[\w.]+;|use\s+[\w:]+|package\s+[\w.]+)|\brequire\s*\(",
        ),
        (
            "keywords",
            r"\b(function|def|fn|func|class|struct|impl|return|lambda|const|let|var)\b|\b(if|for|while|switch|catch)\s*\(",
        ),
        ("brackets", r"\w\s*\([^()]*\)|\{[^{}]*\}|\[[^\[\]]*\]"),
        ("terminators", r"(?m)[;{}]\s*$"),
        ("indentation", r"(?m)^(\t| {2,})\S"),
    ]
    .into_iter()
    .map(|(name, pattern)| match Regex::new(pattern) {
        Ok(regex) => (name, regex),
        Err(err) => panic!("Code probe '{name}' is invalid: {err}"),
    })
    .collect()
});

/// Names of the probes that match `text`.
pub fn matching_probes(text: &str) -> Vec<&'static str> {
    CODE_PROBES
        .iter()
        .filter(|(_, regex)| regex.is_match(text))
        .map(|&(name, _)| name)
        .collect()
}

/// Cheap heuristic for pasted source code.
///
/// Positive when the text spans more than three lines and at least two
/// structural probes match. Not a parser: misclassifications are expected.
pub fn looks_like_code(text: &str) -> bool {
    let lines = text.split('\n').count();
    if lines <= MIN_LINES {
        return false;
    }

    let probes = matching_probes(text);
    tracing::debug!("Code probes matched over {lines} lines: {probes:?}");
    probes.len() >= MIN_PROBES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_javascript_function_is_code() {
        let snippet = "function foo() {\n  const x = 1;\n  if (x) {\n    return 1;\n  }\n}";
        assert!(looks_like_code(snippet));
    }

    #[test]
    fn test_single_line_greeting_is_not_code() {
        assert!(!looks_like_code("hello there"));
    }

    #[test]
    fn test_short_code_is_not_code() {
        // Three lines is not enough even when every probe fires.
        assert!(!looks_like_code("import os\nfor (i = 0; i < 3; i++) {\n  run(i);"));
    }

    #[test]
    fn test_multiline_prose_is_not_code() {
        let prose = "Dear team,\nthanks for the update\nI will review it tomorrow\nCheers";
        assert!(!looks_like_code(prose));
    }

    #[test]
    fn test_python_snippet_is_code() {
        let snippet = "import os\n\ndef main():\n    return os.getcwd()\n";
        assert!(looks_like_code(snippet));
        let probes = matching_probes(snippet);
        assert!(probes.contains(&"imports"));
        assert!(probes.contains(&"keywords"));
    }

    #[test]
    fn test_rust_snippet_is_code() {
        let snippet = "use std::fs;\n\nfn main() {\n    let data = fs::read(\"x\");\n}\n";
        assert!(looks_like_code(snippet));
    }
}
