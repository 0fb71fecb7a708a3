use std::sync::Arc;

use async_trait::async_trait;
use parley_core::{CODE_TAG, Catalog, Reply, ReplySource, Result, TextGenerator, Turn};

use super::super::strategy::ResponseStrategy;
use crate::analyzer::{ResponseSelector, looks_like_code};

const REVIEW_PROMPT: &str = "The user pasted the following source code. \
Explain briefly what it does and point out any obvious bugs.\n\n";

/// Diverts pasted source code away from intent matching.
///
/// Asks the generator for a short review when one is configured, otherwise
/// answers from the `code` bucket of the catalog.
pub struct CodeAnalysisStrategy {
    generator: Option<(Arc<dyn TextGenerator>, String)>,
    catalog: Arc<Catalog>,
    selector: Arc<ResponseSelector>,
}

impl CodeAnalysisStrategy {
    /// Creates the strategy with canned replies only.
    pub fn new(catalog: Arc<Catalog>, selector: Arc<ResponseSelector>) -> Self {
        Self {
            generator: None,
            catalog,
            selector,
        }
    }

    /// Routes detected code to `model_id` on `generator`.
    #[must_use]
    pub fn with_generator<T: Into<String>>(
        mut self,
        generator: Arc<dyn TextGenerator>,
        model_id: T,
    ) -> Self {
        self.generator = Some((generator, model_id.into()));
        self
    }

    fn canned(&self) -> Reply {
        let text = self.selector.select(CODE_TAG, &self.catalog);
        Reply::new(text, ReplySource::CodeAnalysis).with_tag(CODE_TAG)
    }
}

#[async_trait]
impl ResponseStrategy for CodeAnalysisStrategy {
    fn applies_to(&self, turn: &Turn) -> bool {
        looks_like_code(&turn.input)
    }

    async fn resolve(&self, turn: &Turn) -> Result<Reply> {
        let Some((generator, model_id)) = &self.generator else {
            return Ok(self.canned());
        };

        let prompt = format!("{REVIEW_PROMPT}{}", turn.input);
        match generator.generate(&prompt, model_id).await {
            Ok(text) if !text.trim().is_empty() => {
                Ok(Reply::new(text.trim(), ReplySource::CodeAnalysis).with_tag(CODE_TAG))
            }
            Ok(_) => Ok(self.canned()),
            Err(error) => {
                tracing::warn!("Code review via {model_id} failed: {error}");
                Ok(self.canned())
            }
        }
    }

    fn priority(&self) -> u8 {
        100
    }

    fn name(&self) -> &'static str {
        "CodeAnalysis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::Error;

    const SNIPPET: &str = "function foo() {\n  const x = 1;\n  if (x) {\n    return 1;\n  }\n}";

    struct EchoGenerator {
        fail: bool,
    }

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn is_available(&self) -> bool {
            !self.fail
        }

        async fn generate(&self, prompt: &str, _model_id: &str) -> Result<String> {
            if self.fail {
                Err(Error::Generation("offline".to_owned()))
            } else {
                Ok(format!("review of {} bytes", prompt.len()))
            }
        }
    }

    fn strategy() -> CodeAnalysisStrategy {
        CodeAnalysisStrategy::new(
            Arc::new(Catalog::default()),
            Arc::new(ResponseSelector::with_seed(9)),
        )
    }

    #[test]
    fn test_applies_only_to_code() {
        let strategy = strategy();
        assert!(strategy.applies_to(&Turn::new(SNIPPET)));
        assert!(!strategy.applies_to(&Turn::new("hello there")));
    }

    #[tokio::test]
    async fn test_canned_reply_without_generator() {
        let reply = strategy().resolve(&Turn::new(SNIPPET)).await.expect("reply");
        assert_eq!(reply.tag.as_deref(), Some(CODE_TAG));
        assert_eq!(reply.source, ReplySource::CodeAnalysis);
        assert!(Catalog::default().responses_for(CODE_TAG).contains(&reply.text));
    }

    #[tokio::test]
    async fn test_generated_review() {
        let strategy = strategy().with_generator(Arc::new(EchoGenerator { fail: false }), "codellama");
        let reply = strategy.resolve(&Turn::new(SNIPPET)).await.expect("reply");
        assert!(reply.text.starts_with("review of"));
    }

    #[tokio::test]
    async fn test_generator_failure_uses_canned_reply() {
        let strategy = strategy().with_generator(Arc::new(EchoGenerator { fail: true }), "codellama");
        let reply = strategy.resolve(&Turn::new(SNIPPET)).await.expect("reply");
        assert!(Catalog::default().responses_for(CODE_TAG).contains(&reply.text));
    }
}
