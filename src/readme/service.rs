//! README Service
//!
//! Orchestrates one request: validate → (fetch) → prompt → generate →
//! normalize. Stateless; every call depends only on its arguments, so the
//! service can be shared across concurrent requests via `Arc`.

use tracing::{debug, info, warn};

use super::{GenerateRequest, RefineRequest, RepositoryRequest};
use crate::ai::normalize;
use crate::ai::prompt::PromptTemplates;
use crate::ai::provider::SharedProvider;
use crate::github::{SharedSource, parse_repository_url};
use crate::types::{
    ErrorCategory, GeneratedDocument, LlmError, ManualProjectFacts, Result, require,
};

/// Result of a refine call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefineOutcome {
    pub document: GeneratedDocument,
    /// `false` when the model handed the document back untouched
    pub changed: bool,
}

pub struct ReadmeService {
    provider: SharedProvider,
    source: SharedSource,
}

impl ReadmeService {
    pub fn new(provider: SharedProvider, source: SharedSource) -> Self {
        Self { provider, source }
    }

    /// Generate a README from hand-entered project facts
    pub async fn generate_from_facts(&self, facts: &ManualProjectFacts) -> Result<GeneratedDocument> {
        info!(project = facts.name(), "Generating README from project facts");
        self.complete(&PromptTemplates::manual(facts)).await
    }

    /// Generate a README from a live repository's metadata
    pub async fn generate_from_repository(&self, url: &str) -> Result<GeneratedDocument> {
        let (owner, repo) = parse_repository_url(url)?;
        info!(%owner, %repo, "Generating README from repository");

        let description = self.source.fetch(&owner, &repo).await?;
        self.complete(&PromptTemplates::repository(&description)).await
    }

    /// Rewrite the whole document according to a free-form instruction.
    /// Only the current document and this instruction reach the model.
    pub async fn refine(&self, document: &str, instruction: &str) -> Result<RefineOutcome> {
        let document = require("document", Some(document.to_string()))?;
        let instruction = require("instruction", Some(instruction.to_string()))?;

        let updated = self
            .complete(&PromptTemplates::refine(&document, &instruction))
            .await?;
        let changed = updated.as_str() != document.trim();

        info!(
            instruction_len = instruction.len(),
            before_len = document.len(),
            after_len = updated.len(),
            changed,
            "Refined README"
        );
        if !changed {
            warn!("Model returned the document unchanged");
        }

        Ok(RefineOutcome {
            document: updated,
            changed,
        })
    }

    // =========================================================================
    // Wire-level entry points (validate optional fields first)
    // =========================================================================

    pub async fn handle_generate(&self, request: GenerateRequest) -> Result<GeneratedDocument> {
        let facts = request.into_facts()?;
        self.generate_from_facts(&facts).await
    }

    pub async fn handle_repository(&self, request: RepositoryRequest) -> Result<GeneratedDocument> {
        let url = require("repositoryUrl", request.repository_url)?;
        self.generate_from_repository(&url).await
    }

    pub async fn handle_refine(&self, request: RefineRequest) -> Result<RefineOutcome> {
        let document = require("document", request.document)?;
        let instruction = require("instruction", request.instruction)?;
        self.refine(&document, &instruction).await
    }

    /// Send a prompt and normalize the reply
    async fn complete(&self, prompt: &str) -> Result<GeneratedDocument> {
        debug!(
            provider = self.provider.name(),
            model = self.provider.model(),
            prompt_len = prompt.len(),
            "Requesting generation"
        );

        let response = self.provider.generate(prompt).await?;
        let document = GeneratedDocument::new(normalize(&response.content));

        if document.is_empty() {
            return Err(LlmError::with_provider(
                ErrorCategory::EmptyResponse,
                "Model returned an empty document",
                self.provider.name(),
            )
            .into());
        }

        debug!(
            tokens = response.usage.total(),
            elapsed_ms = response.timing.total_ms,
            "Generation complete"
        );

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readme::testing::{RecordingProvider, StaticSource};
    use crate::types::{ErrorKind, ReadmeError};
    use std::sync::Arc;

    fn service(provider: &Arc<RecordingProvider>, source: &Arc<StaticSource>) -> ReadmeService {
        ReadmeService::new(provider.clone(), source.clone())
    }

    #[tokio::test]
    async fn test_generate_from_facts_normalizes() {
        let provider = Arc::new(RecordingProvider::replying("```markdown\n# widget\n```"));
        let source = Arc::new(StaticSource::widget());

        let facts = ManualProjectFacts::new("widget", "A widget", "fast", "Rust").unwrap();
        let doc = service(&provider, &source)
            .generate_from_facts(&facts)
            .await
            .unwrap();

        assert_eq!(doc.as_str(), "# widget");
        assert_eq!(provider.calls(), 1);
        assert!(provider.last_prompt().unwrap().contains("A widget"));
    }

    #[tokio::test]
    async fn test_missing_field_never_reaches_provider() {
        let provider = Arc::new(RecordingProvider::replying("# x"));
        let source = Arc::new(StaticSource::widget());

        let err = service(&provider, &source)
            .handle_generate(GenerateRequest {
                name: Some("widget".into()),
                description: Some("d".into()),
                features: Some("  ".into()),
                tech_stack: Some("Rust".into()),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_repository_flow() {
        let provider = Arc::new(RecordingProvider::replying("# widget\n\nOverview"));
        let source = Arc::new(StaticSource::widget());

        let doc = service(&provider, &source)
            .generate_from_repository("https://github.com/acme/widget/")
            .await
            .unwrap();

        assert_eq!(doc.as_str(), "# widget\n\nOverview");
        assert_eq!(
            source.fetches.lock().unwrap().as_slice(),
            &[("acme".to_string(), "widget".to_string())]
        );
        assert!(provider.last_prompt().unwrap().contains("- Stars: 42"));
    }

    #[tokio::test]
    async fn test_invalid_url_skips_fetch_and_generation() {
        let provider = Arc::new(RecordingProvider::replying("# x"));
        let source = Arc::new(StaticSource::widget());

        let err = service(&provider, &source)
            .generate_from_repository("not-a-url")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidUrl);
        assert_eq!(source.fetch_count(), 0);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_not_found_produces_no_document() {
        let provider = Arc::new(RecordingProvider::replying("# x"));
        let source = Arc::new(StaticSource::widget());

        let err = service(&provider, &source)
            .generate_from_repository("https://github.com/acme/missing")
            .await
            .unwrap_err();

        assert!(matches!(err, ReadmeError::NotFound { .. }));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_repository_url() {
        let provider = Arc::new(RecordingProvider::replying("# x"));
        let source = Arc::new(StaticSource::widget());

        let err = service(&provider, &source)
            .handle_repository(RepositoryRequest {
                repository_url: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("repositoryUrl"));
    }

    #[tokio::test]
    async fn test_refine_embeds_document_and_instruction() {
        let provider = Arc::new(RecordingProvider::replying(
            "```markdown\n# X\n\n## Features\n- foo\n```",
        ));
        let source = Arc::new(StaticSource::widget());

        let outcome = service(&provider, &source)
            .refine("# X\n\n## Features\nfoo", "add bullets to features")
            .await
            .unwrap();

        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.contains("# X\n\n## Features\nfoo"));
        assert!(prompt.contains("add bullets to features"));
        assert_eq!(outcome.document.as_str(), "# X\n\n## Features\n- foo");
        assert!(outcome.changed);
    }

    #[tokio::test]
    async fn test_refine_unchanged_is_not_an_error() {
        let provider = Arc::new(RecordingProvider::replying("# X\n\nBody"));
        let source = Arc::new(StaticSource::widget());

        let outcome = service(&provider, &source)
            .refine("# X\n\nBody\n", "make it better")
            .await
            .unwrap();

        assert!(!outcome.changed);
    }

    #[tokio::test]
    async fn test_refine_requires_both_fields() {
        let provider = Arc::new(RecordingProvider::replying("# x"));
        let source = Arc::new(StaticSource::widget());
        let svc = service(&provider, &source);

        let err = svc.refine("# X", "   ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = svc
            .handle_refine(RefineRequest {
                document: None,
                instruction: Some("shorter".into()),
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("document"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_generation_failure_propagates() {
        let provider = Arc::new(RecordingProvider::failing("service down"));
        let source = Arc::new(StaticSource::widget());

        let err = service(&provider, &source)
            .refine("# X", "shorter")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Generation);
        assert!(err.to_string().contains("service down"));
    }

    #[tokio::test]
    async fn test_empty_reply_is_generation_error() {
        let provider = Arc::new(RecordingProvider::replying("```markdown\n\n```"));
        let source = Arc::new(StaticSource::widget());

        let facts = ManualProjectFacts::new("w", "d", "f", "t").unwrap();
        let err = service(&provider, &source)
            .generate_from_facts(&facts)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Generation);
    }
}
