//! README Generation
//!
//! The three stateless operations (generate from facts, generate from a
//! repository, refine), their wire request/response shapes, and the
//! [`DocumentSession`] that holds the current document for interactive use.

mod service;
mod session;

pub use service::{ReadmeService, RefineOutcome};
pub use session::DocumentSession;

use serde::{Deserialize, Serialize};

use crate::types::{GeneratedDocument, ManualProjectFacts, ValidationError, require};

/// Shown when a refine call returns the document unchanged
pub const UNCHANGED_NOTICE: &str =
    "Document returned unchanged; the model may not have applied the instruction.";

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /api/generate`. Fields are optional so that absence is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub features: Option<String>,
    pub tech_stack: Option<String>,
}

impl GenerateRequest {
    pub fn into_facts(self) -> Result<ManualProjectFacts, ValidationError> {
        ManualProjectFacts::new(
            require("name", self.name)?,
            require("description", self.description)?,
            require("features", self.features)?,
            require("techStack", self.tech_stack)?,
        )
    }
}

/// Body of `POST /api/generate/repository`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRequest {
    pub repository_url: Option<String>,
}

/// Body of `POST /api/refine`. `readme` is accepted for `document`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineRequest {
    #[serde(alias = "readme")]
    pub document: Option<String>,
    pub instruction: Option<String>,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub document: String,
}

impl From<GeneratedDocument> for DocumentResponse {
    fn from(doc: GeneratedDocument) -> Self {
        Self {
            document: doc.into_inner(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefineResponse {
    pub document: String,
    pub changed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<RefineOutcome> for RefineResponse {
    fn from(outcome: RefineOutcome) -> Self {
        Self {
            warning: (!outcome.changed).then(|| UNCHANGED_NOTICE.to_string()),
            changed: outcome.changed,
            document: outcome.document.into_inner(),
        }
    }
}

// =============================================================================
// Test doubles
// =============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::ai::provider::{LlmProvider, LlmResponse};
    use crate::github::RepositorySource;
    use crate::types::{ErrorCategory, LlmError, ReadmeError, RepositoryDescription, Result};

    /// Provider that records every prompt and answers with a fixed reply
    pub struct RecordingProvider {
        reply: std::result::Result<String, String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl RecordingProvider {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }

        pub fn last_prompt(&self) -> Option<String> {
            self.prompts.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl LlmProvider for RecordingProvider {
        async fn generate(&self, prompt: &str) -> Result<LlmResponse> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(LlmResponse::content_only(text.clone())),
                Err(message) => Err(LlmError::with_provider(
                    ErrorCategory::Unavailable,
                    message.clone(),
                    "mock",
                )
                .into()),
            }
        }

        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-model"
        }
    }

    /// Source that serves one repository and reports every other as missing
    pub struct StaticSource {
        pub repository: RepositoryDescription,
        pub fetches: Mutex<Vec<(String, String)>>,
    }

    impl StaticSource {
        pub fn new(repository: RepositoryDescription) -> Self {
            Self {
                repository,
                fetches: Mutex::new(Vec::new()),
            }
        }

        pub fn widget() -> Self {
            Self::new(RepositoryDescription {
                name: "widget".into(),
                description: "A widget".into(),
                primary_language: "Rust".into(),
                topics: vec!["cli".into()],
                star_count: 42,
                fork_count: 7,
                license: Some("MIT".into()),
                owner_login: "acme".into(),
                owner_avatar_url: None,
                canonical_url: "https://github.com/acme/widget".into(),
            })
        }

        pub fn fetch_count(&self) -> usize {
            self.fetches.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RepositorySource for StaticSource {
        async fn fetch(&self, owner: &str, repo: &str) -> Result<RepositoryDescription> {
            self.fetches
                .lock()
                .unwrap()
                .push((owner.to_string(), repo.to_string()));
            if owner == self.repository.owner_login && repo == self.repository.name {
                Ok(self.repository.clone())
            } else {
                Err(ReadmeError::NotFound {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
        }
    }
}
