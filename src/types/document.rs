//! Document-level type definitions
//!
//! Inputs to prompt construction (manual facts, repository descriptions) and
//! the artifacts the pipeline produces (documents, chat turns).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValidationError;

/// Project facts entered by hand. All four fields are non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualProjectFacts {
    name: String,
    description: String,
    features: String,
    tech_stack: String,
}

impl ManualProjectFacts {
    /// Validate and build. Values are kept verbatim; blank means missing.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        features: impl Into<String>,
        tech_stack: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: require("name", Some(name.into()))?,
            description: require("description", Some(description.into()))?,
            features: require("features", Some(features.into()))?,
            tech_stack: require("techStack", Some(tech_stack.into()))?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Free text, comma or line separated
    pub fn features(&self) -> &str {
        &self.features
    }

    pub fn tech_stack(&self) -> &str {
        &self.tech_stack
    }
}

/// Return the value if present and not blank, otherwise a missing-field error
pub fn require(field: &str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::missing_field(field)),
    }
}

/// Normalized repository metadata, read-only after the fetcher builds it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDescription {
    pub name: String,
    /// Defaulted to a placeholder when the repository has none
    pub description: String,
    /// Defaulted to a placeholder when the repository has none
    pub primary_language: String,
    pub topics: Vec<String>,
    pub star_count: u64,
    pub fork_count: u64,
    pub license: Option<String>,
    pub owner_login: String,
    pub owner_avatar_url: Option<String>,
    pub canonical_url: String,
}

/// The current README text. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocument(String);

impl GeneratedDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GeneratedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::User => write!(f, "user"),
            ChatRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// One transcript entry. Display-only: never fed back into generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
    pub at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            at: Utc::now(),
        }
    }
}
