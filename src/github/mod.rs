//! Repository Metadata
//!
//! URL parsing and the [`RepositorySource`] seam used by README generation.
//! [`GitHubClient`] is the production implementation; tests substitute
//! in-memory sources.

mod client;
mod url;

pub use client::GitHubClient;
pub use url::parse_repository_url;

use async_trait::async_trait;
use std::sync::Arc;

use crate::types::{RepositoryDescription, Result};

/// Anything that can describe a repository by owner and name
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// One read of repository metadata. `NotFound` for a missing repository,
    /// `Upstream` for any other failure.
    async fn fetch(&self, owner: &str, repo: &str) -> Result<RepositoryDescription>;
}

pub type SharedSource = Arc<dyn RepositorySource>;
