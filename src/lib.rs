//! readmegen - LLM-Assisted README Generation
//!
//! Produces a GitHub-style README either from hand-entered project facts or
//! from a live repository's metadata, then rewrites it on request through
//! free-form instructions.
//!
//! ## Core Features
//!
//! - **Fixed Outlines**: Prompts pin the section list and order
//! - **Repository Mode**: Infers features and stack from GitHub metadata
//! - **Whole-Document Refinement**: Every edit returns a complete README
//! - **Output Normalization**: Strips code-fence wrappers from model replies
//! - **HTTP and CLI Surfaces**: axum JSON API plus an interactive chat
//!
//! ## Quick Start
//!
//! ```ignore
//! use readmegen::{Config, ConfigLoader, ReadmeService};
//! use readmegen::cli::build_service;
//!
//! let config = ConfigLoader::load()?;
//! let service = build_service(&config)?;
//! let doc = service
//!     .generate_from_repository("https://github.com/owner/repo")
//!     .await?;
//! let outcome = service.refine(doc.as_str(), "add a FAQ section").await?;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: prompt templates, LLM providers, response normalization
//! - [`github`]: repository URL parsing and metadata fetch
//! - [`readme`]: generation/refinement service and chat session
//! - [`server`]: HTTP API
//! - [`config`]: layered configuration

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod github;
pub mod readme;
pub mod server;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, GitHubConfig, LlmConfig, ServerConfig};

// Error Types
pub use types::error::{ErrorKind, ReadmeError, Result};

// Domain
pub use types::{ChatTurn, GeneratedDocument, ManualProjectFacts, RepositoryDescription};

// =============================================================================
// Service Re-exports
// =============================================================================

pub use readme::{DocumentSession, ReadmeService, RefineOutcome};

pub use github::{GitHubClient, RepositorySource, parse_repository_url};

pub use ai::{LlmProvider, LlmResponse, PromptTemplates, SharedProvider, normalize};
