//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/readmegen/) and project (.readmegen/) level configuration.
//! Credentials are never part of these structures; they come from the environment.

use serde::{Deserialize, Serialize};

use crate::constants::{generation, github, network, server};
use crate::types::{ReadmeError, Result};

/// Providers `create_provider` knows how to build
pub const SUPPORTED_PROVIDERS: &[&str] = &["gemini", "openai"];

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text-generation settings
    pub llm: LlmConfig,

    /// Repository metadata service settings
    pub github: GitHubConfig,

    /// HTTP server settings
    pub server: ServerConfig,
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `ReadmeError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_PROVIDERS.contains(&self.llm.provider.as_str()) {
            return Err(ReadmeError::Config(format!(
                "Unknown LLM provider '{}'. Supported: {}",
                self.llm.provider,
                SUPPORTED_PROVIDERS.join(", ")
            )));
        }

        if self.llm.model.trim().is_empty() {
            return Err(ReadmeError::Config("LLM model must not be empty".to_string()));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ReadmeError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(ReadmeError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_output_tokens == 0 {
            return Err(ReadmeError::Config(
                "LLM max_output_tokens must be greater than 0".to_string(),
            ));
        }

        if let Some(base) = &self.llm.api_base {
            check_http_url("llm.api_base", base)?;
        }
        check_http_url("github.api_base", &self.github.api_base)?;

        if self.github.timeout_secs == 0 {
            return Err(ReadmeError::Config(
                "GitHub timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ReadmeError::Config(
                "Server port must be greater than 0".to_string(),
            ));
        }

        let pipeline_secs = self.llm.timeout_secs.saturating_add(self.github.timeout_secs);
        if self.server.request_timeout_secs <= pipeline_secs {
            return Err(ReadmeError::Config(format!(
                "Server request_timeout_secs ({}) must exceed llm.timeout_secs + github.timeout_secs ({})",
                self.server.request_timeout_secs, pipeline_secs
            )));
        }

        Ok(())
    }
}

/// Reject anything but an absolute http(s) URL
fn check_http_url(field: &str, value: &str) -> Result<()> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(parsed) => Err(ReadmeError::Config(format!(
            "{} must use http or https, got '{}'",
            field,
            parsed.scheme()
        ))),
        Err(e) => Err(ReadmeError::Config(format!(
            "{} is not a valid URL ('{}'): {}",
            field, value, e
        ))),
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: "gemini" or "openai"
    pub provider: String,

    /// Model name
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Sampling temperature (0.0 = deterministic, 2.0 = most varied)
    pub temperature: f32,

    /// Override the provider's API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Upper bound on generated tokens per request
    pub max_output_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: generation::DEFAULT_MODEL.to_string(),
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            temperature: 0.7,
            api_base: None,
            max_output_tokens: generation::DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

// =============================================================================
// GitHub Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL
    pub api_base: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: github::API_BASE.to_string(),
            timeout_secs: network::METADATA_TIMEOUT_SECS,
            user_agent: github::USER_AGENT.to_string(),
        }
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    /// CORS origins. Empty allows any origin.
    pub allowed_origins: Vec<String>,

    /// Maximum accepted request body size
    pub max_body_bytes: usize,

    /// Whole-request timeout, covering metadata fetch and generation
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: server::DEFAULT_HOST.to_string(),
            port: server::DEFAULT_PORT,
            allowed_origins: Vec::new(),
            max_body_bytes: server::MAX_BODY_BYTES,
            request_timeout_secs: server::REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
