//! Unified Error Type System
//!
//! Centralized error types for the whole crate. Every failure a request can
//! hit is one variant of [`ReadmeError`], and every variant maps onto a stable
//! [`ErrorKind`] so the HTTP and CLI surfaces can report `kind + message`
//! without inspecting error text.
//!
//! ## Taxonomy
//!
//! - **Validation**: a required field is missing or blank (client's fault)
//! - **InvalidUrl**: the repository URL has no extractable owner/name pair
//! - **NotFound**: the repository does not exist
//! - **Upstream**: the metadata service answered with an unexpected status
//! - **Config**: missing credential or bad configuration (operator's fault)
//! - **Generation**: the text-generation call failed for any other reason
//!
//! Nothing in the pipeline retries. [`ErrorCategory`] is kept on generation
//! failures for diagnostics only.

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Classification of generation-service failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Upstream rate limiting (429)
    RateLimit,
    /// Credential rejected (401/403)
    Auth,
    /// Connectivity or timeout
    Network,
    /// Request rejected as malformed (400)
    BadRequest,
    /// Server-side failure (5xx)
    Unavailable,
    /// Response body could not be interpreted
    ParseError,
    /// The model produced no usable text
    EmptyResponse,
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::EmptyResponse => write!(f, "EMPTY_RESPONSE"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// =============================================================================
// LLM Error
// =============================================================================

/// Generation-service error with category and provider context
#[derive(Debug, Clone)]
pub struct LlmError {
    pub category: ErrorCategory,
    pub message: String,
    /// Provider that produced the error
    pub provider: Option<String>,
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for LlmError {}

impl LlmError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
        }
    }

    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
        }
    }

    /// Classify a non-success HTTP status from a generation endpoint
    pub fn from_http_status(status: u16, message: &str, provider: &str) -> Self {
        let category = match status {
            429 => ErrorCategory::RateLimit,
            401 | 403 => ErrorCategory::Auth,
            400 => ErrorCategory::BadRequest,
            500..=599 => ErrorCategory::Unavailable,
            _ => ErrorCategory::Unknown,
        };
        Self::with_provider(category, format!("HTTP {}: {}", status, message), provider)
    }

    /// Classify a transport-level failure
    pub fn from_transport(err: &reqwest::Error, provider: &str) -> Self {
        let category = if err.is_timeout() || err.is_connect() {
            ErrorCategory::Network
        } else if err.is_decode() {
            ErrorCategory::ParseError
        } else {
            ErrorCategory::Unknown
        };
        Self::with_provider(category, err.to_string(), provider)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Structured validation error with field context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// Field that failed validation (wire name)
    pub field: Option<String>,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "Validation failed for '{}': {}", field, self.message)
        } else {
            write!(f, "Validation failed: {}", self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Required field absent or blank
    pub fn missing_field(field: &str) -> Self {
        Self::new(ValidationErrorKind::MissingField, "field is required").with_field(field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Required field missing or blank
    MissingField,
}

// =============================================================================
// Error Kind
// =============================================================================

/// Stable, wire-facing classification of a [`ReadmeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    InvalidUrl,
    NotFound,
    Upstream,
    Configuration,
    Generation,
    Timeout,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::InvalidUrl => "invalid_url",
            Self::NotFound => "not_found",
            Self::Upstream => "upstream",
            Self::Configuration => "configuration",
            Self::Generation => "generation",
            Self::Timeout => "timeout",
            Self::Internal => "internal",
        }
    }

    /// HTTP status code reported for this kind
    ///
    /// Only a missing or malformed request field is the caller's fault.
    /// Everything past validation, including URL parsing and the metadata
    /// fetch, reports a server-side status.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::NotFound | Self::Upstream | Self::Generation => 502,
            Self::Timeout => 504,
            Self::InvalidUrl | Self::Configuration | Self::Internal => 500,
        }
    }

    /// Whether the caller (not the server) is at fault
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status())
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ReadmeError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Validation(ValidationError),

    #[error("Invalid GitHub URL '{url}'. Please use format: https://github.com/owner/repo")]
    InvalidUrl { url: String },

    // -------------------------------------------------------------------------
    // Repository Metadata Errors
    // -------------------------------------------------------------------------
    #[error("Repository {owner}/{repo} not found. Please check the URL and try again.")]
    NotFound { owner: String, repo: String },

    #[error("{}", upstream_message(.status, .message))]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    // -------------------------------------------------------------------------
    // Generation Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Generation failed: {0}")]
    Generation(LlmError),
}

fn upstream_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("GitHub API error ({}): {}", code, message),
        None => format!("GitHub API request failed: {}", message),
    }
}

impl From<LlmError> for ReadmeError {
    fn from(err: LlmError) -> Self {
        ReadmeError::Generation(err)
    }
}

impl From<ValidationError> for ReadmeError {
    fn from(err: ValidationError) -> Self {
        ReadmeError::Validation(err)
    }
}

pub type Result<T> = std::result::Result<T, ReadmeError>;

impl ReadmeError {
    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Upstream { .. } => ErrorKind::Upstream,
            Self::Config(_) => ErrorKind::Configuration,
            Self::Generation(_) => ErrorKind::Generation,
            Self::Io(_) | Self::Json(_) => ErrorKind::Internal,
        }
    }
}
