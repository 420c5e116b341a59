//! Global Constants
//!
//! Centralized constants for configuration defaults and prompt placeholders.

/// Generation service constants
pub mod generation {
    /// Default model identifier
    pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

    /// Default Gemini REST base URL
    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Default OpenAI-compatible base URL
    pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

    /// Environment variable holding the Gemini credential
    pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

    /// Environment variable holding the OpenAI credential
    pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

    /// Maximum tokens the model may emit for one document
    pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;
}

/// Repository metadata constants
pub mod github {
    /// Host recognized in repository URLs
    pub const HOST: &str = "github.com";

    /// Default REST base URL
    pub const API_BASE: &str = "https://api.github.com";

    /// Media type requested from the metadata endpoint
    pub const ACCEPT: &str = "application/vnd.github.v3+json";

    /// Optional token for higher rate limits
    pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

    /// GitHub rejects requests without a User-Agent
    pub const USER_AGENT: &str = concat!("readmegen/", env!("CARGO_PKG_VERSION"));
}

/// Placeholders substituted for absent repository fields
pub mod placeholder {
    pub const NO_DESCRIPTION: &str = "No description provided";
    pub const NO_LANGUAGE: &str = "Not specified";
    pub const NO_LICENSE: &str = "Not specified";
    pub const NO_TOPICS: &str = "None listed";
}

/// HTTP/Network constants
pub mod network {
    /// Default generation request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

    /// Default metadata request timeout (seconds)
    pub const METADATA_TIMEOUT_SECS: u64 = 30;
}

/// HTTP server constants
pub mod server {
    pub const DEFAULT_HOST: &str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 3000;

    /// Request body limit (documents are plain text, 2MB is generous)
    pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

    /// Must exceed the generation timeout plus one metadata fetch (checked by `Config::validate`)
    pub const REQUEST_TIMEOUT_SECS: u64 = 360;
}
