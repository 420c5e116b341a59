//! AI Integration Layer
//!
//! Prompt construction, provider access, and cleanup of model output for
//! README generation.

pub mod normalize;
pub mod prompt;
pub mod provider;

pub use normalize::normalize;
pub use prompt::{PromptBuilder, PromptSection, PromptTemplates};
pub use provider::{
    GeminiProvider, LlmProvider, LlmResponse, OpenAiProvider, ProviderConfig, ResponseMetadata,
    ResponseTiming, SharedProvider, TokenUsage, create_provider,
};
