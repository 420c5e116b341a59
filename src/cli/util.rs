//! CLI Common Utilities
//!
//! Shared initialization and context management for CLI commands.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::ai::provider::{ProviderConfig, create_provider};
use crate::config::{Config, ConfigLoader};
use crate::github::GitHubClient;
use crate::readme::ReadmeService;
use crate::types::{GeneratedDocument, ReadmeError, Result};

/// Per-invocation overrides of the `[llm]` config section
#[derive(Debug, Clone, Default)]
pub struct LlmOverrides {
    pub provider: Option<String>,
    pub model: Option<String>,
}

impl LlmOverrides {
    fn apply(&self, config: &mut Config) {
        if let Some(provider) = &self.provider {
            config.llm.provider = provider.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
    }
}

/// Command execution context
///
/// Loaded configuration plus a ready-to-use service. Credentials are not
/// checked here; a missing key surfaces on the first generation call.
pub struct CommandContext {
    pub config: Config,
    pub service: Arc<ReadmeService>,
}

impl CommandContext {
    pub fn load(overrides: &LlmOverrides) -> Result<Self> {
        let mut config = ConfigLoader::load()?;
        overrides.apply(&mut config);
        config.validate()?;

        let service = build_service(&config)?;
        Ok(Self {
            config,
            service: Arc::new(service),
        })
    }
}

/// Wire the configured provider and GitHub client into a service
pub fn build_service(config: &Config) -> Result<ReadmeService> {
    let provider = create_provider(&ProviderConfig::from(&config.llm))?;
    info!(
        "Using LLM provider: {} (model: {})",
        provider.name(),
        provider.model()
    );

    let source = GitHubClient::new(&config.github)?;
    Ok(ReadmeService::new(provider, Arc::new(source)))
}

/// Tokio runtime for the synchronous command entry points
pub fn runtime() -> Result<Runtime> {
    Runtime::new().map_err(ReadmeError::Io)
}

/// Read a markdown document from disk
pub fn read_document(path: &Path) -> Result<String> {
    debug!("Reading document from {}", path.display());
    Ok(fs::read_to_string(path)?)
}

/// Write to `output` if given, otherwise print to stdout
pub fn emit_document(document: &GeneratedDocument, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            let mut content = document.as_str().to_string();
            if !content.ends_with('\n') {
                content.push('\n');
            }
            fs::write(path, content)?;
            info!("Wrote {} bytes to {}", document.len(), path.display());
        }
        None => println!("{}", document),
    }
    Ok(())
}
