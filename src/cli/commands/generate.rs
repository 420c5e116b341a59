//! Generate Commands
//!
//! Usage:
//!   readmegen generate --name N --description D --features F --tech-stack T [-o FILE]
//!   readmegen repo <URL> [-o FILE]

use std::path::PathBuf;

use crate::cli::Output;
use crate::cli::util::{CommandContext, LlmOverrides, emit_document, runtime};
use crate::readme::GenerateRequest;
use crate::types::Result;

/// Generate from hand-entered project facts
pub fn from_facts(
    request: GenerateRequest,
    output: Option<PathBuf>,
    overrides: &LlmOverrides,
) -> Result<()> {
    // Validate before touching config or the network
    let facts = request.into_facts()?;
    let ctx = CommandContext::load(overrides)?;

    let document = runtime()?.block_on(ctx.service.generate_from_facts(&facts))?;
    emit_document(&document, output.as_deref())?;

    if let Some(path) = output {
        Output::new().success(&format!("README written to {}", path.display()));
    }
    Ok(())
}

/// Generate from a GitHub repository URL
pub fn from_repository(url: &str, output: Option<PathBuf>, overrides: &LlmOverrides) -> Result<()> {
    let ctx = CommandContext::load(overrides)?;

    let document = runtime()?.block_on(ctx.service.generate_from_repository(url))?;
    emit_document(&document, output.as_deref())?;

    if let Some(path) = output {
        Output::new().success(&format!("README written to {}", path.display()));
    }
    Ok(())
}
