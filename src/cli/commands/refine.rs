//! Refine Command
//!
//! Usage:
//!   readmegen refine -i README.md --instruction "add a FAQ section" [-o FILE]

use std::path::{Path, PathBuf};

use crate::cli::Output;
use crate::cli::util::{CommandContext, LlmOverrides, emit_document, read_document, runtime};
use crate::readme::UNCHANGED_NOTICE;
use crate::types::Result;

pub fn run(
    input: &Path,
    instruction: &str,
    output: Option<PathBuf>,
    overrides: &LlmOverrides,
) -> Result<()> {
    let document = read_document(input)?;
    let ctx = CommandContext::load(overrides)?;

    let outcome = runtime()?.block_on(ctx.service.refine(&document, instruction))?;

    let out = Output::new();
    if !outcome.changed {
        out.warning(UNCHANGED_NOTICE);
    }

    emit_document(&outcome.document, output.as_deref())?;
    if let Some(path) = output {
        out.success(&format!("README written to {}", path.display()));
    }
    Ok(())
}
