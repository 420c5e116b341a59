//! Config Command
//!
//! Manage readmegen configuration.
//!
//! Usage:
//!   readmegen config show [-f json]
//!   readmegen config path
//!   readmegen config init [-g] [--force]

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::constants::{generation, github};
use crate::types::Result;

/// Show merged effective configuration
pub fn show(format: &str) -> Result<()> {
    let config = ConfigLoader::load()?;
    println!("{}", ConfigLoader::render(&config, format == "json")?);
    Ok(())
}

/// Show configuration paths and which credentials are present
pub fn path() -> Result<()> {
    let mark = |exists: bool| if exists { "✓" } else { "✗" };

    println!("Configuration paths:");
    println!();
    match ConfigLoader::global_config_path() {
        Some(global) => println!("  Global:  {} {}", mark(global.exists()), global.display()),
        None => println!("  Global:  (not available)"),
    }
    let project = ConfigLoader::project_config_path();
    println!("  Project: {} {}", mark(project.exists()), project.display());

    println!();
    println!("Credentials (environment):");
    println!();
    for var in [
        generation::GEMINI_API_KEY_ENV,
        generation::OPENAI_API_KEY_ENV,
        github::TOKEN_ENV,
    ] {
        println!("  {} {}", mark(std::env::var(var).is_ok()), var);
    }
    Ok(())
}

/// Write a default config file
pub fn init(global: bool, force: bool) -> Result<()> {
    let path = if global {
        ConfigLoader::init_global(force)?
    } else {
        ConfigLoader::init_project(force)?
    };

    Output::new().success(&format!(
        "Initialized {} configuration: {}",
        if global { "global" } else { "project" },
        path.display()
    ));
    Ok(())
}
