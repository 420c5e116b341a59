//! CLI subcommand implementations
//!
//! Each command is a synchronous entry point that builds its own runtime
//! when it needs one.

pub mod chat;
pub mod config;
pub mod generate;
pub mod refine;
pub mod serve;
