//! Serve Command
//!
//! Usage:
//!   readmegen serve [--host HOST] [--port PORT]

use crate::cli::Output;
use crate::cli::util::{CommandContext, LlmOverrides, runtime};
use crate::server;
use crate::types::Result;

pub fn run(host: Option<String>, port: Option<u16>, overrides: &LlmOverrides) -> Result<()> {
    let mut ctx = CommandContext::load(overrides)?;
    if let Some(host) = host {
        ctx.config.server.host = host;
    }
    if let Some(port) = port {
        ctx.config.server.port = port;
    }
    ctx.config.validate()?;

    Output::new().info(&format!(
        "Serving on http://{} (Ctrl-C to stop)",
        ctx.config.server.bind_address()
    ));

    runtime()?.block_on(server::serve(ctx.service, &ctx.config.server))
}
