//! Chat Command
//!
//! Interactive refinement of one document. Each line is an instruction;
//! lines starting with `/` are commands:
//!
//! - `/show`          print the current document
//! - `/save [path]`   write it (defaults to the input file)
//! - `/quit`          leave without saving

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use crate::cli::Output;
use crate::cli::util::{CommandContext, LlmOverrides, read_document, runtime};
use crate::readme::DocumentSession;
use crate::types::{GeneratedDocument, Result};

/// One parsed input line
#[derive(Debug, PartialEq, Eq)]
enum ChatCommand {
    Show,
    Save(Option<PathBuf>),
    Quit,
    Help,
    Unknown(String),
    Instruction(String),
    Empty,
}

fn parse_line(line: &str) -> ChatCommand {
    let line = line.trim();
    if line.is_empty() {
        return ChatCommand::Empty;
    }
    let Some(command) = line.strip_prefix('/') else {
        return ChatCommand::Instruction(line.to_string());
    };

    let mut parts = command.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    match name {
        "show" => ChatCommand::Show,
        "save" => ChatCommand::Save(arg.map(PathBuf::from)),
        "quit" | "exit" => ChatCommand::Quit,
        "help" => ChatCommand::Help,
        other => ChatCommand::Unknown(other.to_string()),
    }
}

pub fn run(input: &Path, overrides: &LlmOverrides) -> Result<()> {
    let document = read_document(input)?;
    let ctx = CommandContext::load(overrides)?;
    let rt = runtime()?;

    let mut session = DocumentSession::with_document(GeneratedDocument::new(document));
    let out = Output::new();

    out.info(&format!(
        "Loaded {}. Type an instruction, or /help for commands.",
        input.display()
    ));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        out.prompt();
        let Some(line) = lines.next() else {
            break;
        };

        match parse_line(&line?) {
            ChatCommand::Empty => {}
            ChatCommand::Quit => break,
            ChatCommand::Help => {
                out.info("/show, /save [path], /quit; anything else is sent as an instruction")
            }
            ChatCommand::Unknown(name) => out.warning(&format!("Unknown command: /{}", name)),
            ChatCommand::Show => {
                if let Some(doc) = session.current() {
                    println!("{}", doc);
                }
            }
            ChatCommand::Save(path) => {
                let target = path.unwrap_or_else(|| input.to_path_buf());
                match session.save_to(&target) {
                    Ok(()) => out.success(&format!("Saved to {}", target.display())),
                    Err(e) => out.error(&e.to_string()),
                }
            }
            ChatCommand::Instruction(instruction) => {
                let turn = rt.block_on(session.send(&ctx.service, &instruction));
                out.turn(turn);
            }
        }
    }

    Ok(())
}
