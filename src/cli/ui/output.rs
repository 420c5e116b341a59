use console::style;

use crate::types::{ChatRole, ChatTurn};

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        eprintln!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        eprintln!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// Chat prompt marker, no newline
    pub fn prompt(&self) {
        eprint!("{} ", style("›").cyan().bold());
    }

    /// Assistant acknowledgement; errors in red
    pub fn turn(&self, turn: &ChatTurn) {
        match turn.role {
            ChatRole::User => eprintln!("{} {}", style("you").dim(), turn.content),
            ChatRole::Assistant if turn.content.starts_with("Error:") => {
                eprintln!("{} {}", style("readmegen").red().bold(), turn.content)
            }
            ChatRole::Assistant => {
                eprintln!("{} {}", style("readmegen").green().bold(), turn.content)
            }
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
