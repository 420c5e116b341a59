use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use readmegen::cli::LlmOverrides;
use readmegen::cli::commands;
use readmegen::readme::GenerateRequest;

#[derive(Parser)]
#[command(name = "readmegen")]
#[command(
    version,
    about = "Generate and refine GitHub README files with an LLM"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "LLM provider (gemini, openai)")]
    provider: Option<String>,

    #[arg(long, global = true, help = "Model to use")]
    model: Option<String>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, help = "Bind address (default from config)")]
        host: Option<String>,
        #[arg(long, short, help = "Port (default from config)")]
        port: Option<u16>,
    },

    /// Generate a README from project facts
    Generate {
        #[arg(long, help = "Project name")]
        name: String,
        #[arg(long, help = "Short project description")]
        description: String,
        #[arg(long, help = "Features, comma or newline separated")]
        features: String,
        #[arg(long = "tech-stack", help = "Technologies used")]
        tech_stack: String,
        #[arg(long, short, help = "Write to file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Generate a README from a GitHub repository
    Repo {
        #[arg(help = "Repository URL, e.g. https://github.com/owner/repo")]
        url: String,
        #[arg(long, short, help = "Write to file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Apply one instruction to an existing README
    Refine {
        #[arg(long, short, help = "README to refine")]
        input: PathBuf,
        #[arg(long, help = "What to change, in plain language")]
        instruction: String,
        #[arg(long, short, help = "Write to file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Refine a README interactively
    Chat {
        #[arg(long, short, help = "README to refine")]
        input: PathBuf,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mreadmegen encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let overrides = LlmOverrides {
        provider: cli.provider,
        model: cli.model,
    };

    match cli.command {
        Commands::Serve { host, port } => {
            commands::serve::run(host, port, &overrides)?;
        }
        Commands::Generate {
            name,
            description,
            features,
            tech_stack,
            output,
        } => {
            let request = GenerateRequest {
                name: Some(name),
                description: Some(description),
                features: Some(features),
                tech_stack: Some(tech_stack),
            };
            commands::generate::from_facts(request, output, &overrides)?;
        }
        Commands::Repo { url, output } => {
            commands::generate::from_repository(&url, output, &overrides)?;
        }
        Commands::Refine {
            input,
            instruction,
            output,
        } => {
            commands::refine::run(&input, &instruction, output, &overrides)?;
        }
        Commands::Chat { input } => {
            commands::chat::run(&input, &overrides)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                commands::config::show(&format)?;
            }
            ConfigAction::Path => {
                commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                commands::config::init(global, force)?;
            }
        },
    }

    Ok(())
}
