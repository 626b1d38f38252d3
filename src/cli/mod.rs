use crate::config::AppConfig;
use crate::errors::AppResult;
use clap::{Parser, Subcommand};
use config::ConfigError;
use std::path::{Path, PathBuf};
use tracing::warn;

pub mod commands;
pub mod output;

/// Bitcoin Script Explainer
#[derive(Parser)]
#[command(name = "script-explainer")]
#[command(about = "Step-by-step symbolic explanation of Bitcoin Script")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: optional script-explainer.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Explain a single script from the command line or a file
    Explain(commands::explain::ExplainCommand),
    /// Read scripts from stdin and explain each one
    Interactive(commands::interactive::InteractiveCommand),
    /// List every supported opcode
    Opcodes(commands::opcodes::OpcodesCommand),
    /// Describe a single opcode
    Opcode(commands::opcodes::OpcodeCommand),
}

/// Configuration for a run plus any error that was ignored while loading it
///
/// An explicit `--config` file must load. Without one, an unreadable
/// script-explainer.toml falls back to built-in values and the error is
/// returned for logging once tracing is up.
pub fn load_config(path: Option<&Path>) -> AppResult<(AppConfig, Option<ConfigError>)> {
    match path {
        Some(path) => Ok((AppConfig::load_from(path)?, None)),
        None => match AppConfig::load() {
            Ok(config) => Ok((config, None)),
            Err(e) => Ok((AppConfig::default(), Some(e))),
        },
    }
}

pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let (config, ignored) = load_config(cli.config.as_deref())?;

    // Uses RUST_LOG environment variable (defaults to logging.level if not set)
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .try_init();

    if let Some(e) = ignored {
        warn!("Ignoring script-explainer.toml ({}), using defaults", e);
    }

    match cli.command {
        Commands::Explain(command) => command.run(&config),
        Commands::Interactive(command) => command.run(&config),
        Commands::Opcodes(command) => command.run(&config),
        Commands::Opcode(command) => command.run(&config),
    }
}
