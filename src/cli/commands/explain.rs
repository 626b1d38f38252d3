use crate::cli::output::{render, OutputFormat};
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::explain;
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Explain a single script
#[derive(Args)]
pub struct ExplainCommand {
    /// Script in ASM form, e.g. "OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG"
    pub script: Option<String>,

    /// Read the script from a file instead
    #[arg(long, conflicts_with = "script")]
    pub file: Option<PathBuf>,

    /// Output format: text, json (overrides configuration)
    #[arg(long)]
    pub format: Option<String>,

    /// Only print type, verdict and summary
    #[arg(long, short)]
    pub quiet: bool,
}

/// Rendered output of one explanation
#[derive(Debug)]
pub struct ExplainReport {
    pub rendered: String,
    /// Failure message when execution halted
    pub failure: Option<String>,
}

impl ExplainCommand {
    /// Print the report; a failed execution becomes an error after printing
    pub fn run(&self, config: &AppConfig) -> AppResult<()> {
        let report = self.execute(config)?;
        println!("{}", report.rendered);
        match report.failure {
            Some(failure) => Err(AppError::ScriptFailed(failure)),
            None => Ok(()),
        }
    }

    /// Produce the rendered report without printing it
    pub fn execute(&self, config: &AppConfig) -> AppResult<ExplainReport> {
        let script = self.read_script()?;
        let format: OutputFormat = self
            .format
            .as_deref()
            .unwrap_or(config.output.format.as_str())
            .parse()?;
        let quiet = self.quiet || config.output.quiet;

        info!("Explaining script ({} bytes)", script.len());
        let result = explain(&script)?;
        Ok(ExplainReport {
            rendered: render(&result, format, quiet)?,
            failure: result.error,
        })
    }

    fn read_script(&self) -> AppResult<String> {
        match (&self.script, &self.file) {
            (Some(script), _) => Ok(script.clone()),
            (None, Some(path)) => {
                info!("Reading script from {}", path.display());
                Ok(fs::read_to_string(path)?)
            }
            (None, None) => Err(AppError::InvalidData(
                "provide a script argument or --file".to_string(),
            )),
        }
    }
}
