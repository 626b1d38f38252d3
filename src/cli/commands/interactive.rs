use crate::cli::output::{render, OutputFormat};
use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::explain;
use clap::Args;
use std::io::{self, BufRead, Write};
use tracing::info;

const EXIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

/// Explain scripts typed at a prompt, one per line
#[derive(Args)]
pub struct InteractiveCommand {
    /// Output format: text, json (overrides configuration)
    #[arg(long)]
    pub format: Option<String>,
}

impl InteractiveCommand {
    pub fn run(&self, config: &AppConfig) -> AppResult<()> {
        let format: OutputFormat = self
            .format
            .as_deref()
            .unwrap_or(config.output.format.as_str())
            .parse()?;

        let stdin = io::stdin();
        let stdout = io::stdout();
        run_session(stdin.lock(), stdout.lock(), format, config.output.quiet)?;
        Ok(())
    }
}

/// Read-explain-print loop over any reader/writer pair
///
/// Malformed scripts are reported and the session continues. Stops on an
/// exit word or end of input. Returns how many scripts were explained.
pub fn run_session<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    format: OutputFormat,
    quiet: bool,
) -> AppResult<usize> {
    writeln!(output, "Bitcoin Script Explainer (type 'quit' to exit)")?;
    let mut explained = 0usize;
    let mut lines = input.lines();

    loop {
        write!(output, "script> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;
        let script = line.trim();

        if script.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&script.to_ascii_lowercase().as_str()) {
            break;
        }

        match explain(script).and_then(|result| render(&result, format, quiet)) {
            Ok(report) => {
                writeln!(output, "{}", report)?;
                explained += 1;
            }
            Err(e) => writeln!(output, "Error: {}", e)?,
        }
    }

    info!("Interactive session ended after {} script(s)", explained);
    writeln!(output, "Goodbye!")?;
    Ok(explained)
}
