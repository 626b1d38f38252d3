use crate::cli::output::{to_json, OutputFormat};
use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::opcodes::{list_opcodes, opcode_info, OpcodeInfo, OpcodeLookup};
use clap::Args;
use std::fmt::Write;

/// List every supported opcode
#[derive(Args)]
pub struct OpcodesCommand {
    /// Output format: text, json (overrides configuration)
    #[arg(long)]
    pub format: Option<String>,
}

impl OpcodesCommand {
    pub fn run(&self, config: &AppConfig) -> AppResult<()> {
        let format: OutputFormat = self
            .format
            .as_deref()
            .unwrap_or(config.output.format.as_str())
            .parse()?;

        let catalog = list_opcodes();
        let report = match format {
            OutputFormat::Json => to_json(&catalog)?,
            OutputFormat::Text => render_catalog(&catalog),
        };
        println!("{}", report);
        Ok(())
    }
}

/// Describe a single opcode
#[derive(Args)]
pub struct OpcodeCommand {
    /// Opcode name, with or without the OP_ prefix
    pub name: String,

    /// Output format: text, json (overrides configuration)
    #[arg(long)]
    pub format: Option<String>,
}

impl OpcodeCommand {
    pub fn run(&self, config: &AppConfig) -> AppResult<()> {
        let format: OutputFormat = self
            .format
            .as_deref()
            .unwrap_or(config.output.format.as_str())
            .parse()?;

        let lookup = opcode_info(&canonical_name(&self.name));
        let report = match format {
            OutputFormat::Json => to_json(&lookup)?,
            OutputFormat::Text => render_lookup(&lookup),
        };
        println!("{}", report);
        Ok(())
    }
}

fn canonical_name(name: &str) -> String {
    let upper = name.trim().to_ascii_uppercase();
    if upper.starts_with("OP_") {
        upper
    } else {
        format!("OP_{}", upper)
    }
}

pub fn render_catalog(catalog: &[OpcodeInfo]) -> String {
    let width = catalog.iter().map(|op| op.name.len()).max().unwrap_or(0);
    let mut out = format!("{} supported opcodes\n", catalog.len());
    for op in catalog {
        let _ = writeln!(
            out,
            "  {:<width$}  {:<13}  {}",
            op.name,
            format!("[{:?}]", op.category),
            op.description,
            width = width
        );
    }
    out
}

pub fn render_lookup(lookup: &OpcodeLookup) -> String {
    let status = if lookup.known { "supported" } else { "not supported" };
    format!("{} ({})\n  {}", lookup.opcode, status, lookup.description)
}
