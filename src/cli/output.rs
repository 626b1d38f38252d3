//! Rendering of explanation results for the terminal

use crate::errors::{AppError, AppResult};
use crate::types::{ExecutionResult, StackValue};
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(AppError::InvalidData(format!(
                "unsupported output format '{}' (expected text or json)",
                other
            ))),
        }
    }
}

/// Pretty-printed JSON for any serialisable record
pub fn to_json<T: Serialize>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn render_stack(stack: &[StackValue]) -> String {
    if stack.is_empty() {
        "(empty)".to_string()
    } else {
        stack
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Human-readable report; `quiet` drops the per-step trace
pub fn render_text(result: &ExecutionResult, quiet: bool) -> String {
    let rule = "=".repeat(60);
    let mut out = format!("{}\n", rule);

    out.push_str(&format!("Script: {}\n", result.script.trim()));
    out.push_str(&format!("Type: {}\n", result.script_type));
    out.push_str(&format!(
        "Status: {}\n",
        if result.valid { "VALID" } else { "INVALID" }
    ));
    if let Some(error) = &result.error {
        out.push_str(&format!("Error: {}\n", error));
    }

    if !quiet {
        out.push_str(&format!("{}\nExecution trace:\n", rule));
        for step in &result.steps {
            out.push_str(&format!("  Step {}: {}\n", step.step + 1, step.opcode));
            out.push_str(&format!("    {}\n", step.explanation));
            out.push_str(&format!("    Before: {}\n", render_stack(&step.stack_before)));
            out.push_str(&format!("    After:  {}\n", render_stack(&step.stack_after)));
            if let Some(failure) = &step.failure {
                out.push_str(&format!("    FAILED: {}\n", failure));
            }
        }
        out.push_str(&format!("Final stack: {}\n", render_stack(&result.final_stack)));
    }

    out.push_str(&format!("{}\n{}\n", rule, result.summary));
    out
}

pub fn render(result: &ExecutionResult, format: OutputFormat, quiet: bool) -> AppResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result, quiet)),
        OutputFormat::Json => to_json(result),
    }
}
