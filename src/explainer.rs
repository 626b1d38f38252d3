//! Script explanation pipeline
//!
//! Orchestrates tokenising, type detection, symbolic execution and the
//! plain-English summary. Each call is independent: nothing is cached and no
//! state survives between calls.
//!
//! This is an educational tool and NOT a consensus-level validator.

use crate::detection::{detect, patterns::multisig_shape, unlocking_placeholders, Detection};
use crate::engine::{ExecutionEngine, ExecutionTrace};
use crate::errors::AppResult;
use crate::tokenizer::{parse_warnings, tokenize};
use crate::types::{ExecutionResult, ScriptType, StackValue, Token};
use tracing::{info, warn};

pub const DISCLAIMER: &str = "DISCLAIMER: This is a symbolic simulation for educational purposes. \
It does not perform real cryptographic operations and should not be used for validating actual \
Bitcoin transactions.";

/// Explain a script end to end
///
/// # Errors
/// * `AppError::MalformedScript` if the script cannot be tokenised. Failures
///   during execution are reported inside the returned result instead.
///
/// # Examples
/// ```
/// use script_explainer::explain;
/// use script_explainer::types::ScriptType;
///
/// let result = explain("OP_HASH160 89abcdef OP_EQUAL").unwrap();
/// assert_eq!(result.script_type, ScriptType::P2SH);
/// ```
pub fn explain(script: &str) -> AppResult<ExecutionResult> {
    let tokens = tokenize(script)?;

    let warnings = parse_warnings(&tokens);
    for warning in &warnings {
        warn!("{}", warning);
    }

    let detection = detect(&tokens);
    let unlocking = unlocking_placeholders(detection.script_type, &tokens);
    let trace = ExecutionEngine::default().run_from(unlocking.clone(), &tokens);
    let summary = compose_summary(&detection, &tokens, &unlocking, &trace, &warnings);

    info!(
        script_type = %detection.script_type,
        tokens = tokens.len(),
        steps = trace.steps.len(),
        valid = trace.is_valid(),
        "Explained script"
    );

    let valid = trace.is_valid();
    Ok(ExecutionResult {
        script: script.to_string(),
        script_type: detection.script_type,
        type_description: detection.description,
        unlocking_data: unlocking,
        steps: trace.steps,
        final_stack: trace.final_stack,
        valid,
        error: trace.failure,
        warnings,
        summary,
    })
}

/// Build the narrative summary from the detection and execution trace
///
/// Pure function: the same inputs always produce the same text.
pub fn compose_summary(
    detection: &Detection,
    tokens: &[Token],
    unlocking: &[StackValue],
    trace: &ExecutionTrace,
    warnings: &[String],
) -> String {
    let info = detection.script_type.info();
    let mut parts = vec![
        format!("Script Type: {} ({})", detection.script_type, info.name),
        detection.description.clone(),
        format!("Purpose: {}. Security: {}.", info.usage, info.security),
        format!("Spending: {}", spending_requirements(detection.script_type, tokens)),
    ];

    if !unlocking.is_empty() {
        let items: Vec<String> = unlocking.iter().map(|v| v.to_string()).collect();
        parts.push(format!(
            "Assumed unlocking data: {}. The spending script is not executed; these \
             symbolic items stand in for what it would push.",
            items.join(", ")
        ));
    }

    match trace.steps.iter().find(|step| step.is_failure()) {
        Some(step) => {
            parts.push(format!(
                "Execution: Failed at step {} ({}): {}.",
                step.step + 1,
                step.opcode,
                step.failure.as_deref().unwrap_or("unknown failure")
            ));
            if step.failure.as_deref().is_some_and(|f| f.ends_with("insufficient stack items")) {
                parts.push(
                    "Note: locking and unlocking scripts are analysed separately. Prepend the \
                     unlocking data (for example <sig> <pubkey>) to trace a full spend."
                        .to_string(),
                );
            }
        }
        None => parts.push(format!(
            "Execution: Completed successfully with {} step(s).",
            trace.steps.len()
        )),
    }

    if trace.final_stack.is_empty() {
        parts.push("Final stack is empty.".to_string());
    } else {
        let items: Vec<String> = trace.final_stack.iter().map(|v| v.to_string()).collect();
        parts.push(format!(
            "Final stack contains {} item(s): {}",
            items.len(),
            items.join(", ")
        ));
    }

    parts.push(verdict(trace).to_string());

    for warning in warnings {
        parts.push(format!("Warning: {}", warning));
    }

    parts.push(DISCLAIMER.to_string());
    parts.join("\n")
}

fn verdict(trace: &ExecutionTrace) -> &'static str {
    if trace.halted() {
        "Result: INVALID - execution halted before the script completed."
    } else if trace.unspendable {
        "Result: INVALID - OP_RETURN makes this output provably unspendable."
    } else if trace.is_valid() {
        "Result: VALID - the stack ends with a true value (symbolic checks assumed to pass)."
    } else if trace.final_stack.is_empty() {
        "Result: INVALID - the stack ends empty."
    } else {
        "Result: INVALID - the top stack item is false."
    }
}

fn spending_requirements(script_type: ScriptType, tokens: &[Token]) -> String {
    match script_type {
        ScriptType::P2PKH => format!(
            "provide a signature and a public key; HASH160 of the public key must equal {} \
             and the signature must be valid for that key.",
            data_at(tokens, 2)
        ),
        ScriptType::P2SH => format!(
            "provide the redeem script (plus the data it requires); HASH160 of the redeem \
             script must equal {}.",
            data_at(tokens, 1)
        ),
        ScriptType::P2PK => format!(
            "provide a single signature valid for public key {}.",
            data_at(tokens, 0)
        ),
        ScriptType::Multisig => match multisig_shape(tokens) {
            Some(shape) => format!(
                "provide a dummy OP_0 followed by {} signature(s), in the same order as their \
                 {} public keys.",
                shape.required_sigs, shape.total_pubkeys
            ),
            None => "provide a dummy OP_0 followed by the required signatures.".to_string(),
        },
        ScriptType::NullData => format!(
            "cannot be spent; the output only carries {} data item(s).",
            tokens.iter().skip(1).filter(|t| t.is_data()).count()
        ),
        ScriptType::Unknown => {
            "this is a custom script; spending requires satisfying its specific logic as \
             traced step by step."
                .to_string()
        }
    }
}

fn data_at(tokens: &[Token], index: usize) -> &str {
    tokens
        .get(index)
        .map(|t| t.value.as_str())
        .unwrap_or("the embedded value")
}
