//! Execution records returned to callers

use super::script_type::ScriptType;
use super::stack_value::StackValue;
use serde::Serialize;

/// One token's execution record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Zero-based step number
    pub step: usize,
    /// The opcode or data token processed
    pub opcode: String,
    pub explanation: String,
    pub stack_before: Vec<StackValue>,
    pub stack_after: Vec<StackValue>,
    /// Set when this step halted execution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl Step {
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Complete explanation of one script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    /// Original input script
    pub script: String,
    pub script_type: ScriptType,
    pub type_description: String,
    /// Symbolic spending data the locking script was traced against
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unlocking_data: Vec<StackValue>,
    pub steps: Vec<Step>,
    pub final_stack: Vec<StackValue>,
    /// Non-empty stack with a truthy top and no failure or OP_RETURN
    pub valid: bool,
    /// Failure message of the halting step, if any
    pub error: Option<String>,
    pub warnings: Vec<String>,
    pub summary: String,
}

