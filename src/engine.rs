//! Symbolic execution engine
//!
//! Replays tokens against a simulated stack, one step per token:
//! - data tokens are pushed as literals
//! - opcodes are resolved through the [`OpcodeRegistry`]; the handler receives
//!   exactly the items its arity consumes and its output is pushed back
//! - an unknown opcode, an insufficient stack or a failed VERIFY records a
//!   terminal step and halts
//!
//! No branching and no backtracking, so a run is bounded by the token count.
//! A run normally starts from an empty stack; [`ExecutionEngine::run_from`]
//! starts from symbolic unlocking data instead.
//! Every run owns its stack; nothing is shared between runs.

use crate::opcodes::{Effect, OpcodeRegistry};
use crate::types::{Stack, StackValue, Step, Token};
use tracing::{debug, warn};

/// Everything one run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionTrace {
    pub steps: Vec<Step>,
    pub final_stack: Stack,
    /// Failure message of the step that halted execution
    pub failure: Option<String>,
    /// Set once OP_RETURN has executed
    pub unspendable: bool,
}

impl ExecutionTrace {
    pub fn halted(&self) -> bool {
        self.failure.is_some()
    }

    /// Non-empty stack with a truthy top, no failure and no OP_RETURN
    ///
    /// Symbolic values (signature checks, unresolved comparisons) count as
    /// truthy: the learner is shown what would happen with valid inputs.
    pub fn is_valid(&self) -> bool {
        !self.halted()
            && !self.unspendable
            && self.final_stack.last().is_some_and(StackValue::is_truthy)
    }
}

/// Mutable state of a single run
#[derive(Default)]
struct Machine {
    stack: Stack,
    steps: Vec<Step>,
    failure: Option<String>,
    unspendable: bool,
}

impl Machine {
    fn record(
        &mut self,
        token: &Token,
        before: Stack,
        explanation: String,
        failure: Option<String>,
    ) {
        let step = Step {
            step: self.steps.len(),
            opcode: token.value.clone(),
            explanation,
            stack_before: before,
            stack_after: self.stack.clone(),
            failure: failure.clone(),
        };
        debug!(
            step = step.step,
            opcode = %step.opcode,
            depth = self.stack.len(),
            "{}",
            step.explanation
        );
        self.steps.push(step);

        if let Some(message) = failure {
            warn!(
                token = %token.value,
                position = token.position,
                "Execution halted: {}",
                message
            );
            self.failure = Some(message);
        }
    }

    fn halt(&mut self, token: &Token, explanation: String, failure: String) {
        let before = self.stack.clone();
        self.record(token, before, explanation, Some(failure));
    }
}

/// Drives tokens through the registry
pub struct ExecutionEngine<'r> {
    registry: &'r OpcodeRegistry,
}

impl Default for ExecutionEngine<'static> {
    fn default() -> Self {
        Self::new(OpcodeRegistry::global())
    }
}

impl<'r> ExecutionEngine<'r> {
    pub fn new(registry: &'r OpcodeRegistry) -> Self {
        Self { registry }
    }

    /// Execute a token sequence from an empty stack
    pub fn run(&self, tokens: &[Token]) -> ExecutionTrace {
        self.run_from(Stack::new(), tokens)
    }

    /// Execute a token sequence on top of `initial`
    ///
    /// The initial items stand in for data supplied by a spending script.
    /// They are not recorded as steps.
    pub fn run_from(&self, initial: Stack, tokens: &[Token]) -> ExecutionTrace {
        let mut machine = Machine {
            stack: initial,
            ..Machine::default()
        };

        for token in tokens {
            if token.is_data() {
                self.push_data(&mut machine, token);
            } else {
                self.execute_opcode(&mut machine, token);
            }

            if machine.failure.is_some() {
                break;
            }
        }

        ExecutionTrace {
            steps: machine.steps,
            final_stack: machine.stack,
            failure: machine.failure,
            unspendable: machine.unspendable,
        }
    }

    fn push_data(&self, machine: &mut Machine, token: &Token) {
        let before = machine.stack.clone();
        let value = StackValue::literal(token.value.clone());
        let explanation = format!(
            "pushed literal value '{}' onto the stack ({})",
            value,
            describe_push(&value)
        );
        machine.stack.push(value);
        machine.record(token, before, explanation, None);
    }

    fn execute_opcode(&self, machine: &mut Machine, token: &Token) {
        let definition = match self.registry.lookup(&token.value) {
            Ok(definition) => definition,
            Err(err) => {
                let failure = err.to_string();
                machine.halt(
                    token,
                    format!(
                        "{} is not supported by this interpreter; execution halted",
                        token.value
                    ),
                    failure,
                );
                return;
            }
        };

        let required = match definition.arity.required_depth(&machine.stack) {
            Ok(required) => required,
            Err(reason) => {
                let failure = format!("{}: {}", token.value, reason);
                machine.halt(token, format!("{}; execution halted", failure), failure);
                return;
            }
        };

        let available = machine.stack.len();
        if available < required {
            machine.halt(
                token,
                format!(
                    "{} requires {} stack item(s) but only {} available; execution halted",
                    token.value, required, available
                ),
                format!("{}: insufficient stack items", token.value),
            );
            return;
        }

        let before = machine.stack.clone();
        let consumed = machine.stack.split_off(available - required);
        let output = definition.apply(&consumed);
        debug_assert_eq!(output.produced.len(), definition.arity.produces());
        machine.stack.extend(output.produced);

        let failure = match output.effect {
            Effect::Continue => None,
            Effect::Unspendable => {
                machine.unspendable = true;
                None
            }
            Effect::Fail(message) => Some(message),
        };
        machine.record(token, before, output.explanation, failure);
    }
}

/// Best guess at what a pushed literal represents, from its byte length
fn describe_push(value: &StackValue) -> &'static str {
    if let StackValue::Literal(text) = value {
        if text.starts_with('<') && text.ends_with('>') {
            return "placeholder";
        }
    }
    if value.as_integer().is_some() {
        return "number";
    }
    match value.byte_len() {
        Some(20) => "20-byte hash, possibly a public key hash or script hash",
        Some(32) => "32-byte hash, possibly SHA-256",
        Some(33) => "possible compressed public key",
        Some(65) => "possible uncompressed public key",
        Some(70..=73) => "possible DER signature",
        _ => "data",
    }
}
