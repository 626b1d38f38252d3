//! Flow control and locktime opcodes
//!
//! Branching (OP_IF and friends) is deliberately absent; those names resolve
//! as unknown opcodes.

use super::{quote, Effect, HandlerOutput, OpcodeCategory, OpcodeDefinition, OpcodeRegistry};
use crate::types::StackValue;

pub(super) fn register(registry: &mut OpcodeRegistry) {
    registry.register(OpcodeDefinition::fixed(
        "OP_NOP",
        "Does nothing",
        OpcodeCategory::FlowControl,
        0,
        0,
        |_| HandlerOutput::produce(Vec::new(), "OP_NOP: no operation performed".to_string()),
    ));
    registry.register(OpcodeDefinition::fixed(
        "OP_VERIFY",
        "Removes the top stack item and fails if it is false or zero",
        OpcodeCategory::FlowControl,
        1,
        0,
        |items| verify("OP_VERIFY", &items[0], format!("checked {}", quote(&items[0]))),
    ));
    registry.register(OpcodeDefinition::fixed(
        "OP_RETURN",
        "Marks the output as provably unspendable (used for data embedding)",
        OpcodeCategory::FlowControl,
        0,
        0,
        |_| HandlerOutput {
            produced: Vec::new(),
            explanation: "OP_RETURN: script is provably unspendable (null data output); \
                          any following data is embedded payload"
                .to_string(),
            effect: Effect::Unspendable,
        },
    ));
    registry.register(OpcodeDefinition::fixed(
        "OP_CHECKLOCKTIMEVERIFY",
        "Fails if the transaction's locktime is below the top stack item (item is kept)",
        OpcodeCategory::Locktime,
        1,
        1,
        |items| check_locktime("OP_CHECKLOCKTIMEVERIFY", "locktime", &items[0]),
    ));
    registry.register(OpcodeDefinition::fixed(
        "OP_CHECKSEQUENCEVERIFY",
        "Fails if the input's relative locktime is below the top stack item (item is kept)",
        OpcodeCategory::Locktime,
        1,
        1,
        |items| check_locktime("OP_CHECKSEQUENCEVERIFY", "relative locktime", &items[0]),
    ));
}

/// Shared tail of every VERIFY-class opcode
///
/// Known-false values fail the step. Symbolic values cannot be evaluated and
/// are assumed to pass.
pub(super) fn verify(name: &str, value: &StackValue, context: String) -> HandlerOutput {
    match value.truth() {
        Some(false) => HandlerOutput::fail(
            format!(
                "{}: {}; {} is false, verification failed",
                name,
                context,
                quote(value)
            ),
            format!("{}: verification failed", name),
        ),
        Some(true) => HandlerOutput::produce(
            Vec::new(),
            format!(
                "{}: {}; {} is true, verification passed",
                name,
                context,
                quote(value)
            ),
        ),
        None => HandlerOutput::produce(
            Vec::new(),
            format!(
                "{}: {}; {} is symbolic, verification assumed to pass",
                name,
                context,
                quote(value)
            ),
        ),
    }
}

fn check_locktime(name: &str, what: &str, value: &StackValue) -> HandlerOutput {
    if let Some(n) = value.as_integer().filter(|n| *n < 0) {
        return HandlerOutput {
            produced: vec![value.clone()],
            explanation: format!("{}: {} {} is negative", name, what, n),
            effect: Effect::Fail(format!("{}: negative {}", name, what)),
        };
    }

    HandlerOutput::produce(
        vec![value.clone()],
        format!(
            "{}: {} {} left on the stack, assumed satisfied (no transaction context)",
            name,
            what,
            quote(value)
        ),
    )
}
