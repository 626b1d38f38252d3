//! Constant pushes: OP_0, OP_1NEGATE and OP_1..OP_16

use super::{HandlerOutput, OpcodeCategory, OpcodeDefinition, OpcodeRegistry};
use crate::types::StackValue;

const SMALL_INTEGER_NAMES: [&str; 16] = [
    "OP_1", "OP_2", "OP_3", "OP_4", "OP_5", "OP_6", "OP_7", "OP_8", "OP_9", "OP_10", "OP_11",
    "OP_12", "OP_13", "OP_14", "OP_15", "OP_16",
];

pub(super) fn register(registry: &mut OpcodeRegistry) {
    registry.register(OpcodeDefinition::fixed(
        "OP_0",
        "Pushes an empty array (the number 0, false) onto the stack",
        OpcodeCategory::Constant,
        0,
        1,
        |_| push_number("OP_0", 0),
    ));
    registry.register(OpcodeDefinition::fixed(
        "OP_1NEGATE",
        "Pushes the number -1 onto the stack",
        OpcodeCategory::Constant,
        0,
        1,
        |_| push_number("OP_1NEGATE", -1),
    ));

    for (value, name) in (1i64..).zip(SMALL_INTEGER_NAMES) {
        registry.register(OpcodeDefinition::fixed(
            name,
            "Pushes the small integer named by the opcode (1-16) onto the stack",
            OpcodeCategory::Constant,
            0,
            1,
            move |_| push_number(name, value),
        ));
    }
}

fn push_number(name: &str, value: i64) -> HandlerOutput {
    HandlerOutput::produce(
        vec![StackValue::Number(value)],
        format!("{}: pushed the number {} onto the stack", name, value),
    )
}
