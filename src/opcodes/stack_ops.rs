//! Stack manipulation opcodes and OP_SIZE

use super::{quote, quote_all, HandlerOutput, OpcodeCategory, OpcodeDefinition, OpcodeRegistry};
use crate::types::{StackValue, SymbolicOp};

pub(super) fn register(registry: &mut OpcodeRegistry) {
    registry.register(OpcodeDefinition::fixed(
        "OP_DUP",
        "Duplicates the top stack item",
        OpcodeCategory::Stack,
        1,
        2,
        |items| {
            let top = &items[0];
            HandlerOutput::produce(
                vec![top.clone(), top.clone()],
                format!("OP_DUP: duplicated {} on top of the stack", quote(top)),
            )
        },
    ));
    registry.register(OpcodeDefinition::fixed(
        "OP_DROP",
        "Removes the top stack item",
        OpcodeCategory::Stack,
        1,
        0,
        |items| {
            HandlerOutput::produce(
                Vec::new(),
                format!("OP_DROP: removed {} from the stack", quote(&items[0])),
            )
        },
    ));
    registry.register(OpcodeDefinition::fixed(
        "OP_2DROP",
        "Removes the top two stack items",
        OpcodeCategory::Stack,
        2,
        0,
        |items| {
            HandlerOutput::produce(
                Vec::new(),
                format!("OP_2DROP: removed {} from the stack", quote_all(items)),
            )
        },
    ));
    registry.register(OpcodeDefinition::fixed(
        "OP_2DUP",
        "Duplicates the top two stack items",
        OpcodeCategory::Stack,
        2,
        4,
        |items| {
            let mut produced = items.to_vec();
            produced.extend_from_slice(items);
            HandlerOutput::produce(
                produced,
                format!("OP_2DUP: duplicated {} on top of the stack", quote_all(items)),
            )
        },
    ));
    registry.register(OpcodeDefinition::fixed(
        "OP_SWAP",
        "Swaps the top two stack items",
        OpcodeCategory::Stack,
        2,
        2,
        |items| {
            let (a, b) = (&items[0], &items[1]);
            HandlerOutput::produce(
                vec![b.clone(), a.clone()],
                format!("OP_SWAP: swapped {} and {}", quote(a), quote(b)),
            )
        },
    ));
    registry.register(OpcodeDefinition::fixed(
        "OP_OVER",
        "Copies the second-to-top stack item to the top",
        OpcodeCategory::Stack,
        2,
        3,
        |items| {
            let (a, b) = (&items[0], &items[1]);
            HandlerOutput::produce(
                vec![a.clone(), b.clone(), a.clone()],
                format!("OP_OVER: copied {} over {} to the top", quote(a), quote(b)),
            )
        },
    ));
    registry.register(OpcodeDefinition::fixed(
        "OP_NIP",
        "Removes the second-to-top stack item",
        OpcodeCategory::Stack,
        2,
        1,
        |items| {
            HandlerOutput::produce(
                vec![items[1].clone()],
                format!(
                    "OP_NIP: removed {} from beneath the top item",
                    quote(&items[0])
                ),
            )
        },
    ));
    registry.register(OpcodeDefinition::fixed(
        "OP_ROT",
        "Moves the third stack item to the top",
        OpcodeCategory::Stack,
        3,
        3,
        |items| {
            HandlerOutput::produce(
                vec![items[1].clone(), items[2].clone(), items[0].clone()],
                format!("OP_ROT: rotated {} to the top", quote(&items[0])),
            )
        },
    ));
    registry.register(OpcodeDefinition::fixed(
        "OP_TUCK",
        "Copies the top stack item below the second-to-top item",
        OpcodeCategory::Stack,
        2,
        3,
        |items| {
            let (a, b) = (&items[0], &items[1]);
            HandlerOutput::produce(
                vec![b.clone(), a.clone(), b.clone()],
                format!("OP_TUCK: tucked a copy of {} beneath {}", quote(b), quote(a)),
            )
        },
    ));
    registry.register(OpcodeDefinition::fixed(
        "OP_SIZE",
        "Pushes the byte length of the top stack item (item is kept)",
        OpcodeCategory::Splice,
        1,
        2,
        |items| size(&items[0]),
    ));
}

fn size(value: &StackValue) -> HandlerOutput {
    match value.byte_len() {
        Some(len) => HandlerOutput::produce(
            vec![value.clone(), StackValue::Number(len as i64)],
            format!("OP_SIZE: {} is {} byte(s) long", quote(value), len),
        ),
        None => {
            let symbolic = StackValue::composed(SymbolicOp::Size, vec![value.clone()]);
            HandlerOutput::produce(
                vec![value.clone(), symbolic.clone()],
                format!(
                    "OP_SIZE: length of {} is not known, pushed {} (symbolic)",
                    quote(value),
                    quote(&symbolic)
                ),
            )
        }
    }
}
