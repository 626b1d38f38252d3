//! Equality, boolean logic and integer arithmetic
//!
//! Numeric rule: an operation is evaluated only when every operand has an
//! integer interpretation (a number, a boolean or a bare decimal literal).
//! Otherwise the result is a symbolic expression such as `(<x> + 1)`.

use super::flow::verify;
use super::{quote, HandlerOutput, OpcodeCategory, OpcodeDefinition, OpcodeRegistry};
use crate::types::{StackValue, SymbolicOp};

type UnaryEval = fn(i64) -> Option<StackValue>;
type BinaryEval = fn(i64, i64) -> Option<StackValue>;
type UnarySymbolic = fn(StackValue) -> StackValue;

const UNARY_OPS: &[(&str, &str, UnaryEval, UnarySymbolic)] = &[
    (
        "OP_1ADD",
        "Adds 1 to the top stack item",
        |x| x.checked_add(1).map(StackValue::Number),
        |x| StackValue::composed(SymbolicOp::Add, vec![x, StackValue::Number(1)]),
    ),
    (
        "OP_1SUB",
        "Subtracts 1 from the top stack item",
        |x| x.checked_sub(1).map(StackValue::Number),
        |x| StackValue::composed(SymbolicOp::Sub, vec![x, StackValue::Number(1)]),
    ),
    (
        "OP_NEGATE",
        "Flips the sign of the top stack item",
        |x| x.checked_neg().map(StackValue::Number),
        |x| StackValue::composed(SymbolicOp::Negate, vec![x]),
    ),
    (
        "OP_NOT",
        "Pushes TRUE if the top stack item is 0, FALSE otherwise",
        |x| Some(StackValue::Bool(x == 0)),
        |x| StackValue::composed(SymbolicOp::Not, vec![x]),
    ),
];

const BINARY_OPS: &[(&str, &str, SymbolicOp, BinaryEval)] = &[
    (
        "OP_ADD",
        "Adds the top two stack items",
        SymbolicOp::Add,
        |a, b| a.checked_add(b).map(StackValue::Number),
    ),
    (
        "OP_SUB",
        "Subtracts the top stack item from the second",
        SymbolicOp::Sub,
        |a, b| a.checked_sub(b).map(StackValue::Number),
    ),
    (
        "OP_BOOLAND",
        "Pushes TRUE if both top items are non-zero",
        SymbolicOp::BoolAnd,
        |a, b| Some(StackValue::Bool(a != 0 && b != 0)),
    ),
    (
        "OP_BOOLOR",
        "Pushes TRUE if either top item is non-zero",
        SymbolicOp::BoolOr,
        |a, b| Some(StackValue::Bool(a != 0 || b != 0)),
    ),
    (
        "OP_NUMEQUAL",
        "Pushes TRUE if the top two items are numerically equal",
        SymbolicOp::NumEqual,
        numequal,
    ),
    (
        "OP_LESSTHAN",
        "Pushes TRUE if the second item is less than the top item",
        SymbolicOp::LessThan,
        |a, b| Some(StackValue::Bool(a < b)),
    ),
    (
        "OP_GREATERTHAN",
        "Pushes TRUE if the second item is greater than the top item",
        SymbolicOp::GreaterThan,
        |a, b| Some(StackValue::Bool(a > b)),
    ),
    (
        "OP_MIN",
        "Pushes the smaller of the top two items",
        SymbolicOp::Min,
        |a, b| Some(StackValue::Number(a.min(b))),
    ),
    (
        "OP_MAX",
        "Pushes the larger of the top two items",
        SymbolicOp::Max,
        |a, b| Some(StackValue::Number(a.max(b))),
    ),
];

fn numequal(a: i64, b: i64) -> Option<StackValue> {
    Some(StackValue::Bool(a == b))
}

pub(super) fn register(registry: &mut OpcodeRegistry) {
    registry.register(OpcodeDefinition::fixed(
        "OP_EQUAL",
        "Compares the top two stack items, pushes TRUE if equal, FALSE otherwise",
        OpcodeCategory::Bitwise,
        2,
        1,
        |items| equal("OP_EQUAL", &items[0], &items[1]),
    ));
    registry.register(OpcodeDefinition::fixed(
        "OP_EQUALVERIFY",
        "Same as OP_EQUAL, but removes the result and fails if it is FALSE",
        OpcodeCategory::Bitwise,
        2,
        0,
        |items| {
            let (a, b) = (&items[0], &items[1]);
            verify(
                "OP_EQUALVERIFY",
                &equality(a, b),
                format!("compared {} with {}", quote(a), quote(b)),
            )
        },
    ));

    for &(name, description, eval, symbolic) in UNARY_OPS {
        unary(registry, name, description, eval, symbolic);
    }
    for &(name, description, op, eval) in BINARY_OPS {
        binary(registry, name, description, op, eval);
    }

    registry.register(OpcodeDefinition::fixed(
        "OP_NUMEQUALVERIFY",
        "Same as OP_NUMEQUAL, but removes the result and fails if it is FALSE",
        OpcodeCategory::Arithmetic,
        2,
        0,
        |items| {
            let (a, b) = (&items[0], &items[1]);
            let (result, _) = evaluate(SymbolicOp::NumEqual, a, b, numequal);
            verify(
                "OP_NUMEQUALVERIFY",
                &result,
                format!("compared {} with {} numerically", quote(a), quote(b)),
            )
        },
    ));
}

/// Outcome of comparing two values byte-for-byte
///
/// Identical renderings are equal. Two different concrete values are not.
/// Anything involving a symbolic value stays symbolic.
pub(super) fn equality(a: &StackValue, b: &StackValue) -> StackValue {
    if a.to_string() == b.to_string() {
        StackValue::Bool(true)
    } else if a.is_concrete() && b.is_concrete() {
        StackValue::Bool(false)
    } else {
        StackValue::composed(SymbolicOp::Equal, vec![a.clone(), b.clone()])
    }
}

fn equal(name: &str, a: &StackValue, b: &StackValue) -> HandlerOutput {
    let result = equality(a, b);
    let verdict = match &result {
        StackValue::Bool(true) => "they are equal, pushed TRUE".to_string(),
        StackValue::Bool(false) => "they differ, pushed FALSE".to_string(),
        other => format!("outcome unknown, pushed {} (symbolic)", quote(other)),
    };
    HandlerOutput::produce(
        vec![result],
        format!("{}: compared {} and {}; {}", name, quote(a), quote(b), verdict),
    )
}

fn unary(
    registry: &mut OpcodeRegistry,
    name: &'static str,
    description: &'static str,
    eval: UnaryEval,
    symbolic: UnarySymbolic,
) {
    registry.register(OpcodeDefinition::fixed(
        name,
        description,
        OpcodeCategory::Arithmetic,
        1,
        1,
        move |items| {
            let x = &items[0];
            match x.as_integer().and_then(eval) {
                Some(result) => HandlerOutput::produce(
                    vec![result.clone()],
                    format!("{}: {} evaluates to {}", name, quote(x), result),
                ),
                None => {
                    let result = symbolic(x.clone());
                    HandlerOutput::produce(
                        vec![result.clone()],
                        format!(
                            "{}: {} is not a known integer, pushed {} (symbolic)",
                            name,
                            quote(x),
                            quote(&result)
                        ),
                    )
                }
            }
        },
    ));
}

fn binary(
    registry: &mut OpcodeRegistry,
    name: &'static str,
    description: &'static str,
    op: SymbolicOp,
    eval: BinaryEval,
) {
    registry.register(OpcodeDefinition::fixed(
        name,
        description,
        OpcodeCategory::Arithmetic,
        2,
        1,
        move |items| {
            let (a, b) = (&items[0], &items[1]);
            let (result, evaluated) = evaluate(op, a, b, eval);
            let mode = if evaluated { "evaluated" } else { "symbolic" };
            HandlerOutput::produce(
                vec![result.clone()],
                format!(
                    "{}: combined {} and {} into {} ({})",
                    name,
                    quote(a),
                    quote(b),
                    quote(&result),
                    mode
                ),
            )
        },
    ));
}

/// Evaluate when both operands are integers, otherwise compose symbolically
fn evaluate(
    op: SymbolicOp,
    a: &StackValue,
    b: &StackValue,
    eval: BinaryEval,
) -> (StackValue, bool) {
    let concrete = match (a.as_integer(), b.as_integer()) {
        (Some(x), Some(y)) => eval(x, y),
        _ => None,
    };

    match concrete {
        Some(result) => (result, true),
        None => (StackValue::composed(op, vec![a.clone(), b.clone()]), false),
    }
}
