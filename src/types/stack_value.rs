//! Symbolic stack values
//!
//! Values are never hashed or verified for real. Crypto opcodes wrap their
//! operands in a [`StackValue::Composed`] node and every value renders through
//! a single [`fmt::Display`] implementation, so the same construction history
//! always produces byte-identical text.

use serde::{Serialize, Serializer};
use std::fmt;

/// Operation recorded inside a composed symbolic value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolicOp {
    Ripemd160,
    Sha1,
    Sha256,
    Hash160,
    Hash256,
    Equal,
    NumEqual,
    CheckSig,
    CheckMultiSig,
    Size,
    Add,
    Sub,
    Negate,
    Not,
    BoolAnd,
    BoolOr,
    LessThan,
    GreaterThan,
    Min,
    Max,
}

impl SymbolicOp {
    pub fn name(&self) -> &'static str {
        match self {
            SymbolicOp::Ripemd160 => "RIPEMD160",
            SymbolicOp::Sha1 => "SHA1",
            SymbolicOp::Sha256 => "SHA256",
            SymbolicOp::Hash160 => "HASH160",
            SymbolicOp::Hash256 => "HASH256",
            SymbolicOp::Equal => "EQUAL",
            SymbolicOp::NumEqual => "NUMEQUAL",
            SymbolicOp::CheckSig => "CHECKSIG",
            SymbolicOp::CheckMultiSig => "CHECKMULTISIG",
            SymbolicOp::Size => "SIZE",
            SymbolicOp::Add => "ADD",
            SymbolicOp::Sub => "SUB",
            SymbolicOp::Negate => "NEGATE",
            SymbolicOp::Not => "NOT",
            SymbolicOp::BoolAnd => "BOOLAND",
            SymbolicOp::BoolOr => "BOOLOR",
            SymbolicOp::LessThan => "LESSTHAN",
            SymbolicOp::GreaterThan => "GREATERTHAN",
            SymbolicOp::Min => "MIN",
            SymbolicOp::Max => "MAX",
        }
    }

    /// Infix symbol for operations rendered as `(a + b)`
    fn infix(&self) -> Option<&'static str> {
        match self {
            SymbolicOp::Add => Some("+"),
            SymbolicOp::Sub => Some("-"),
            _ => None,
        }
    }
}

/// A value on the simulated stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackValue {
    /// Data exactly as pushed by the script (hex, decimal or placeholder)
    Literal(String),
    /// Result of a constant opcode or of concrete arithmetic
    Number(i64),
    /// Result of a comparison whose outcome is known
    Bool(bool),
    /// Symbolic result of an operation that was not evaluated
    Composed {
        op: SymbolicOp,
        operands: Vec<StackValue>,
    },
}

impl StackValue {
    pub fn literal(text: impl Into<String>) -> Self {
        StackValue::Literal(text.into())
    }

    pub fn composed(op: SymbolicOp, operands: Vec<StackValue>) -> Self {
        StackValue::Composed { op, operands }
    }

    /// Integer interpretation used by arithmetic opcodes
    ///
    /// Only bare decimal literals count; hex such as `ab68` stays opaque.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            StackValue::Number(n) => Some(*n),
            StackValue::Bool(b) => Some(i64::from(*b)),
            StackValue::Literal(text) => parse_decimal(text),
            StackValue::Composed { .. } => None,
        }
    }

    /// Whether the value's content is actually known
    ///
    /// Placeholders such as `<sig>` and composed values are symbolic.
    pub fn is_concrete(&self) -> bool {
        match self {
            StackValue::Number(_) | StackValue::Bool(_) => true,
            StackValue::Literal(text) => parse_decimal(text).is_some() || is_hex(text),
            StackValue::Composed { .. } => false,
        }
    }

    /// Known truth value, or `None` when the value is symbolic
    ///
    /// Zero, `FALSE` and all-zero hex are false. Symbolic values are reported
    /// as unknown and callers assume they succeed.
    pub fn truth(&self) -> Option<bool> {
        match self {
            StackValue::Number(n) => Some(*n != 0),
            StackValue::Bool(b) => Some(*b),
            StackValue::Literal(text) => {
                if text.is_empty() || text.eq_ignore_ascii_case("false") {
                    return Some(false);
                }
                if text.eq_ignore_ascii_case("true") {
                    return Some(true);
                }
                if let Some(n) = parse_decimal(text) {
                    return Some(n != 0);
                }
                if is_hex(text) {
                    let digits = strip_hex_prefix(text);
                    return Some(digits.chars().any(|c| c != '0'));
                }
                None
            }
            StackValue::Composed { .. } => None,
        }
    }

    /// Truthiness with symbolic values assumed valid
    pub fn is_truthy(&self) -> bool {
        self.truth().unwrap_or(true)
    }

    /// Byte length for concrete hex literals
    pub fn byte_len(&self) -> Option<usize> {
        match self {
            StackValue::Literal(text) if is_hex(text) && parse_decimal(text).is_none() => {
                hex::decode(strip_hex_prefix(text)).ok().map(|bytes| bytes.len())
            }
            _ => None,
        }
    }
}

impl fmt::Display for StackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackValue::Literal(text) => write!(f, "{}", text),
            StackValue::Number(n) => write!(f, "{}", n),
            StackValue::Bool(true) => write!(f, "TRUE"),
            StackValue::Bool(false) => write!(f, "FALSE"),
            StackValue::Composed { op, operands } => match (op.infix(), operands.as_slice()) {
                (Some(symbol), [lhs, rhs]) => write!(f, "({} {} {})", lhs, symbol, rhs),
                _ => {
                    write!(f, "{}(", op.name())?;
                    for (i, operand) in operands.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", operand)?;
                    }
                    write!(f, ")")
                }
            },
        }
    }
}

/// Stack values serialise as their rendered text
impl Serialize for StackValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn parse_decimal(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<i64>().ok()
}

fn strip_hex_prefix(text: &str) -> &str {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

fn is_hex(text: &str) -> bool {
    let digits = strip_hex_prefix(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit())
}
