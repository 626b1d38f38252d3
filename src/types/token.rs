//! Lexical tokens produced by the tokenizer
//!
//! A token is either an opcode (canonical `OP_` form, known or not) or a data
//! literal. Tokens are created once and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Largest value a small-integer push (OP_0..OP_16 or bare decimal) may carry
pub const MAX_SMALL_INT: i64 = 16;

/// Lexical class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    Opcode,
    Data,
}

/// One whitespace-separated word of a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Text exactly as it appeared in the input
    pub raw: String,
    pub kind: TokenKind,
    /// Normalised form: uppercase for opcodes, lowercase for hex data,
    /// verbatim for everything else
    pub value: String,
    /// Zero-based index within the script
    pub position: usize,
}

impl Token {
    /// Opcode token, canonicalised to uppercase with the `OP_` prefix
    pub fn opcode(raw: &str, position: usize) -> Self {
        let upper = raw.to_ascii_uppercase();
        let value = if upper.starts_with("OP_") {
            upper
        } else {
            format!("OP_{}", upper)
        };
        Self {
            raw: raw.to_string(),
            kind: TokenKind::Opcode,
            value,
            position,
        }
    }

    pub fn data(raw: &str, value: String, position: usize) -> Self {
        Self {
            raw: raw.to_string(),
            kind: TokenKind::Data,
            value,
            position,
        }
    }

    pub fn is_opcode(&self) -> bool {
        self.kind == TokenKind::Opcode
    }

    pub fn is_data(&self) -> bool {
        self.kind == TokenKind::Data
    }

    /// True when this token is the named opcode (aliases are not resolved)
    pub fn is(&self, opcode: &str) -> bool {
        self.is_opcode() && self.value == opcode
    }

    /// Interpret the token as a small-integer push value
    ///
    /// Recognises bare decimal data (`0`..`16`) and the constant opcodes
    /// `OP_0`..`OP_16`, `OP_FALSE` and `OP_TRUE`.
    pub fn small_int(&self) -> Option<i64> {
        let value = match self.kind {
            TokenKind::Data => {
                if !self.value.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                self.value.parse::<i64>().ok()?
            }
            TokenKind::Opcode => match self.value.as_str() {
                "OP_FALSE" => 0,
                "OP_TRUE" => 1,
                other => other.strip_prefix("OP_")?.parse::<i64>().ok()?,
            },
        };

        (0..=MAX_SMALL_INT).contains(&value).then_some(value)
    }
}
