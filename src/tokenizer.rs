//! Tokenizer for Bitcoin Script in ASM form
//!
//! Splits on whitespace and classifies each word:
//! - words carrying the `OP_` prefix (any case) are opcodes, known or not
//! - decimal integers are data, so `2` stays a push rather than `OP_2`
//! - bare registry names such as `dup` or `checksig` are opcodes
//! - hex (optionally `0x`-prefixed), decimal integers and placeholder
//!   identifiers such as `<sig>` are data
//! - anything else makes the whole script malformed

use crate::errors::{AppError, AppResult};
use crate::opcodes::OpcodeRegistry;
use crate::types::Token;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEX_LITERAL: Regex = Regex::new(r"^(0[xX])?[0-9a-fA-F]+$").unwrap();
    static ref DECIMAL_LITERAL: Regex = Regex::new(r"^-?[0-9]+$").unwrap();
    static ref PLACEHOLDER: Regex = Regex::new(r"^[A-Za-z0-9_<>]+$").unwrap();
}

/// Split a script into tokens
///
/// # Errors
/// * `AppError::MalformedScript` if the script is empty/whitespace-only or
///   contains a word that is neither an opcode nor plausible data
///
/// # Examples
/// ```
/// use script_explainer::tokenizer::tokenize;
///
/// let tokens = tokenize("OP_DUP OP_HASH160 ab6807 OP_EQUALVERIFY OP_CHECKSIG").unwrap();
/// assert_eq!(tokens.len(), 5);
/// assert!(tokens[0].is_opcode());
/// assert!(tokens[2].is_data());
/// ```
pub fn tokenize(script: &str) -> AppResult<Vec<Token>> {
    if script.trim().is_empty() {
        return Err(AppError::MalformedScript(
            "empty script provided".to_string(),
        ));
    }

    script
        .split_whitespace()
        .enumerate()
        .map(|(position, word)| classify(word, position))
        .collect()
}

fn classify(word: &str, position: usize) -> AppResult<Token> {
    if word
        .get(..3)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("OP_"))
    {
        return Ok(Token::opcode(word, position));
    }

    if DECIMAL_LITERAL.is_match(word) {
        return Ok(Token::data(word, word.to_string(), position));
    }

    if is_bare_opcode(word) {
        return Ok(Token::opcode(word, position));
    }

    if HEX_LITERAL.is_match(word) {
        return Ok(Token::data(word, word.to_ascii_lowercase(), position));
    }

    if PLACEHOLDER.is_match(word) {
        return Ok(Token::data(word, word.to_string(), position));
    }

    Err(AppError::MalformedScript(format!(
        "invalid token '{}' at position {} - must be an opcode (OP_*) or hex data",
        word, position
    )))
}

fn is_bare_opcode(word: &str) -> bool {
    word.chars().all(|c| c.is_ascii_alphanumeric())
        && OpcodeRegistry::global().contains(&format!("OP_{}", word))
}

/// Non-fatal observations about a tokenised script
///
/// Flags a script that is a lone OP_RETURN with no payload, and every opcode
/// the registry does not support.
pub fn parse_warnings(tokens: &[Token]) -> Vec<String> {
    let mut warnings = Vec::new();

    if let [only] = tokens {
        if only.is("OP_RETURN") {
            warnings.push("Script contains only OP_RETURN with no data payload".to_string());
        }
    }

    let registry = OpcodeRegistry::global();
    for token in tokens.iter().filter(|t| t.is_opcode()) {
        if !registry.contains(&token.value) {
            warnings.push(format!(
                "Unknown opcode '{}' at position {} - execution will halt there",
                token.value, token.position
            ));
        }
    }

    warnings
}
