//! Unit Tests Module
//!
//! Component-level tests for the tokenizer, opcode registry, execution engine
//! and type detector, exercised through the public API.

pub mod detection;
pub mod engine;
pub mod opcodes;
