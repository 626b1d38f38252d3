//! Bitcoin Script Explainer - Type System
//!
//! - `token`: Lexical tokens (opcode or data) produced by the tokenizer
//! - `stack_value`: Symbolic stack values and their deterministic rendering
//! - `script_type`: Standard script pattern classifications
//! - `execution`: Step records and the aggregate execution result

pub mod execution;
pub mod script_type;
pub mod stack_value;
pub mod token;

// Re-export for convenience
pub use execution::{ExecutionResult, Step};
pub use script_type::{ScriptType, ScriptTypeInfo};
pub use stack_value::{StackValue, SymbolicOp};
pub use token::{Token, TokenKind};

/// Simulated stack, last element is the top
pub type Stack = Vec<StackValue>;
