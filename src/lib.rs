//! Bitcoin Script Explainer
//!
//! Educational, non-cryptographic interpreter for Bitcoin Script in ASM form.
//! A script is tokenised, executed symbolically against a simulated stack,
//! classified into a standard pattern and summarised in plain English.

pub mod cli;
pub mod config;
pub mod detection;
pub mod engine;
pub mod errors;
pub mod explainer;
pub mod opcodes;
pub mod tokenizer;
pub mod types;

pub use errors::{AppError, AppResult};
pub use explainer::explain;
pub use opcodes::{list_opcodes, opcode_info};
