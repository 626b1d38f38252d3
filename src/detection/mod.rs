//! Shared script type detection logic
//!
//! Detection works on the token sequence alone, never on execution results,
//! so a script that halts early is still classified. A recognised locking
//! template also yields the symbolic unlocking data it is traced against.

pub mod patterns;

// Re-export for convenience
pub use patterns::{detect, unlocking_placeholders, Detection};
