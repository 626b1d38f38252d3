pub mod explain;
pub mod interactive;
pub mod opcodes;
