use thiserror::Error;

/// Application-wide error type - single point of truth
///
/// Only clearly invalid input reaches the caller as an error. Script logic
/// failures (unknown opcodes, stack underflow, failed verification) are
/// recorded as failure steps inside a normal `ExecutionResult`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Input could not be tokenised (empty, or contains an implausible token)
    #[error("Malformed script: {0}")]
    MalformedScript(String),

    /// The script was explained but its execution failed (CLI exit status)
    #[error("Script execution failed: {0}")]
    ScriptFailed(String),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Raised by the opcode registry when a name has no handler
///
/// The execution engine converts this into a terminal step rather than
/// propagating it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{opcode}: unsupported opcode")]
pub struct UnknownOpcodeError {
    pub opcode: String,
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
