//! Error types for asklink modem

use thiserror::Error;

/// Modem error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModemError {
    #[error("Invalid system configuration: {msg}")]
    InvalidConfig { msg: String },
    
    #[error("Precondition violated: {msg}")]
    PreconditionViolation { msg: String },
    
    #[error("Invalid parameters: {msg}")]
    InvalidParameters { msg: String },
    
    #[error("Core error: {0}")]
    Core(#[from] asklink_core::CoreError),
}

/// Result type for asklink modem operations
pub type Result<T> = std::result::Result<T, ModemError>;
