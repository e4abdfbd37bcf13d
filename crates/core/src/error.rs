//! Error types for asklink core

use thiserror::Error;

/// Core error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid sample rate: {rate}")]
    InvalidSampleRate { rate: f64 },
    
    #[error("Buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
    
    #[error("Invalid filter parameters: {msg}")]
    InvalidFilterParameters { msg: String },
}

/// Result type for asklink core operations
pub type Result<T> = std::result::Result<T, CoreError>;
