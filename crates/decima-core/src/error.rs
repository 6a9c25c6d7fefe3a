//! Error types for Decima

use thiserror::Error;

/// Core Decima errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecimaError {
    // Conversion errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Non-finite value for {0}")]
    NonFinite(&'static str),

    #[error("Field {field} out of range: {value} > {max}")]
    FieldOutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },

    // Runtime errors
    #[error("Tick task failed: {0}")]
    TaskFailed(String),
}

/// Result type for Decima operations
pub type DecimaResult<T> = Result<T, DecimaError>;
