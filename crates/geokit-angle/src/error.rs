//! Error types for angle construction, arithmetic and formatting.

use thiserror::Error;

/// Errors that can occur when building or formatting angles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AngleError {
    /// A numeric argument fell outside its valid range.
    #[error("value out of range: {0}")]
    OutOfRange(String),

    /// A degrees-minutes-seconds string did not match the grammar.
    #[error("cannot parse angle: {0}")]
    Parse(String),

    /// Division by an angle of zero degrees.
    #[error("division by a zero angle")]
    DivideByZero,
}

impl AngleError {
    pub(crate) fn out_of_range(what: &str, value: impl std::fmt::Display) -> Self {
        Self::OutOfRange(format!("{what} = {value}"))
    }
}

/// Result type for angle operations.
pub type Result<T> = std::result::Result<T, AngleError>;
