//! Error types for geometric construction.

use geokit_angle::AngleError;
use thiserror::Error;

/// Errors raised when a geometric value cannot be built from its inputs.
///
/// Queries that simply find nothing (no intersection, a culled extent)
/// return `None` or an empty list instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeomError {
    /// A precondition on an argument was violated: zero-length direction,
    /// zero normal, non-positive radius, coincident endpoints, empty input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A linear system has no unique solution.
    #[error("singular system: {0}")]
    Singular(String),

    /// An angle argument was rejected.
    #[error(transparent)]
    Angle(#[from] AngleError),
}

impl GeomError {
    /// Shorthand for [`GeomError::InvalidArgument`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeomError>;
