//! Error types for filter design.

use thiserror::Error;

/// Filter design error.
///
/// Non-convergence is not an error: it is reported through
/// [`RemezDesign::converged`](crate::RemezDesign::converged).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    /// The filter specification is unusable as given.
    #[error("invalid filter specification: {0}")]
    InvalidSpec(String),

    /// The deduplicated grid cannot hold a full reference set.
    #[error("frequency grid has {points} points, reference set needs {required}")]
    GridTooSmall { points: usize, required: usize },

    /// The regularised least-squares solve failed.
    #[error("numerical failure: {0}")]
    NumericalFailure(String),
}

/// Result type alias for design operations.
pub type Result<T> = std::result::Result<T, DesignError>;
