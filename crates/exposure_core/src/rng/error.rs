//! Unit-draw generation error types.

use thiserror::Error;

/// Errors raised while validating a factor correlation matrix or shaping
/// a draw matrix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CorrelationError {
    /// Matrix is not positive definite.
    #[error("Correlation matrix is not positive definite")]
    NotPositiveDefinite,

    /// Element count does not match the declared dimension.
    #[error("Invalid matrix dimensions: expected {expected} elements, got {got}")]
    InvalidDimensions {
        /// Expected element count.
        expected: usize,
        /// Supplied element count.
        got: usize,
    },

    /// Diagonal element is not one.
    #[error("Diagonal element at index {index} is {value}, expected 1.0")]
    InvalidDiagonal {
        /// Diagonal index.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// Matrix is not symmetric.
    #[error("Matrix is not symmetric at ({i}, {j})")]
    NotSymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
    },

    /// Off-diagonal correlation outside [-1, 1].
    #[error("Correlation at ({i}, {j}) is {value}, must be in [-1, 1]")]
    OutOfRange {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
        /// Offending value.
        value: f64,
    },

    /// Correlation dimension differs from the factor count of the draws.
    #[error("Correlation dimension {correlation} does not match factor count {factors}")]
    FactorMismatch {
        /// Dimension of the correlation matrix.
        correlation: usize,
        /// Number of factors per draw row.
        factors: usize,
    },
}
