//! Netting error types.

use thiserror::Error;

/// Errors raised while assembling collateral, funding and credit-debt
/// group paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NettingError {
    /// A collateral group path needs at least two vertices.
    #[error("Collateral group path needs at least 2 vertices, got {0}")]
    TooFewVertices(usize),

    /// Vertex count differs from the market path.
    #[error("Vertex count mismatch: market path has {expected}, got {actual}")]
    LengthMismatch {
        /// Market path vertex count.
        expected: usize,
        /// Collateral group vertex count.
        actual: usize,
    },

    /// Vertex dates do not strictly increase.
    #[error("Collateral group vertex dates must be strictly increasing at index {0}")]
    NonIncreasingDates(usize),

    /// A vertex date differs from the market path date at the same index.
    #[error("Collateral group vertex date differs from market path at index {0}")]
    DateMismatch(usize),

    /// A group digest was built from no paths.
    #[error("Group path requires at least one collateral group path")]
    EmptyGroup,

    /// Paths of a group do not share the same market path.
    #[error("Collateral group path {0} is on a different market path")]
    MarketPathMismatch(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_display() {
        let err = NettingError::LengthMismatch {
            expected: 5,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "Vertex count mismatch: market path has 5, got 4"
        );
    }
}
