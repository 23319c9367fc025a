//! Adjustment aggregation error types.

use thiserror::Error;

/// Errors raised while packaging or aggregating trajectory adjustments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdjustmentError {
    /// No trajectory results to aggregate.
    #[error("Aggregation requires at least one path")]
    Empty,

    /// A trajectory has a different vertex count from the first.
    #[error("Path {index} has {actual} vertices, expected {expected}")]
    VertexCountMismatch {
        /// Trajectory index
        index: usize,
        /// Vertex count of the first trajectory
        expected: usize,
        /// Vertex count of this trajectory
        actual: usize,
    },

    /// A trajectory's segment layout differs from the first.
    #[error("Path {0} has a different funding or netting segment layout")]
    SegmentMismatch(usize),

    /// A group path is not on the trajectory's market path.
    #[error("Group path {0} is on a different market path")]
    MarketPathMismatch(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_count_display() {
        let err = AdjustmentError::VertexCountMismatch {
            index: 3,
            actual: 4,
            expected: 5,
        };
        assert_eq!(err.to_string(), "Path 3 has 4 vertices, expected 5");
    }
}
