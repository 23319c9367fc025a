//! Holdings error types.

use exposure_core::types::Date;
use thiserror::Error;

use crate::specification::PositionGroupId;

/// Errors raised while valuing or registering position groups.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HoldingsError {
    /// A position group value was NaN or infinite.
    #[error("Non-finite value for position group {group} at {date}")]
    NonFiniteValue {
        /// Offending group.
        group: PositionGroupId,
        /// Vertex date.
        date: Date,
    },

    /// Two position groups share an identifier.
    #[error("Duplicate position group: {0}")]
    DuplicateGroup(PositionGroupId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_display() {
        let err = HoldingsError::DuplicateGroup(PositionGroupId::new("PG1"));
        assert_eq!(err.to_string(), "Duplicate position group: PG1");
    }
}
