//! Specification error types.

use thiserror::Error;

/// Errors raised while validating collateral and counterparty group terms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecificationError {
    /// Invalid collateral group terms.
    #[error("Invalid collateral group specification: {0}")]
    InvalidCollateralGroup(String),

    /// Invalid counterparty group terms.
    #[error("Invalid counterparty group specification: {0}")]
    InvalidCounterpartyGroup(String),

    /// Unknown credit rating label.
    #[error("Unknown credit rating: {0}")]
    UnknownRating(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpecificationError::InvalidCollateralGroup(
            "Minimum transfer amount must be non-negative".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "Invalid collateral group specification: Minimum transfer amount must be non-negative"
        );
    }
}
