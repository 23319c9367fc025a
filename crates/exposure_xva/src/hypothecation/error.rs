//! Hypothecation error types.

use exposure_core::bridge::InterpolationError;
use exposure_core::types::{Date, DateError};
use thiserror::Error;

/// Errors raised while estimating collateral or decomposing exposure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HypothecationError {
    /// Broken-date interpolation failed.
    #[error("Broken-date interpolation failed: {0}")]
    Interpolation(#[from] InterpolationError),

    /// A margin date could not be located on the calendar.
    #[error("Margin date out of range: {0}")]
    Date(#[from] DateError),

    /// A computed or supplied amount was NaN or infinite.
    #[error("Non-finite {quantity} at {date}")]
    NonFinite {
        /// Name of the quantity.
        quantity: &'static str,
        /// Date of the computation.
        date: Date,
    },

    /// The replication scheme needs a market edge and none was given.
    #[error("Replication scheme {scheme} requires a market edge at {date}")]
    MissingEdge {
        /// Scheme name.
        scheme: &'static str,
        /// Vertex date.
        date: Date,
    },

    /// Unknown replication or close-out scheme name or code.
    #[error("Unknown {kind} scheme: {value}")]
    UnknownScheme {
        /// `replication` or `close-out`.
        kind: &'static str,
        /// Rejected name or code.
        value: String,
    },

    /// Invalid scheme parameter.
    #[error("Invalid scheme parameter: {0}")]
    InvalidParameter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_edge_display() {
        let err = HypothecationError::MissingEdge {
            scheme: "burgard_kjaer_set_off",
            date: Date::from_ymd(2024, 5, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Replication scheme burgard_kjaer_set_off requires a market edge at 2024-05-01"
        );
    }

    #[test]
    fn test_from_interpolation_error() {
        let err: HypothecationError = InterpolationError::EmptyValues.into();
        assert!(err.to_string().starts_with("Broken-date interpolation failed"));
    }

    #[test]
    fn test_from_date_error() {
        let date = Date::from_ymd(2024, 1, 1).unwrap();
        let err: HypothecationError = DateError::OutOfRange { date, days: -10 }.into();
        assert_eq!(
            err.to_string(),
            "Margin date out of range: Date out of range: 2024-01-01 shifted by -10 days"
        );
    }
}
