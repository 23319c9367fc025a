//! Market universe error types.

use thiserror::Error;

use crate::types::{Date, DateError};

/// Errors raised while building market vertices, edges and paths.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UniverseError {
    /// A numeric vertex field was NaN or infinite.
    #[error("Non-finite market field '{field}' at {date}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// Anchor date of the vertex.
        date: Date,
    },

    /// A probability-like field fell outside [0, 1].
    #[error("Market field '{field}' at {date} must lie in [0, 1], got {value}")]
    OutOfUnitInterval {
        /// Name of the offending field.
        field: &'static str,
        /// Anchor date of the vertex.
        date: Date,
        /// The rejected value.
        value: f64,
    },

    /// The overnight replicator (numeraire accumulator) was not strictly positive.
    #[error("Overnight replicator at {date} must be positive, got {value}")]
    NonPositiveReplicator {
        /// Anchor date of the vertex.
        date: Date,
        /// The rejected value.
        value: f64,
    },

    /// An edge finish date did not strictly follow its start date.
    #[error("Edge finish {finish} must be after start {start}")]
    InvalidEdge {
        /// Start vertex date.
        start: Date,
        /// Finish vertex date.
        finish: Date,
    },

    /// A path contained no vertices.
    #[error("Market path must contain at least one vertex")]
    EmptyPath,

    /// Vertex dates were not strictly increasing.
    #[error("Vertex dates must be strictly increasing: {previous} then {current} at index {index}")]
    NonIncreasingDates {
        /// Index of the offending vertex.
        index: usize,
        /// Date of the preceding vertex.
        previous: Date,
        /// Date of the offending vertex.
        current: Date,
    },

    /// No vertex is anchored on the requested date.
    #[error("No market vertex anchored at {0}")]
    UnknownDate(Date),

    /// Calendar arithmetic on a vertex date failed.
    #[error("Calendar arithmetic failed: {0}")]
    Date(#[from] DateError),

    /// The vertex generator failed.
    #[error("Vertex generation failed: {0}")]
    Generation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_increasing_display() {
        let err = UniverseError::NonIncreasingDates {
            index: 2,
            previous: Date::from_ymd(2024, 3, 1).unwrap(),
            current: Date::from_ymd(2024, 2, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Vertex dates must be strictly increasing: 2024-03-01 then 2024-02-01 at index 2"
        );
    }

    #[test]
    fn test_replicator_display() {
        let err = UniverseError::NonPositiveReplicator {
            date: Date::from_ymd(2024, 1, 1).unwrap(),
            value: 0.0,
        };
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_date_error_converts() {
        let date = Date::from_ymd(2024, 1, 1).unwrap();
        let err: UniverseError = date.add_days(i64::MAX).unwrap_err().into();
        assert!(matches!(err, UniverseError::Date(DateError::OutOfRange { .. })));
    }
}
