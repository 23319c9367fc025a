//! Broken-date interpolation error types.

use thiserror::Error;

use crate::types::Date;

/// Errors raised while building or evaluating a broken-date interpolator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpolationError {
    /// Fewer anchors than the scheme requires.
    #[error("Insufficient anchors: got {got}, need {need}")]
    InsufficientAnchors {
        /// Anchors supplied.
        got: usize,
        /// Anchors required.
        need: usize,
    },

    /// Anchor dates do not strictly increase.
    #[error("Anchor dates must be strictly increasing at index {index}")]
    NonIncreasingDates {
        /// Index of the first anchor that does not advance.
        index: usize,
    },

    /// An anchor carries no values.
    #[error("Anchor value vector is empty")]
    EmptyValues,

    /// Anchors carry different lane counts.
    #[error("Lane count mismatch: expected {expected}, got {got}")]
    LaneMismatch {
        /// Lane count of the first anchor.
        expected: usize,
        /// Lane count of the offending anchor.
        got: usize,
    },

    /// An anchor value is NaN or infinite.
    #[error("Non-finite anchor value at anchor {anchor}, lane {lane}")]
    NonFinite {
        /// Anchor index.
        anchor: usize,
        /// Lane index.
        lane: usize,
    },

    /// Query date outside the bracket.
    #[error("Date {date} outside interpolation bracket [{earliest}, {latest}]")]
    OutOfBracket {
        /// Query date.
        date: Date,
        /// Earliest anchor date.
        earliest: Date,
        /// Latest anchor date.
        latest: Date,
    },

    /// Requested lane does not exist.
    #[error("Lane {lane} out of range for {lanes} lanes")]
    LaneOutOfRange {
        /// Requested lane.
        lane: usize,
        /// Available lanes.
        lanes: usize,
    },

    /// Unknown broken-date scheme name or code.
    #[error("Unknown broken-date scheme: {0}")]
    UnknownScheme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bracket_display() {
        let earliest = Date::from_ymd(2024, 1, 1).unwrap();
        let err = InterpolationError::OutOfBracket {
            date: earliest.sub_days(1).unwrap(),
            earliest,
            latest: earliest.add_days(30).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Date 2023-12-31 outside interpolation bracket [2024-01-01, 2024-01-31]"
        );
    }
}
