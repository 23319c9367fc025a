//! Error types for date construction and parsing.

use thiserror::Error;

use super::time::Date;

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
/// - `OutOfRange`: Day arithmetic left the representable calendar
///
/// # Examples
/// ```
/// use exposure_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component
        month: u32,
        /// Day component
        day: u32,
    },

    /// Failed to parse date string
    #[error("Failed to parse date: {0}")]
    ParseError(String),

    /// Shifting a date by a day count left the calendar range
    #[error("Date out of range: {date} shifted by {days} days")]
    OutOfRange {
        /// Date being shifted
        date: Date,
        /// Signed day shift
        days: i64,
    },
}
