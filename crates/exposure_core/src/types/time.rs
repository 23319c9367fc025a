//! Date type and the Actual/365.25 year fraction for exposure simulation.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate with checked
//!   day arithmetic
//! - `year_fraction_365_25`: the day count used to accrue spreads and
//!   integrate collateral balances over simulation periods
//!
//! # Examples
//!
//! ```
//! use exposure_core::types::time::{year_fraction_365_25, Date};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = start.add_days(30).unwrap();
//!
//! let yf = year_fraction_365_25(start, end);
//! assert!((yf - 30.0 / 365.25).abs() < 1e-12);
//! ```

use chrono::{Datelike, Days, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Number of days per year under the Actual/365.25 convention.
pub const DAYS_PER_YEAR_365_25: f64 = 365.25;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Simulation vertices are anchored on calendar dates; all period widths
/// are whole-day differences between two `Date` values.
///
/// # Examples
///
/// ```
/// use exposure_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let later = date.add_days(10).unwrap();
/// assert_eq!(later - date, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use exposure_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2024, 2, 30).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Wraps an existing `NaiveDate`.
    #[inline]
    pub fn from_naive(date: NaiveDate) -> Self {
        Date(date)
    }

    /// Returns the underlying NaiveDate.
    #[inline]
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the date `days` calendar days later (earlier if negative).
    ///
    /// # Errors
    ///
    /// `DateError::OutOfRange` if the result falls outside the calendar.
    ///
    /// ```
    /// use exposure_core::types::time::Date;
    ///
    /// let date = Date::from_ymd(2024, 1, 1).unwrap();
    /// assert!(date.add_days(i64::MAX).is_err());
    /// ```
    pub fn add_days(self, days: i64) -> Result<Self, DateError> {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        shifted
            .map(Date)
            .ok_or(DateError::OutOfRange { date: self, days })
    }

    /// Returns the date `days` calendar days earlier.
    ///
    /// Used to locate the margin (look-back) date of a collateral call.
    pub fn sub_days(self, days: i64) -> Result<Self, DateError> {
        let shifted = if days >= 0 {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        };
        shifted.map(Date).ok_or(DateError::OutOfRange {
            date: self,
            days: days.saturating_neg(),
        })
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Year fraction between two dates under Actual/365.25.
///
/// Returns a negative value when `start > end`.
///
/// ```
/// use exposure_core::types::time::{year_fraction_365_25, Date};
///
/// let t0 = Date::from_ymd(2024, 1, 1).unwrap();
/// let t1 = Date::from_ymd(2025, 1, 1).unwrap();
/// assert_eq!(year_fraction_365_25(t0, t0), 0.0);
/// // 366 days in 2024
/// assert!((year_fraction_365_25(t0, t1) - 366.0 / 365.25).abs() < 1e-12);
/// ```
#[inline]
pub fn year_fraction_365_25(start: Date, end: Date) -> f64 {
    (end - start) as f64 / DAYS_PER_YEAR_365_25
}
