//! Calendar types.
//!
//! This module provides:
//! - `time`: `Date` and the Actual/365.25 year fraction for vertex anchoring and period widths
//! - `error`: `DateError` for date construction and parsing
//!
//! # Re-exports
//!
//! - [`Date`], [`year_fraction_365_25`], [`DAYS_PER_YEAR_365_25`] from `time`
//! - [`DateError`] from `error`

pub mod error;
pub mod time;

pub use error::DateError;
pub use time::{year_fraction_365_25, Date, DAYS_PER_YEAR_365_25};
