//! Broken-date interpolation between simulation vertices.
//!
//! Collateral calls look back a margin period of risk from each vertex,
//! landing on dates the simulation never visited. The interpolators here
//! estimate position values on those broken dates from the two or three
//! most recent (date, value-vector) anchors.
//!
//! - [`LinearTimeInterpolator`]: linear in elapsed time
//! - [`SquareRootOfTimeInterpolator`]: weight grows with the square root of elapsed time
//! - [`Brownian3PInterpolator`]: Brownian bridge pinned at three anchors
//!
//! [`BrokenDateScheme`] selects one of them and builds a [`BrokenDateBridge`]
//! for a given vertex, or nothing when the vertex has too little history.
//!
//! Interpolators never extrapolate: dates outside the anchor bracket fail.

pub mod brownian_3p;
pub mod error;
pub mod linear_time;
pub mod scheme;
pub mod sqrt_time;

pub use brownian_3p::Brownian3PInterpolator;
pub use error::InterpolationError;
pub use linear_time::LinearTimeInterpolator;
pub use scheme::{BrokenDateBridge, BrokenDateScheme};
pub use sqrt_time::SquareRootOfTimeInterpolator;

use crate::types::Date;

/// A dated value vector, one lane per interpolated quantity.
#[derive(Clone, Debug, PartialEq)]
pub struct BridgeAnchor {
    date: Date,
    values: Vec<f64>,
}

impl BridgeAnchor {
    /// Creates an anchor. Validation happens when anchors are combined
    /// into an interpolator.
    pub fn new(date: Date, values: Vec<f64>) -> Self {
        Self { date, values }
    }

    /// Single-lane anchor.
    pub fn scalar(date: Date, value: f64) -> Self {
        Self::new(date, vec![value])
    }

    /// Anchor date.
    #[inline]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Anchor values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of lanes.
    #[inline]
    pub fn lanes(&self) -> usize {
        self.values.len()
    }
}

/// Estimates value vectors on dates between simulation anchors.
pub trait BrokenDateInterpolator: Send + Sync {
    /// Value vector at `date`.
    ///
    /// # Errors
    ///
    /// `InterpolationError::OutOfBracket` if `date` lies outside
    /// `[earliest(), latest()]`.
    fn interpolate(&self, date: Date) -> Result<Vec<f64>, InterpolationError>;

    /// Earliest anchor date.
    fn earliest(&self) -> Date;

    /// Latest anchor date.
    fn latest(&self) -> Date;

    /// Number of value lanes.
    fn lanes(&self) -> usize;

    /// Value of one lane at `date`.
    fn interpolate_lane(&self, date: Date, lane: usize) -> Result<f64, InterpolationError> {
        let lanes = self.lanes();
        self.interpolate(date)?
            .get(lane)
            .copied()
            .ok_or(InterpolationError::LaneOutOfRange { lane, lanes })
    }

    /// Value at `date` for a single-lane interpolator.
    fn interpolate_scalar(&self, date: Date) -> Result<f64, InterpolationError> {
        if self.lanes() != 1 {
            return Err(InterpolationError::LaneMismatch {
                expected: 1,
                got: self.lanes(),
            });
        }
        self.interpolate_lane(date, 0)
    }

    /// Whether `date` lies inside the anchor bracket.
    fn contains(&self, date: Date) -> bool {
        self.earliest() <= date && date <= self.latest()
    }
}

/// Checks anchor count, date order, lane shape and finiteness.
pub(crate) fn validate_anchors(
    anchors: &[BridgeAnchor],
    need: usize,
) -> Result<(), InterpolationError> {
    if anchors.len() != need {
        return Err(InterpolationError::InsufficientAnchors {
            got: anchors.len(),
            need,
        });
    }
    let lanes = anchors[0].lanes();
    if lanes == 0 {
        return Err(InterpolationError::EmptyValues);
    }
    for (index, anchor) in anchors.iter().enumerate() {
        if anchor.lanes() != lanes {
            return Err(InterpolationError::LaneMismatch {
                expected: lanes,
                got: anchor.lanes(),
            });
        }
        if let Some(lane) = anchor.values.iter().position(|v| !v.is_finite()) {
            return Err(InterpolationError::NonFinite {
                anchor: index,
                lane,
            });
        }
        if index > 0 && anchor.date <= anchors[index - 1].date {
            return Err(InterpolationError::NonIncreasingDates { index });
        }
    }
    Ok(())
}

/// Fails unless `date` lies in `[earliest, latest]`.
pub(crate) fn check_bracket(
    date: Date,
    earliest: Date,
    latest: Date,
) -> Result<(), InterpolationError> {
    if date < earliest || date > latest {
        return Err(InterpolationError::OutOfBracket {
            date,
            earliest,
            latest,
        });
    }
    Ok(())
}

/// Elapsed fraction of `[lo, hi]` at `date`, measured in calendar days.
#[inline]
pub(crate) fn elapsed_fraction(lo: Date, hi: Date, date: Date) -> f64 {
    (date - lo) as f64 / (hi - lo) as f64
}

/// Blends two value vectors, `lo + weight * (hi - lo)` lane by lane.
pub(crate) fn blend(lo: &[f64], hi: &[f64], weight: f64) -> Vec<f64> {
    lo.iter()
        .zip(hi)
        .map(|(a, b)| a + weight * (b - a))
        .collect()
}
