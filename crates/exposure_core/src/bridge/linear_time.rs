//! Linear-in-time broken-date interpolation.

use super::error::InterpolationError;
use super::{
    blend, check_bracket, elapsed_fraction, validate_anchors, BridgeAnchor,
    BrokenDateInterpolator,
};
use crate::types::Date;

/// Interpolates linearly in elapsed time between two anchors.
///
/// ```text
/// v(t) = v1 + (t - t1) / (t2 - t1) * (v2 - v1)
/// ```
///
/// # Examples
///
/// ```
/// use exposure_core::bridge::{BridgeAnchor, BrokenDateInterpolator, LinearTimeInterpolator};
/// use exposure_core::types::Date;
///
/// let t1 = Date::from_ymd(2024, 1, 1).unwrap();
/// let t2 = t1.add_days(10).unwrap();
/// let interp = LinearTimeInterpolator::new(
///     BridgeAnchor::scalar(t1, 100.0),
///     BridgeAnchor::scalar(t2, 80.0),
/// )
/// .unwrap();
/// assert_eq!(interp.interpolate_scalar(t1.add_days(5).unwrap()).unwrap(), 90.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LinearTimeInterpolator {
    lo: BridgeAnchor,
    hi: BridgeAnchor,
}

impl LinearTimeInterpolator {
    /// Creates the interpolator from its two bracketing anchors.
    pub fn new(lo: BridgeAnchor, hi: BridgeAnchor) -> Result<Self, InterpolationError> {
        let anchors = [lo, hi];
        validate_anchors(&anchors, 2)?;
        let [lo, hi] = anchors;
        Ok(Self { lo, hi })
    }
}

impl BrokenDateInterpolator for LinearTimeInterpolator {
    fn interpolate(&self, date: Date) -> Result<Vec<f64>, InterpolationError> {
        check_bracket(date, self.lo.date(), self.hi.date())?;
        if date == self.hi.date() {
            return Ok(self.hi.values().to_vec());
        }
        Ok(blend(
            self.lo.values(),
            self.hi.values(),
            elapsed_fraction(self.lo.date(), self.hi.date(), date),
        ))
    }

    fn earliest(&self) -> Date {
        self.lo.date()
    }

    fn latest(&self) -> Date {
        self.hi.date()
    }

    fn lanes(&self) -> usize {
        self.lo.lanes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(days: i64) -> Date {
        Date::from_ymd(2024, 1, 1).unwrap().add_days(days).unwrap()
    }

    #[test]
    fn test_exact_at_anchors() {
        let interp = LinearTimeInterpolator::new(
            BridgeAnchor::new(d(0), vec![0.1, -3.0]),
            BridgeAnchor::new(d(7), vec![0.3, 4.0]),
        )
        .unwrap();
        assert_eq!(interp.interpolate(d(0)).unwrap(), vec![0.1, -3.0]);
        assert_eq!(interp.interpolate(d(7)).unwrap(), vec![0.3, 4.0]);
    }

    #[test]
    fn test_multi_lane_midpoint() {
        let interp = LinearTimeInterpolator::new(
            BridgeAnchor::new(d(0), vec![0.0, 10.0]),
            BridgeAnchor::new(d(4), vec![4.0, 2.0]),
        )
        .unwrap();
        let v = interp.interpolate(d(1)).unwrap();
        assert_relative_eq!(v[0], 1.0);
        assert_relative_eq!(v[1], 8.0);
        assert_relative_eq!(interp.interpolate_lane(d(2), 1).unwrap(), 6.0);
        assert!(interp.interpolate_scalar(d(2)).is_err());
    }

    #[test]
    fn test_no_extrapolation() {
        let interp = LinearTimeInterpolator::new(
            BridgeAnchor::scalar(d(0), 1.0),
            BridgeAnchor::scalar(d(4), 2.0),
        )
        .unwrap();
        assert!(matches!(
            interp.interpolate(d(-1)),
            Err(InterpolationError::OutOfBracket { .. })
        ));
        assert!(interp.interpolate(d(5)).is_err());
        assert!(!interp.contains(d(5)));
    }
}
