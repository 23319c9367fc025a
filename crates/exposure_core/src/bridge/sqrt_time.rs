//! Square-root-of-time broken-date interpolation.

use super::error::InterpolationError;
use super::{
    blend, check_bracket, elapsed_fraction, validate_anchors, BridgeAnchor,
    BrokenDateInterpolator,
};
use crate::types::Date;

/// Weights the later anchor by the square root of the elapsed fraction.
///
/// ```text
/// v(t) = v1 + sqrt((t - t1) / (t2 - t1)) * (v2 - v1)
/// ```
///
/// Moves faster than linear early in the bracket, matching the
/// square-root growth of a diffusion's standard deviation.
#[derive(Clone, Debug, PartialEq)]
pub struct SquareRootOfTimeInterpolator {
    lo: BridgeAnchor,
    hi: BridgeAnchor,
}

impl SquareRootOfTimeInterpolator {
    /// Creates the interpolator from its two bracketing anchors.
    pub fn new(lo: BridgeAnchor, hi: BridgeAnchor) -> Result<Self, InterpolationError> {
        let anchors = [lo, hi];
        validate_anchors(&anchors, 2)?;
        let [lo, hi] = anchors;
        Ok(Self { lo, hi })
    }
}

impl BrokenDateInterpolator for SquareRootOfTimeInterpolator {
    fn interpolate(&self, date: Date) -> Result<Vec<f64>, InterpolationError> {
        check_bracket(date, self.lo.date(), self.hi.date())?;
        if date == self.hi.date() {
            return Ok(self.hi.values().to_vec());
        }
        let weight = elapsed_fraction(self.lo.date(), self.hi.date(), date).sqrt();
        Ok(blend(self.lo.values(), self.hi.values(), weight))
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
    fn test_quarter_point_is_half_way() {
        let interp = SquareRootOfTimeInterpolator::new(
            BridgeAnchor::scalar(d(0), 100.0),
            BridgeAnchor::scalar(d(8), 60.0),
        )
        .unwrap();
        assert_relative_eq!(interp.interpolate_scalar(d(2)).unwrap(), 80.0, epsilon = 1e-12);
        assert_eq!(interp.interpolate_scalar(d(0)).unwrap(), 100.0);
        assert_eq!(interp.interpolate_scalar(d(8)).unwrap(), 60.0);
    }

    #[test]
    fn test_construction_validates() {
        assert!(SquareRootOfTimeInterpolator::new(
            BridgeAnchor::scalar(d(3), 1.0),
            BridgeAnchor::scalar(d(3), 2.0),
        )
        .is_err());
    }
}
