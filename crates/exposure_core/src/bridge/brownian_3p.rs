//! Three-point Brownian-bridge broken-date interpolation.
//!
//! A Brownian motion observed at three consecutive anchors `(ta, va)`,
//! `(tb, vb)`, `(tc, vc)` has, conditional on those observations, a mean
//! that is piecewise linear between neighbouring anchors and a variance
//! that vanishes at every anchor:
//!
//! ```text
//! E[v(t)]   = v_lo + (t - t_lo) / (t_hi - t_lo) * (v_hi - v_lo)
//! Var[v(t)] = sigma^2 * (t - t_lo) * (t_hi - t) / (t_hi - t_lo)
//! ```
//!
//! where `[t_lo, t_hi]` is whichever sub-interval encloses `t`. The
//! diffusion variance `sigma^2` is estimated per lane from the two
//! observed increments. Times are Act/365.25 year fractions.

use super::error::InterpolationError;
use super::{
    blend, check_bracket, elapsed_fraction, validate_anchors, BridgeAnchor,
    BrokenDateInterpolator,
};
use crate::types::{year_fraction_365_25, Date};

/// Brownian bridge pinned at three anchors.
///
/// # Examples
///
/// ```
/// use exposure_core::bridge::{BridgeAnchor, Brownian3PInterpolator, BrokenDateInterpolator};
/// use exposure_core::types::Date;
///
/// let t = Date::from_ymd(2024, 1, 1).unwrap();
/// let interp = Brownian3PInterpolator::new([
///     BridgeAnchor::scalar(t, 0.0),
///     BridgeAnchor::scalar(t.add_days(10).unwrap(), 10.0),
///     BridgeAnchor::scalar(t.add_days(20).unwrap(), 0.0),
/// ])
/// .unwrap();
/// assert_eq!(interp.interpolate_scalar(t.add_days(15).unwrap()).unwrap(), 5.0);
/// assert_eq!(interp.variance(t.add_days(10).unwrap()).unwrap(), vec![0.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Brownian3PInterpolator {
    anchors: [BridgeAnchor; 3],
    diffusion_variance: Vec<f64>,
}

impl Brownian3PInterpolator {
    /// Creates the bridge from three consecutive anchors.
    pub fn new(anchors: [BridgeAnchor; 3]) -> Result<Self, InterpolationError> {
        validate_anchors(&anchors, 3)?;

        let [a, b, c] = &anchors;
        let tau_ab = year_fraction_365_25(a.date(), b.date());
        let tau_bc = year_fraction_365_25(b.date(), c.date());
        let diffusion_variance = (0..a.lanes())
            .map(|lane| {
                let d_ab = b.values()[lane] - a.values()[lane];
                let d_bc = c.values()[lane] - b.values()[lane];
                0.5 * (d_ab * d_ab / tau_ab + d_bc * d_bc / tau_bc)
            })
            .collect();

        Ok(Self {
            anchors,
            diffusion_variance,
        })
    }

    /// Per-lane diffusion variance (per year) estimated from the increments.
    #[inline]
    pub fn diffusion_variance(&self) -> &[f64] {
        &self.diffusion_variance
    }

    /// Conditional variance of each lane at `date`.
    pub fn variance(&self, date: Date) -> Result<Vec<f64>, InterpolationError> {
        check_bracket(date, self.earliest(), self.latest())?;
        let (lo, hi) = self.enclosing(date);
        let width = year_fraction_365_25(lo.date(), hi.date());
        let scale = year_fraction_365_25(lo.date(), date) * year_fraction_365_25(date, hi.date())
            / width;
        Ok(self
            .diffusion_variance
            .iter()
            .map(|sigma2| sigma2 * scale)
            .collect())
    }

    fn enclosing(&self, date: Date) -> (&BridgeAnchor, &BridgeAnchor) {
        let [a, b, c] = &self.anchors;
        if date <= b.date() {
            (a, b)
        } else {
            (b, c)
        }
    }
}

impl BrokenDateInterpolator for Brownian3PInterpolator {
    fn interpolate(&self, date: Date) -> Result<Vec<f64>, InterpolationError> {
        check_bracket(date, self.earliest(), self.latest())?;
        let (lo, hi) = self.enclosing(date);
        if date == hi.date() {
            return Ok(hi.values().to_vec());
        }
        Ok(blend(
            lo.values(),
            hi.values(),
            elapsed_fraction(lo.date(), hi.date(), date),
        ))
    }

    fn earliest(&self) -> Date {
        self.anchors[0].date()
    }

    fn latest(&self) -> Date {
        self.anchors[2].date()
    }

    fn lanes(&self) -> usize {
        self.anchors[0].lanes()
    }
}
