//! Exposure profile statistics across trajectories.
//!
//! Profiles are laid out `[trajectory][vertex]`. Every statistic reduces
//! the trajectory axis vertex by vertex:
//!
//! - Expected Exposure, `EE(t) = E[max(X(t), 0)]`
//! - Expected Negative Exposure, `ENE(t) = E[min(X(t), 0)]`
//! - Potential Future Exposure, `PFE(t, a) = Quantile_a(max(X(t), 0))`
//! - time-averaged Expected Positive Exposure over the vertex dates

use rayon::prelude::*;

/// Exposure profile statistics.
pub struct ExposureCalculator;

impl ExposureCalculator {
    fn per_vertex(profiles: &[Vec<f64>], reduce: impl Fn(&[f64]) -> f64 + Sync) -> Vec<f64> {
        let Some(first) = profiles.first() else {
            return Vec::new();
        };
        (0..first.len())
            .into_par_iter()
            .map(|t| {
                let column: Vec<f64> = profiles.iter().map(|path| path[t]).collect();
                reduce(&column)
            })
            .collect()
    }

    /// Mean of the profiles at each vertex.
    ///
    /// ```
    /// use exposure_xva::exposure::ExposureCalculator;
    ///
    /// let profiles = vec![vec![10.0, -4.0], vec![-2.0, 8.0]];
    /// assert_eq!(ExposureCalculator::mean_profile(&profiles), vec![4.0, 2.0]);
    /// ```
    pub fn mean_profile(profiles: &[Vec<f64>]) -> Vec<f64> {
        Self::per_vertex(profiles, |column| {
            column.iter().sum::<f64>() / column.len() as f64
        })
    }

    /// Expected Exposure at each vertex.
    ///
    /// ```
    /// use exposure_xva::exposure::ExposureCalculator;
    ///
    /// let profiles = vec![
    ///     vec![10.0, 20.0, 15.0],
    ///     vec![5.0, -10.0, 25.0],
    ///     vec![-5.0, 15.0, 10.0],
    /// ];
    ///
    /// let ee = ExposureCalculator::expected_exposure(&profiles);
    /// assert_eq!(ee[0], 5.0);
    /// ```
    pub fn expected_exposure(profiles: &[Vec<f64>]) -> Vec<f64> {
        Self::per_vertex(profiles, |column| {
            column.iter().map(|x| x.max(0.0)).sum::<f64>() / column.len() as f64
        })
    }

    /// Expected Negative Exposure at each vertex (non-positive).
    pub fn expected_negative_exposure(profiles: &[Vec<f64>]) -> Vec<f64> {
        Self::per_vertex(profiles, |column| {
            column.iter().map(|x| x.min(0.0)).sum::<f64>() / column.len() as f64
        })
    }

    /// Potential Future Exposure at `confidence`.
    ///
    /// The quantile is the order statistic at `round((n - 1) * confidence)`
    /// of the positive parts; confidence is clamped to `[0, 1]`.
    pub fn potential_future_exposure(profiles: &[Vec<f64>], confidence: f64) -> Vec<f64> {
        let n = profiles.len();
        if n == 0 {
            return Vec::new();
        }
        let confidence = confidence.clamp(0.0, 1.0);
        let index = (((n as f64 - 1.0) * confidence).round() as usize).min(n - 1);

        Self::per_vertex(profiles, |column| {
            let mut exposures: Vec<f64> = column.iter().map(|x| x.max(0.0)).collect();
            exposures.sort_by(|a, b| a.total_cmp(b));
            exposures[index]
        })
    }

    /// Time-weighted average of an EE profile.
    ///
    /// Trapezoidal over `time_grid` (years). A single point or a grid of
    /// mismatched length returns the first EE value.
    pub fn expected_positive_exposure(ee: &[f64], time_grid: &[f64]) -> f64 {
        let fallback = ee.first().copied().unwrap_or(0.0);
        if time_grid.len() < 2 || ee.len() != time_grid.len() {
            return fallback;
        }
        let integral: f64 = time_grid
            .windows(2)
            .zip(ee.windows(2))
            .map(|(t, e)| 0.5 * (e[0] + e[1]) * (t[1] - t[0]))
            .sum();
        let horizon = time_grid[time_grid.len() - 1] - time_grid[0];
        if horizon > 0.0 {
            integral / horizon
        } else {
            fallback
        }
    }

    /// Largest PFE over the profile, floored at zero.
    #[inline]
    pub fn peak_pfe(pfe: &[f64]) -> f64 {
        pfe.iter().copied().fold(0.0_f64, f64::max)
    }
}
