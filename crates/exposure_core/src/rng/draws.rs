//! Unit-draw matrices consumed by market vertex generators.

use super::correlated::{CholeskyFactor, CorrelationMatrix};
use super::error::CorrelationError;
use super::prng::DrawRng;

/// Row-major matrix of standard normal draws, one row per simulation step
/// and one column per risk factor.
///
/// A generator fed `rows()` rows produces `rows() + 1` market vertices.
///
/// # Examples
///
/// ```
/// use exposure_core::rng::UnitDrawMatrix;
///
/// let draws = UnitDrawMatrix::zeros(3, 2);
/// assert_eq!(draws.rows(), 3);
/// assert_eq!(draws.row(1), &[0.0, 0.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UnitDrawMatrix {
    data: Vec<f64>,
    rows: usize,
    factors: usize,
}

impl UnitDrawMatrix {
    /// Wraps row-major `data` of shape `rows x factors`.
    ///
    /// # Errors
    ///
    /// `CorrelationError::InvalidDimensions` if `data.len() != rows * factors`.
    pub fn new(data: Vec<f64>, rows: usize, factors: usize) -> Result<Self, CorrelationError> {
        if data.len() != rows * factors {
            return Err(CorrelationError::InvalidDimensions {
                expected: rows * factors,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            rows,
            factors,
        })
    }

    /// All-zero draws, useful for deterministic scenarios.
    pub fn zeros(rows: usize, factors: usize) -> Self {
        Self {
            data: vec![0.0; rows * factors],
            rows,
            factors,
        }
    }

    /// Number of steps.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of factors per step.
    #[inline]
    pub fn factors(&self) -> usize {
        self.factors
    }

    /// Draws of step `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= rows()`.
    #[inline]
    pub fn row(&self, index: usize) -> &[f64] {
        &self.data[index * self.factors..(index + 1) * self.factors]
    }

    /// Iterator over step rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Flat row-major view.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Deterministic generator of unit-draw matrices.
///
/// Trajectory `i` always receives the same matrix for a given seed,
/// independent of scheduling.
///
/// # Examples
///
/// ```
/// use exposure_core::rng::{CorrelationMatrix, UnitDrawGenerator};
///
/// let corr = CorrelationMatrix::new(&[1.0, 0.8, 0.8, 1.0], 2).unwrap();
/// let generator = UnitDrawGenerator::new(42, 12, 2)
///     .with_correlation(&corr)
///     .unwrap();
/// assert_eq!(generator.draws(0), generator.draws(0));
/// assert_ne!(generator.draws(0), generator.draws(1));
/// ```
#[derive(Clone, Debug)]
pub struct UnitDrawGenerator {
    seed: u64,
    steps: usize,
    factors: usize,
    cholesky: Option<CholeskyFactor>,
}

impl UnitDrawGenerator {
    /// Independent draws of shape `steps x factors`.
    pub fn new(seed: u64, steps: usize, factors: usize) -> Self {
        Self {
            seed,
            steps,
            factors,
            cholesky: None,
        }
    }

    /// Correlates factors within each step.
    ///
    /// # Errors
    ///
    /// - `CorrelationError::FactorMismatch` if the matrix dimension differs
    ///   from the factor count
    /// - `CorrelationError::NotPositiveDefinite` if decomposition fails
    pub fn with_correlation(
        mut self,
        correlation: &CorrelationMatrix,
    ) -> Result<Self, CorrelationError> {
        if correlation.dim() != self.factors {
            return Err(CorrelationError::FactorMismatch {
                correlation: correlation.dim(),
                factors: self.factors,
            });
        }
        self.cholesky = Some(correlation.cholesky()?);
        Ok(self)
    }

    /// Run seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Steps per trajectory.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Factors per step.
    #[inline]
    pub fn factors(&self) -> usize {
        self.factors
    }

    /// Draw matrix for trajectory `index`.
    pub fn draws(&self, index: usize) -> UnitDrawMatrix {
        let mut rng = DrawRng::for_trajectory(self.seed, index);
        let mut data = vec![0.0; self.steps * self.factors];
        rng.fill_normal(&mut data);
        if let Some(cholesky) = &self.cholesky {
            for row in data.chunks_exact_mut(self.factors.max(1)) {
                cholesky.transform_inplace(row);
            }
        }
        UnitDrawMatrix {
            data,
            rows: self.steps,
            factors: self.factors,
        }
    }
}
