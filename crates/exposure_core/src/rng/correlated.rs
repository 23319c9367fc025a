//! Factor correlation via Cholesky decomposition.
//!
//! Given independent standard normals `Z`, correlated normals are
//! `W = L * Z` where `C = L * L^T`.
//!
//! ```
//! use exposure_core::rng::CorrelationMatrix;
//!
//! let corr = CorrelationMatrix::new(&[1.0, 0.5, 0.5, 1.0], 2).unwrap();
//! let cholesky = corr.cholesky().unwrap();
//! let w = cholesky.transform(&[0.5, 0.8]);
//! assert_eq!(w.len(), 2);
//! ```

use super::error::CorrelationError;

const TOLERANCE: f64 = 1e-10;

/// Validated, row-major correlation matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationMatrix {
    data: Vec<f64>,
    dim: usize,
}

impl CorrelationMatrix {
    /// Creates a correlation matrix from row-major `data` of size `dim * dim`.
    ///
    /// # Errors
    ///
    /// Rejects wrong element counts, non-unit diagonals, asymmetry and
    /// correlations outside [-1, 1].
    pub fn new(data: &[f64], dim: usize) -> Result<Self, CorrelationError> {
        let expected = dim * dim;
        if data.len() != expected {
            return Err(CorrelationError::InvalidDimensions {
                expected,
                got: data.len(),
            });
        }

        for i in 0..dim {
            let diag = data[i * dim + i];
            if (diag - 1.0).abs() > TOLERANCE {
                return Err(CorrelationError::InvalidDiagonal {
                    index: i,
                    value: diag,
                });
            }
        }

        for i in 0..dim {
            for j in (i + 1)..dim {
                let val_ij = data[i * dim + j];
                let val_ji = data[j * dim + i];
                if (val_ij - val_ji).abs() > TOLERANCE {
                    return Err(CorrelationError::NotSymmetric { i, j });
                }
                if !(-1.0..=1.0).contains(&val_ij) {
                    return Err(CorrelationError::OutOfRange {
                        i,
                        j,
                        value: val_ij,
                    });
                }
            }
        }

        Ok(Self {
            data: data.to_vec(),
            dim,
        })
    }

    /// Identity correlation of dimension `dim`.
    pub fn identity(dim: usize) -> Self {
        let mut data = vec![0.0; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = 1.0;
        }
        Self { data, dim }
    }

    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.dim + j]
    }

    /// Lower-triangular Cholesky factor.
    pub fn cholesky(&self) -> Result<CholeskyFactor, CorrelationError> {
        let n = self.dim;
        let mut lower = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..=i {
                if j == i {
                    let sum: f64 = (0..j).map(|k| lower[j * n + k] * lower[j * n + k]).sum();
                    let diag = self.get(j, j) - sum;
                    if diag <= 0.0 {
                        return Err(CorrelationError::NotPositiveDefinite);
                    }
                    lower[j * n + j] = diag.sqrt();
                } else {
                    let sum: f64 = (0..j).map(|k| lower[i * n + k] * lower[j * n + k]).sum();
                    let l_jj = lower[j * n + j];
                    if l_jj <= 0.0 {
                        return Err(CorrelationError::NotPositiveDefinite);
                    }
                    lower[i * n + j] = (self.get(i, j) - sum) / l_jj;
                }
            }
        }

        Ok(CholeskyFactor { data: lower, dim: n })
    }
}

/// Lower-triangular factor `L` with `C = L * L^T`.
#[derive(Clone, Debug, PartialEq)]
pub struct CholeskyFactor {
    data: Vec<f64>,
    dim: usize,
}

impl CholeskyFactor {
    /// Factor dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at `(i, j)`; zero above the diagonal.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if j > i {
            0.0
        } else {
            self.data[i * self.dim + j]
        }
    }

    /// Returns `L * z` for the first `dim` entries of `z`.
    pub fn transform(&self, z: &[f64]) -> Vec<f64> {
        (0..self.dim)
            .map(|i| (0..=i).map(|j| self.get(i, j) * z[j]).sum())
            .collect()
    }

    /// Overwrites `z` with `L * z`.
    ///
    /// Rows are processed bottom-up so each row only reads entries not yet
    /// overwritten.
    pub fn transform_inplace(&self, z: &mut [f64]) {
        for i in (0..self.dim).rev() {
            z[i] = (0..=i).map(|j| self.get(i, j) * z[j]).sum();
        }
    }
}
