//! Simulation error types.

use exposure_core::bridge::InterpolationError;
use exposure_core::rng::CorrelationError;
use exposure_core::universe::UniverseError;
use thiserror::Error;

use crate::adjustment::AdjustmentError;
use crate::holdings::HoldingsError;
use crate::hypothecation::HypothecationError;
use crate::netting::NettingError;

/// Errors raised while simulating trajectories.
///
/// Any failure aborts the trajectory it occurred in, and a failed
/// trajectory aborts the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Invalid simulator setup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Market generation or path validation failed.
    #[error(transparent)]
    Universe(#[from] UniverseError),

    /// Unit draw generation failed.
    #[error(transparent)]
    Correlation(#[from] CorrelationError),

    /// Broken-date bridge construction failed.
    #[error(transparent)]
    Interpolation(#[from] InterpolationError),

    /// Collateral estimation or replication failed.
    #[error(transparent)]
    Hypothecation(#[from] HypothecationError),

    /// Position group valuation failed.
    #[error(transparent)]
    Holdings(#[from] HoldingsError),

    /// Collateral group path assembly failed.
    #[error(transparent)]
    Netting(#[from] NettingError),

    /// Adjustment packaging or aggregation failed.
    #[error(transparent)]
    Adjustment(#[from] AdjustmentError),

    /// Generator produced the wrong number of vertices.
    #[error("Generator produced {actual} vertices, expected {expected}")]
    GeneratorLength {
        /// Draw rows + 1
        expected: usize,
        /// Vertices produced
        actual: usize,
    },

    /// A trajectory failed.
    #[error("Trajectory {index} failed: {source}")]
    TrajectoryFailed {
        /// Trajectory index
        index: usize,
        /// Underlying failure
        source: Box<SimulationError>,
    },
}

impl SimulationError {
    /// Wraps `self` as the failure of trajectory `index`.
    pub fn in_trajectory(self, index: usize) -> Self {
        SimulationError::TrajectoryFailed {
            index,
            source: Box::new(self),
        }
    }
}
