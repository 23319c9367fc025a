//! Simulator scheme selection.

use std::fmt;
use std::str::FromStr;

use exposure_core::bridge::BrokenDateScheme;

use super::error::SimulationError;
use crate::hypothecation::ReplicationScheme;

/// How collateral group paths are digested into funding and credit-debt
/// group paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AdjustmentDigestScheme {
    /// Metrics read directly from the collateral group vertices.
    #[default]
    AlbaneseAndersenMetricsPointer,
}

impl AdjustmentDigestScheme {
    /// Scheme name.
    pub fn name(&self) -> &'static str {
        match self {
            AdjustmentDigestScheme::AlbaneseAndersenMetricsPointer => {
                "albanese_andersen_metrics_pointer"
            }
        }
    }

    /// Numeric scheme code.
    pub fn code(&self) -> u8 {
        match self {
            AdjustmentDigestScheme::AlbaneseAndersenMetricsPointer => 1,
        }
    }
}

impl FromStr for AdjustmentDigestScheme {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "albanese_andersen_metrics_pointer" | "metrics_pointer" => {
                Ok(AdjustmentDigestScheme::AlbaneseAndersenMetricsPointer)
            }
            _ => Err(SimulationError::Configuration(format!(
                "Unknown adjustment digest scheme: {s}"
            ))),
        }
    }
}

impl TryFrom<u8> for AdjustmentDigestScheme {
    type Error = SimulationError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(AdjustmentDigestScheme::AlbaneseAndersenMetricsPointer),
            _ => Err(SimulationError::Configuration(format!(
                "Unknown adjustment digest scheme: {code}"
            ))),
        }
    }
}

impl fmt::Display for AdjustmentDigestScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Broken-date, replication and digest schemes of a simulation run.
///
/// ```
/// use exposure_core::bridge::BrokenDateScheme;
/// use exposure_xva::dynamics::PathSimulatorScheme;
/// use exposure_xva::hypothecation::ReplicationScheme;
///
/// let scheme = PathSimulatorScheme::albanese_andersen_vertex()
///     .with_broken_date(BrokenDateScheme::ThreePointBrownianBridge);
/// assert_eq!(scheme.replication(), ReplicationScheme::AlbaneseAndersen);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PathSimulatorScheme {
    broken_date: BrokenDateScheme,
    replication: ReplicationScheme,
    digest: AdjustmentDigestScheme,
}

impl PathSimulatorScheme {
    /// Creates a scheme.
    pub fn new(
        broken_date: BrokenDateScheme,
        replication: ReplicationScheme,
        digest: AdjustmentDigestScheme,
    ) -> Self {
        Self {
            broken_date,
            replication,
            digest,
        }
    }

    /// Linear-time bridge, Albanese-Andersen replication, metrics pointer
    /// digest.
    pub fn albanese_andersen_vertex() -> Self {
        Self::default()
    }

    /// Replaces the broken-date scheme.
    pub fn with_broken_date(mut self, broken_date: BrokenDateScheme) -> Self {
        self.broken_date = broken_date;
        self
    }

    /// Replaces the replication scheme.
    pub fn with_replication(mut self, replication: ReplicationScheme) -> Self {
        self.replication = replication;
        self
    }

    /// Broken-date scheme.
    #[inline]
    pub fn broken_date(&self) -> BrokenDateScheme {
        self.broken_date
    }

    /// Replication scheme.
    #[inline]
    pub fn replication(&self) -> ReplicationScheme {
        self.replication
    }

    /// Adjustment digest scheme.
    #[inline]
    pub fn digest(&self) -> AdjustmentDigestScheme {
        self.digest
    }
}
