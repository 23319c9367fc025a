//! Monte Carlo path simulator.
//!
//! A trajectory runs in seven stages:
//!
//! ```text
//! draws ─► generator ─► MarketPath ─► group values [group][vertex]
//!                                          │
//!          broken-date bridge per vertex ◄─┘
//!                    │
//!                    ▼
//!   collateral balances ─► replication vertices ─► CollateralGroupPath per group
//!                                                        │
//!                          funding / netting segments ◄──┘
//!                                    │
//!                                    ▼
//!                         PathExposureAdjustment
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};

use exposure_core::bridge::BridgeAnchor;
use exposure_core::rng::{UnitDrawGenerator, UnitDrawMatrix};
use exposure_core::universe::{MarketPath, MarketVertex, MarketVertexGenerator};

use super::error::SimulationError;
use super::scheme::{AdjustmentDigestScheme, PathSimulatorScheme};
use crate::adjustment::{ExposureAdjustmentAggregator, PathExposureAdjustment};
use crate::holdings::PositionGroupContainer;
use crate::hypothecation::{CollateralAmountEstimator, ReplicationInput};
use crate::netting::{CollateralGroupPath, CreditDebtGroupPath, FundingGroupPath};
use crate::parallel::ParallelConfig;

/// Simulates trajectories of a position group container.
///
/// The simulator is read-only once built; trajectories share it across
/// rayon workers.
pub struct PathSimulator {
    count: usize,
    generator: Arc<dyn MarketVertexGenerator>,
    scheme: PathSimulatorScheme,
    container: Arc<PositionGroupContainer>,
    parallel: ParallelConfig,
}

impl PathSimulator {
    /// Creates a simulator for `count` trajectories.
    ///
    /// # Errors
    ///
    /// `SimulationError::Configuration` if `count` is zero.
    pub fn new(
        count: usize,
        generator: Arc<dyn MarketVertexGenerator>,
        scheme: PathSimulatorScheme,
        container: Arc<PositionGroupContainer>,
    ) -> Result<Self, SimulationError> {
        if count == 0 {
            return Err(SimulationError::Configuration(
                "path count must be positive".to_string(),
            ));
        }
        info!(
            paths = count,
            groups = container.len(),
            broken_date = %scheme.broken_date(),
            replication = %scheme.replication(),
            digest = %scheme.digest(),
            "Path simulator configured"
        );
        Ok(Self {
            count,
            generator,
            scheme,
            container,
            parallel: ParallelConfig::default(),
        })
    }

    /// Simulator with the Albanese-Andersen vertex scheme.
    pub fn unit_position_group_value(
        count: usize,
        generator: Arc<dyn MarketVertexGenerator>,
        container: Arc<PositionGroupContainer>,
    ) -> Result<Self, SimulationError> {
        Self::new(
            count,
            generator,
            PathSimulatorScheme::albanese_andersen_vertex(),
            container,
        )
    }

    /// Replaces the parallel execution settings.
    pub fn with_parallel_config(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of trajectories `simulate` runs.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Simulation schemes.
    #[inline]
    pub fn scheme(&self) -> PathSimulatorScheme {
        self.scheme
    }

    /// Market vertex generator.
    #[inline]
    pub fn generator(&self) -> &Arc<dyn MarketVertexGenerator> {
        &self.generator
    }

    /// Position groups.
    #[inline]
    pub fn container(&self) -> &Arc<PositionGroupContainer> {
        &self.container
    }

    /// Parallel execution settings.
    #[inline]
    pub fn parallel_config(&self) -> &ParallelConfig {
        &self.parallel
    }

    /// Runs one trajectory from `initial` over `draws`.
    pub fn single_trajectory(
        &self,
        initial: &MarketVertex,
        draws: &UnitDrawMatrix,
    ) -> Result<PathExposureAdjustment, SimulationError> {
        let vertices = self.generator.generate(initial, draws)?;
        let expected = draws.rows() + 1;
        if vertices.len() != expected {
            return Err(SimulationError::GeneratorLength {
                expected,
                actual: vertices.len(),
            });
        }
        let market_path = Arc::new(MarketPath::new(vertices)?);

        let values = self
            .container
            .groups()
            .iter()
            .map(|group| group.values(&market_path))
            .collect::<Result<Vec<_>, _>>()?;
        let balances = self.collateral_balances(&market_path, &values)?;

        let paths = values
            .iter()
            .zip(&balances)
            .map(|(values, balances)| self.collateral_group_path(&market_path, values, balances))
            .collect::<Result<Vec<_>, _>>()?;

        self.digest(market_path, &paths)
    }

    /// Collateral balance per group and vertex, `[group][vertex]`.
    ///
    /// Vertex 0 carries no collateral. Each later vertex builds one bridge
    /// over all groups' values, one lane per group; a vertex with too
    /// little history for the bridge carries no collateral either.
    fn collateral_balances(
        &self,
        market_path: &MarketPath,
        values: &[Vec<f64>],
    ) -> Result<Vec<Vec<f64>>, SimulationError> {
        let groups = self.container.groups();
        let n = market_path.len();
        let mut balances = vec![vec![0.0; n]; groups.len()];
        if groups.is_empty() {
            return Ok(balances);
        }

        let history: Vec<BridgeAnchor> = market_path
            .vertices()
            .iter()
            .enumerate()
            .map(|(i, vertex)| {
                BridgeAnchor::new(vertex.anchor_date(), values.iter().map(|v| v[i]).collect())
            })
            .collect();

        for (i, vertex) in market_path.vertices().iter().enumerate().skip(1) {
            let Some(bridge) = self.scheme.broken_date().bridge(&history, i)? else {
                continue;
            };
            for (lane, group) in groups.iter().enumerate() {
                let previous = balances[lane][i - 1];
                balances[lane][i] =
                    CollateralAmountEstimator::new(group.specification(), &bridge, lane)
                        .with_previous_balance(previous)
                        .posting_requirement(vertex.anchor_date())?;
            }
        }
        Ok(balances)
    }

    fn collateral_group_path(
        &self,
        market_path: &Arc<MarketPath>,
        values: &[f64],
        balances: &[f64],
    ) -> Result<CollateralGroupPath, SimulationError> {
        let replication = self.scheme.replication();
        let vertices = market_path
            .vertices()
            .iter()
            .enumerate()
            .map(|(i, vertex)| {
                let edge = market_path.edge_into(i);
                replication.vertex(ReplicationInput {
                    date: vertex.anchor_date(),
                    value: values[i],
                    realised_cash_flow: 0.0,
                    collateral_balance: balances[i],
                    edge: edge.as_ref(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CollateralGroupPath::new(vertices, Arc::clone(market_path))?)
    }

    fn digest(
        &self,
        market_path: Arc<MarketPath>,
        paths: &[CollateralGroupPath],
    ) -> Result<PathExposureAdjustment, SimulationError> {
        match self.scheme.digest() {
            AdjustmentDigestScheme::AlbaneseAndersenMetricsPointer => {
                let members = |indices: &[usize]| -> Vec<CollateralGroupPath> {
                    indices.iter().map(|&g| paths[g].clone()).collect()
                };
                let funding = self
                    .container
                    .funding_segments()
                    .iter()
                    .map(|segment| {
                        FundingGroupPath::new(segment.id().clone(), members(segment.members()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let credit_debt = self
                    .container
                    .netting_segments()
                    .iter()
                    .map(|segment| {
                        CreditDebtGroupPath::new(segment.id().clone(), members(segment.members()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(PathExposureAdjustment::new(
                    market_path,
                    credit_debt,
                    funding,
                )?)
            }
        }
    }

    /// Runs `count` trajectories with draws from `draw_generator`.
    ///
    /// Trajectory `i` uses `draw_generator.draws(i)`, so results do not
    /// depend on thread scheduling. The first failing trajectory aborts the
    /// run.
    ///
    /// # Errors
    ///
    /// - `SimulationError::Configuration` if the draws have fewer factors
    ///   than the generator needs
    /// - `SimulationError::TrajectoryFailed` wrapping the first failure
    pub fn simulate(
        &self,
        initial: &MarketVertex,
        draw_generator: &UnitDrawGenerator,
    ) -> Result<ExposureAdjustmentAggregator, SimulationError> {
        if draw_generator.factors() < self.generator.factor_count() {
            return Err(SimulationError::Configuration(format!(
                "draw generator has {} factors, market generator needs {}",
                draw_generator.factors(),
                self.generator.factor_count()
            )));
        }
        debug!(
            paths = self.count,
            steps = draw_generator.steps(),
            seed = draw_generator.seed(),
            parallel = self.parallel.should_parallelize(self.count),
            "Simulation batch started"
        );

        let results = self.parallel.try_map_indices(self.count, |index| {
            self.run_indexed(index, initial, &draw_generator.draws(index))
        })?;

        debug!(paths = results.len(), "Simulation batch finished");
        Ok(ExposureAdjustmentAggregator::new(results)?)
    }

    /// Runs one trajectory per pre-generated draw matrix.
    ///
    /// # Errors
    ///
    /// - `SimulationError::Adjustment` if `draws` is empty
    /// - `SimulationError::TrajectoryFailed` wrapping the first failure
    pub fn simulate_batch(
        &self,
        initial: &MarketVertex,
        draws: &[UnitDrawMatrix],
    ) -> Result<ExposureAdjustmentAggregator, SimulationError> {
        debug!(paths = draws.len(), "Simulation batch started");

        let results = self
            .parallel
            .try_map_indices(draws.len(), |index| self.run_indexed(index, initial, &draws[index]))?;

        debug!(paths = results.len(), "Simulation batch finished");
        Ok(ExposureAdjustmentAggregator::new(results)?)
    }

    fn run_indexed(
        &self,
        index: usize,
        initial: &MarketVertex,
        draws: &UnitDrawMatrix,
    ) -> Result<PathExposureAdjustment, SimulationError> {
        self.single_trajectory(initial, draws).map_err(|error| {
            warn!(trajectory = index, %error, "Trajectory failed");
            error.in_trajectory(index)
        })
    }
}
