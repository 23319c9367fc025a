//! End-to-end simulation scenarios.
//!
//! Scripted generators fix the market path so collateral balances and
//! exposure decompositions can be checked by hand.

use std::sync::Arc;

use approx::assert_relative_eq;
use exposure_core::bridge::BrokenDateScheme;
use exposure_core::rng::{UnitDrawGenerator, UnitDrawMatrix};
use exposure_core::types::Date;
use exposure_core::universe::{
    MarketVertex, MarketVertexEntity, MarketVertexGenerator, UniverseError,
};
use exposure_xva::config::{ConfigError, SimulationConfig};
use exposure_xva::dynamics::{PathSimulator, PathSimulatorScheme, SimulationError};
use exposure_xva::holdings::{HoldingsError, PositionGroup, PositionGroupContainer};
use exposure_xva::hypothecation::{CloseOutScheme, ReplicationScheme};
use exposure_xva::netting::CollateralGroupPath;
use exposure_xva::parallel::ParallelConfig;
use exposure_xva::specification::{
    CollateralGroupSpecification, CounterpartyGroupSpecification, PositionGroupSpecification,
    MAX_MARGIN_PERIOD_OF_RISK_DAYS,
};

fn t0() -> Date {
    Date::from_ymd(2024, 1, 1).unwrap()
}

fn entity(survival: f64) -> MarketVertexEntity {
    MarketVertexEntity::new(0.02, survival, 0.4, 0.01)
}

fn initial(value: f64) -> MarketVertex {
    MarketVertex::new(t0(), value, 1.0, 0.001, entity(1.0), entity(1.0)).unwrap()
}

/// Replays fixed manifest values every `step` days, survival decaying by 1% per step.
struct Scripted {
    values: Vec<f64>,
    step: i64,
}

impl Scripted {
    fn monthly(values: &[f64]) -> Arc<Self> {
        Arc::new(Self {
            values: values.to_vec(),
            step: 30,
        })
    }
}

impl MarketVertexGenerator for Scripted {
    fn generate(
        &self,
        initial: &MarketVertex,
        draws: &UnitDrawMatrix,
    ) -> Result<Vec<MarketVertex>, UniverseError> {
        let mut vertices = vec![*initial];
        for (i, value) in self.values.iter().take(draws.rows()).enumerate() {
            let k = i as i64 + 1;
            let survival = 0.99_f64.powi(k as i32);
            vertices.push(MarketVertex::new(
                initial.anchor_date().add_days(self.step * k)?,
                *value,
                1.0,
                0.001,
                entity(survival),
                entity(survival),
            )?);
        }
        Ok(vertices)
    }
}

fn specification(collateral: CollateralGroupSpecification) -> PositionGroupSpecification {
    PositionGroupSpecification::new(
        collateral,
        CounterpartyGroupSpecification::new("CP", "Client", 0.02, 0.4).unwrap(),
    )
}

fn single_group(collateral: CollateralGroupSpecification) -> Arc<PositionGroupContainer> {
    Arc::new(
        PositionGroupContainer::new(vec![PositionGroup::new(
            "PG1",
            "Swaps",
            specification(collateral),
            "FS",
            "NS",
        )])
        .unwrap(),
    )
}

fn run_single(
    scheme: PathSimulatorScheme,
    collateral: CollateralGroupSpecification,
) -> (Vec<f64>, Vec<f64>) {
    let simulator = PathSimulator::new(
        1,
        Scripted::monthly(&[80.0, 60.0]),
        scheme,
        single_group(collateral),
    )
    .unwrap();
    let result = simulator
        .single_trajectory(&initial(100.0), &UnitDrawMatrix::zeros(2, 1))
        .unwrap();
    let path = &result.funding_group_paths()[0].paths()[0];
    (path.collateral_balance(), path.collateralised_exposure())
}

#[test]
fn test_zero_threshold_linear_bridge() {
    let (balance, collateralised) = run_single(
        PathSimulatorScheme::albanese_andersen_vertex(),
        CollateralGroupSpecification::zero_threshold("CSA"),
    );
    assert_eq!(balance, vec![0.0, 80.0, 60.0]);
    assert_eq!(collateralised, vec![100.0, 0.0, 0.0]);
}

#[test]
fn test_margin_period_of_risk_looks_back() {
    let collateral = CollateralGroupSpecification::zero_threshold("CSA")
        .with_margin_period_of_risk(10, 10)
        .unwrap();
    let (balance, collateralised) =
        run_single(PathSimulatorScheme::albanese_andersen_vertex(), collateral);

    assert_eq!(balance[0], 0.0);
    assert_relative_eq!(balance[1], 100.0 - 20.0 * 20.0 / 30.0, epsilon = 1e-12);
    assert_relative_eq!(balance[2], 80.0 - 20.0 * 20.0 / 30.0, epsilon = 1e-12);
    assert_relative_eq!(collateralised[1], 80.0 - balance[1], epsilon = 1e-12);
}

#[test]
fn test_minimum_transfer_amount_holds_balance() {
    let collateral = CollateralGroupSpecification::new("CSA", "MTA", 0.0, 0.0, 10.0).unwrap();
    let simulator = PathSimulator::unit_position_group_value(
        1,
        Scripted::monthly(&[80.0, 75.0]),
        single_group(collateral),
    )
    .unwrap();
    let result = simulator
        .single_trajectory(&initial(100.0), &UnitDrawMatrix::zeros(2, 1))
        .unwrap();
    let path = &result.credit_debt_group_paths()[0].paths()[0];

    assert_eq!(path.collateral_balance(), vec![0.0, 80.0, 80.0]);
    assert_eq!(path.collateralised_exposure(), vec![100.0, 0.0, -5.0]);
}

#[test]
fn test_brownian_bridge_needs_two_vertices_of_history() {
    let scheme = PathSimulatorScheme::albanese_andersen_vertex()
        .with_broken_date(BrokenDateScheme::ThreePointBrownianBridge);
    let (balance, collateralised) =
        run_single(scheme, CollateralGroupSpecification::zero_threshold("CSA"));
    assert_eq!(balance, vec![0.0, 0.0, 60.0]);
    assert_eq!(collateralised, vec![100.0, 80.0, 0.0]);
}

#[test]
fn test_segments_digest_their_members() {
    let collateral = CollateralGroupSpecification::zero_threshold("CSA");
    let container = PositionGroupContainer::new(vec![
        PositionGroup::new("PG1", "Rates", specification(collateral.clone()), "FS", "NS-A")
            .with_valuation(|_: &MarketVertex| 1.0),
        PositionGroup::new("PG2", "FX", specification(collateral), "FS", "NS-B")
            .with_valuation(|_: &MarketVertex| -2.0),
    ])
    .unwrap();
    let simulator = PathSimulator::unit_position_group_value(
        1,
        Scripted::monthly(&[50.0, 40.0]),
        Arc::new(container),
    )
    .unwrap();
    let result = simulator
        .single_trajectory(&initial(10.0), &UnitDrawMatrix::zeros(2, 1))
        .unwrap();

    assert_eq!(result.funding_group_paths().len(), 1);
    assert_eq!(result.funding_group_paths()[0].paths().len(), 2);
    let netting = result.credit_debt_group_paths();
    assert_eq!(netting.len(), 2);
    assert_eq!(netting[0].id().as_str(), "NS-A");
    assert_eq!(netting[0].uncollateralised_exposure_pv(), vec![10.0, 50.0, 40.0]);
    assert_eq!(netting[1].uncollateralised_exposure_pv(), vec![-20.0, -100.0, -80.0]);
    assert_eq!(
        result.uncollateralised_exposure_pv(),
        vec![-10.0, -50.0, -40.0]
    );
    // Only the epoch is uncollateralised: positive for A, negative for B
    assert!(netting[0].credit_adjustment() < 0.0);
    assert_eq!(netting[0].debt_adjustment(), 0.0);
    assert!(netting[1].debt_adjustment() > 0.0);
}

/// Emits the same date twice.
struct Stuck;

impl MarketVertexGenerator for Stuck {
    fn generate(
        &self,
        initial: &MarketVertex,
        _draws: &UnitDrawMatrix,
    ) -> Result<Vec<MarketVertex>, UniverseError> {
        Ok(vec![*initial, *initial])
    }
}

#[test]
fn test_non_increasing_generator_aborts_run() {
    let simulator = PathSimulator::unit_position_group_value(
        4,
        Arc::new(Stuck),
        single_group(CollateralGroupSpecification::zero_threshold("CSA")),
    )
    .unwrap()
    .with_parallel_config(ParallelConfig::sequential());

    let err = simulator
        .simulate(&initial(0.0), &UnitDrawGenerator::new(1, 1, 1))
        .unwrap_err();
    match err {
        SimulationError::TrajectoryFailed { index, source } => {
            assert_eq!(index, 0);
            assert!(matches!(
                *source,
                SimulationError::Universe(UniverseError::NonIncreasingDates { index: 1, .. })
            ));
        }
        other => panic!("Expected trajectory failure, got {:?}", other),
    }
}

#[test]
fn test_margin_date_outside_bracket_fails() {
    let collateral = CollateralGroupSpecification::zero_threshold("CSA")
        .with_margin_period_of_risk(45, 45)
        .unwrap();
    let simulator = PathSimulator::unit_position_group_value(
        1,
        Scripted::monthly(&[80.0, 60.0]),
        single_group(collateral),
    )
    .unwrap();
    let err = simulator
        .single_trajectory(&initial(100.0), &UnitDrawMatrix::zeros(2, 1))
        .unwrap_err();
    assert!(matches!(err, SimulationError::Hypothecation(_)));
}

#[test]
fn test_unknown_scheme_is_configuration_error() {
    let config = SimulationConfig {
        replication_scheme: "unknown".to_string(),
        ..SimulationConfig::default()
    };
    assert!(matches!(config.scheme(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_batch_of_identical_paths() {
    let simulator = PathSimulator::unit_position_group_value(
        3,
        Scripted::monthly(&[120.0, -40.0, 10.0]),
        single_group(CollateralGroupSpecification::new("CSA", "H", 5.0, 5.0, 0.0).unwrap()),
    )
    .unwrap();
    let draws = vec![UnitDrawMatrix::zeros(3, 1); 5];
    let single = simulator
        .single_trajectory(&initial(100.0), &draws[0])
        .unwrap();
    let aggregator = simulator.simulate_batch(&initial(100.0), &draws).unwrap();

    assert_eq!(aggregator.path_count(), 5);
    assert_relative_eq!(
        aggregator.credit_adjustment(),
        single.credit_adjustment(),
        epsilon = 1e-12
    );
    assert_relative_eq!(
        aggregator.funding_value_adjustment(),
        single.funding_value_adjustment(),
        epsilon = 1e-12
    );
    assert_relative_eq!(
        aggregator.total_adjustment(),
        single.total_adjustment(),
        epsilon = 1e-12
    );
    assert_eq!(
        aggregator.expected_collateralised_exposure(),
        single.collateralised_exposure_pv()
    );
    assert_eq!(
        aggregator.potential_future_exposure(0.99),
        aggregator.expected_exposure()
    );
}

#[test]
fn test_empty_batch_fails() {
    let simulator = PathSimulator::unit_position_group_value(
        1,
        Scripted::monthly(&[1.0]),
        single_group(CollateralGroupSpecification::zero_threshold("CSA")),
    )
    .unwrap();
    assert!(matches!(
        simulator.simulate_batch(&initial(0.0), &[]),
        Err(SimulationError::Adjustment(_))
    ));
}

#[test]
fn test_square_root_of_time_bridge_looks_back() {
    let collateral = CollateralGroupSpecification::zero_threshold("CSA")
        .with_margin_period_of_risk(10, 10)
        .unwrap();
    let scheme = PathSimulatorScheme::albanese_andersen_vertex()
        .with_broken_date(BrokenDateScheme::SquareRootOfTime);
    let (balance, collateralised) = run_single(scheme, collateral);

    // Margin dates sit 20 days into each 30-day step
    let weight = (20.0_f64 / 30.0).sqrt();
    assert_eq!(balance[0], 0.0);
    assert_relative_eq!(balance[1], 100.0 - 20.0 * weight, epsilon = 1e-12);
    assert_relative_eq!(balance[2], 80.0 - 20.0 * weight, epsilon = 1e-12);
    assert_relative_eq!(collateralised[2], 60.0 - balance[2], epsilon = 1e-12);
}

/// Values [100, 80, -60] under a CSA with dealer threshold 20 and client
/// threshold 30, giving estimated balances [0, 50, -40].
fn replicated(replication: ReplicationScheme) -> CollateralGroupPath {
    let simulator = PathSimulator::new(
        1,
        Scripted::monthly(&[80.0, -60.0]),
        PathSimulatorScheme::albanese_andersen_vertex().with_replication(replication),
        single_group(CollateralGroupSpecification::new("CSA", "H", 20.0, 30.0, 0.0).unwrap()),
    )
    .unwrap();
    let result = simulator
        .single_trajectory(&initial(100.0), &UnitDrawMatrix::zeros(2, 1))
        .unwrap();
    result.funding_group_paths()[0].paths()[0].clone()
}

#[test]
fn test_every_replication_scheme_runs_on_a_degenerate_epoch_edge() {
    for code in 1..=6u8 {
        let scheme = ReplicationScheme::try_from(code).unwrap();
        let path = replicated(scheme);
        assert_eq!(path.len(), 3, "scheme {}", scheme);
        assert_eq!(path.vertices()[0].scheme(), scheme);
        assert_eq!(path.hedge_error()[0], 0.0, "scheme {}", scheme);
        assert_eq!(path.uncollateralised_exposure(), vec![100.0, 80.0, -60.0]);
    }
}

#[test]
fn test_hedge_error_dual_bond_through_simulator() {
    let scheme = ReplicationScheme::hedge_error_dual_bond(0.5, CloseOutScheme::Unilateral).unwrap();
    let path = replicated(scheme);
    let accrual = 0.01 * 30.0 / 365.25;

    assert_eq!(path.collateral_balance(), vec![0.0, 50.0, -40.0]);
    let collateralised = path.collateralised_exposure();
    assert_eq!(collateralised[0], 100.0);
    assert_relative_eq!(collateralised[1], 30.0 * (1.0 + 0.5 * accrual), epsilon = 1e-12);
    assert_relative_eq!(collateralised[2], -20.0 * (1.0 + 0.5 * accrual), epsilon = 1e-12);

    let hedge_error = path.hedge_error();
    assert_eq!(hedge_error[0], 0.0);
    assert_relative_eq!(hedge_error[1], 15.0 * accrual, epsilon = 1e-12);
    assert_relative_eq!(hedge_error[2], -10.0 * accrual, epsilon = 1e-12);

    assert_eq!(path.funding_exposure(), collateralised);
    assert_eq!(path.debt_exposure(), vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_semi_replication_through_simulator() {
    let path = replicated(ReplicationScheme::BurgardKjaerSemiReplicationDualBond {
        close_out: CloseOutScheme::Bilateral,
    });
    assert_eq!(path.collateralised_exposure(), vec![100.0, 30.0, -20.0]);
    assert_eq!(path.credit_exposure(), vec![100.0, 30.0, 0.0]);
    assert_eq!(path.debt_exposure(), vec![0.0, 0.0, -20.0]);
    let funding = path.funding_exposure();
    assert_eq!(funding[0], 100.0);
    assert_relative_eq!(funding[2], 0.4 * -20.0, epsilon = 1e-12);
}

#[test]
fn test_gold_plated_csa_through_simulator() {
    let path = replicated(ReplicationScheme::BurgardKjaerGoldPlatedTwoWayCsa {
        close_out: CloseOutScheme::Bilateral,
    });
    assert_eq!(path.collateral_balance(), vec![100.0, 80.0, -60.0]);
    assert_eq!(path.collateralised_exposure(), vec![0.0, 0.0, 0.0]);
    assert_eq!(path.credit_exposure(), vec![0.0, 0.0, 0.0]);
    assert_eq!(path.funding_exposure(), vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_one_way_csa_through_simulator() {
    let path = replicated(ReplicationScheme::BurgardKjaerOneWayCsa {
        close_out: CloseOutScheme::Bilateral,
    });
    assert_eq!(path.collateral_balance(), vec![0.0, 0.0, -60.0]);
    assert_eq!(path.collateralised_exposure(), vec![100.0, 80.0, 0.0]);
    assert_eq!(path.credit_exposure(), vec![100.0, 80.0, 0.0]);
    assert_eq!(path.debt_exposure(), vec![0.0, 0.0, 0.0]);
    assert_eq!(path.funding_exposure(), vec![100.0, 80.0, -60.0]);
}

#[test]
fn test_set_off_through_simulator() {
    let path = replicated(ReplicationScheme::BurgardKjaerSetOff);
    assert_eq!(path.collateral_balance(), vec![0.0, 50.0, -40.0]);
    assert_eq!(path.collateralised_exposure(), vec![100.0, 30.0, -20.0]);
    assert_eq!(path.debt_exposure(), vec![0.0, 0.0, -20.0]);
    assert_eq!(path.funding_exposure(), vec![100.0, 30.0, 0.0]);
}

#[test]
fn test_non_finite_valuation_aborts_run() {
    let container = PositionGroupContainer::new(vec![PositionGroup::new(
        "PG1",
        "Broken",
        specification(CollateralGroupSpecification::zero_threshold("CSA")),
        "FS",
        "NS",
    )
    .with_valuation(|_: &MarketVertex| f64::NAN)])
    .unwrap();
    let simulator = PathSimulator::unit_position_group_value(
        3,
        Scripted::monthly(&[80.0, 60.0]),
        Arc::new(container),
    )
    .unwrap()
    .with_parallel_config(ParallelConfig::sequential());

    let err = simulator
        .simulate(&initial(100.0), &UnitDrawGenerator::new(7, 2, 1))
        .unwrap_err();
    match err {
        SimulationError::TrajectoryFailed { index, source } => {
            assert_eq!(index, 0);
            assert!(matches!(
                *source,
                SimulationError::Holdings(HoldingsError::NonFiniteValue { .. })
            ));
        }
        other => panic!("Expected trajectory failure, got {:?}", other),
    }
}

#[test]
fn test_oversized_margin_period_rejected_at_setup() {
    let err = CollateralGroupSpecification::zero_threshold("CSA")
        .with_margin_period_of_risk(1_000_000_000, 10)
        .unwrap_err();
    assert!(err.to_string().contains("Margin period of risk"));

    // The longest accepted look-back still fails as a typed error, not a panic
    let collateral = CollateralGroupSpecification::zero_threshold("CSA")
        .with_margin_period_of_risk(MAX_MARGIN_PERIOD_OF_RISK_DAYS, MAX_MARGIN_PERIOD_OF_RISK_DAYS)
        .unwrap();
    let simulator = PathSimulator::unit_position_group_value(
        1,
        Scripted::monthly(&[80.0, 60.0]),
        single_group(collateral),
    )
    .unwrap();
    assert!(matches!(
        simulator.single_trajectory(&initial(100.0), &UnitDrawMatrix::zeros(2, 1)),
        Err(SimulationError::Hypothecation(_))
    ));
}
