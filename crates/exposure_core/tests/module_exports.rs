//! Integration tests for module exports and cross-module wiring.

use exposure_core::bridge::{BridgeAnchor, BrokenDateInterpolator, BrokenDateScheme};
use exposure_core::rng::{CorrelationMatrix, UnitDrawGenerator};
use exposure_core::types::Date;
use exposure_core::universe::{
    BrownianVertexGenerator, MarketPath, MarketVertex, MarketVertexEntity, MarketVertexGenerator,
    UniverseError,
};

fn initial() -> MarketVertex {
    MarketVertex::new(
        Date::from_ymd(2024, 1, 1).unwrap(),
        5.0,
        1.0,
        0.001,
        MarketVertexEntity::new(0.01, 1.0, 0.4, 0.003),
        MarketVertexEntity::new(0.02, 1.0, 0.35, 0.0),
    )
    .unwrap()
}

/// Generated vertices form a valid path one longer than the draw matrix.
#[test]
fn test_generated_path_is_valid() {
    let generator = BrownianVertexGenerator::new(14, 0.0, 3.0).unwrap().with_rate(0.02);
    let draws = UnitDrawGenerator::new(5, 26, generator.factor_count()).draws(3);
    let vertices = generator.generate(&initial(), &draws).unwrap();
    assert_eq!(vertices.len(), draws.rows() + 1);

    let path = MarketPath::new(vertices).unwrap();
    assert_eq!(path.epochal(), &initial());
    assert_eq!(path.edges().count(), 26);
    assert!(path
        .vertices()
        .windows(2)
        .all(|w| w[1].overnight_replicator() > w[0].overnight_replicator()));
}

/// A generator emitting a repeated date is rejected by the path.
#[test]
fn test_repeated_date_rejected_by_path() {
    struct Stuck;

    impl MarketVertexGenerator for Stuck {
        fn generate(
            &self,
            initial: &MarketVertex,
            draws: &exposure_core::rng::UnitDrawMatrix,
        ) -> Result<Vec<MarketVertex>, UniverseError> {
            Ok(vec![*initial; draws.rows() + 1])
        }
    }

    let draws = UnitDrawGenerator::new(1, 2, 1).draws(0);
    let vertices = Stuck.generate(&initial(), &draws).unwrap();
    assert!(matches!(
        MarketPath::new(vertices),
        Err(UniverseError::NonIncreasingDates { index: 1, .. })
    ));
}

/// Bridges built over generated values honour the vertex values exactly.
#[test]
fn test_bridge_over_generated_path() {
    let corr = CorrelationMatrix::identity(1);
    let draws = UnitDrawGenerator::new(9, 3, 1)
        .with_correlation(&corr)
        .unwrap()
        .draws(0);
    let generator = BrownianVertexGenerator::new(10, 0.0, 2.0).unwrap();
    let path = MarketPath::new(generator.generate(&initial(), &draws).unwrap()).unwrap();

    let history: Vec<BridgeAnchor> = path
        .vertices()
        .iter()
        .map(|v| BridgeAnchor::scalar(v.anchor_date(), v.position_manifest_value()))
        .collect();

    for scheme in BrokenDateScheme::ALL {
        let bridge = scheme.bridge(&history, 3).unwrap().unwrap();
        let last = path.vertex(3).unwrap();
        assert_eq!(
            bridge.interpolate_scalar(last.anchor_date()).unwrap(),
            last.position_manifest_value()
        );
        let after = last.anchor_date().add_days(1).unwrap();
        assert!(bridge.interpolate_scalar(after).is_err());
    }
}
