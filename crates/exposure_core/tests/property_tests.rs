//! Property-based tests for broken-date bridges and unit draws.

use proptest::prelude::*;

use exposure_core::bridge::{
    BridgeAnchor, Brownian3PInterpolator, BrokenDateInterpolator, LinearTimeInterpolator,
    SquareRootOfTimeInterpolator,
};
use exposure_core::rng::UnitDrawGenerator;
use exposure_core::types::Date;

fn t0() -> Date {
    Date::from_ymd(2024, 1, 1).unwrap()
}

proptest! {
    #[test]
    fn prop_two_point_bridges_stay_between_anchors(
        lo in -1.0e4..1.0e4_f64,
        hi in -1.0e4..1.0e4_f64,
        width in 1i64..400,
        offset in 0.0..=1.0_f64,
    ) {
        let start = BridgeAnchor::scalar(t0(), lo);
        let finish = BridgeAnchor::scalar(t0().add_days(width).unwrap(), hi);
        let date = t0().add_days((offset * width as f64).round() as i64).unwrap();
        let (min, max) = (lo.min(hi) - 1e-9, lo.max(hi) + 1e-9);

        let linear = LinearTimeInterpolator::new(start.clone(), finish.clone()).unwrap();
        let v = linear.interpolate_scalar(date).unwrap();
        prop_assert!(v >= min && v <= max);
        prop_assert_eq!(linear.interpolate_scalar(t0().add_days(width).unwrap()).unwrap(), hi);

        let sqrt = SquareRootOfTimeInterpolator::new(start, finish).unwrap();
        let v = sqrt.interpolate_scalar(date).unwrap();
        prop_assert!(v >= min && v <= max);
    }

    #[test]
    fn prop_brownian_bridge_variance_vanishes_at_anchors(
        values in prop::array::uniform3(-100.0..100.0_f64),
        first in 1i64..60,
        second in 1i64..60,
        probe in 0i64..120,
    ) {
        let dates = [
            t0(),
            t0().add_days(first).unwrap(),
            t0().add_days(first + second).unwrap(),
        ];
        let bridge = Brownian3PInterpolator::new([
            BridgeAnchor::scalar(dates[0], values[0]),
            BridgeAnchor::scalar(dates[1], values[1]),
            BridgeAnchor::scalar(dates[2], values[2]),
        ])
        .unwrap();

        prop_assert!(bridge.diffusion_variance()[0] >= 0.0);
        for date in dates {
            prop_assert!(bridge.variance(date).unwrap()[0].abs() < 1e-12);
        }
        let date = t0().add_days(probe.min(first + second)).unwrap();
        prop_assert!(bridge.variance(date).unwrap()[0] >= -1e-12);
        prop_assert!((bridge.interpolate_scalar(dates[1]).unwrap() - values[1]).abs() < 1e-9);
    }

    #[test]
    fn prop_draws_depend_only_on_seed_and_index(
        seed in any::<u64>(),
        index in 0usize..1000,
    ) {
        let generator = UnitDrawGenerator::new(seed, 8, 2);
        prop_assert_eq!(generator.draws(index), generator.draws(index));
        prop_assert_eq!(
            generator.draws(index),
            UnitDrawGenerator::new(seed, 8, 2).draws(index)
        );
        prop_assert!(generator.draws(index).as_slice().iter().all(|z| z.is_finite()));
    }
}
