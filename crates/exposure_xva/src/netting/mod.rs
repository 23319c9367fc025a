//! Netting: collateral group paths and their funding and credit-debt digests.
//!
//! ```text
//! CollateralGroupVertex[] + Arc<MarketPath> ──► CollateralGroupPath
//!                                                  │
//!                    ┌─────────────────────────────┴───────────────┐
//!                    ▼                                             ▼
//!     FundingGroupPath (funding segment)         CreditDebtGroupPath (netting segment)
//!        FCA / FBA / ColVA                           CVA / DVA
//! ```

pub mod collateral_group_path;
pub mod credit_debt_group_path;
pub mod error;
pub mod funding_group_path;

pub use collateral_group_path::{CollateralGroupPath, ExposureField};
pub use credit_debt_group_path::CreditDebtGroupPath;
pub use error::NettingError;
pub use funding_group_path::FundingGroupPath;

use std::sync::Arc;

use exposure_core::universe::MarketPath;

/// Market path shared by every member path.
pub(crate) fn shared_market_path(
    paths: &[CollateralGroupPath],
) -> Result<Arc<MarketPath>, NettingError> {
    let first = paths.first().ok_or(NettingError::EmptyGroup)?.market_path();
    for (index, path) in paths.iter().enumerate().skip(1) {
        let other = path.market_path();
        if !Arc::ptr_eq(first, other) && first != other {
            return Err(NettingError::MarketPathMismatch(index));
        }
    }
    Ok(Arc::clone(first))
}

/// Vertex-wise sum of a PV series over member paths.
pub(crate) fn sum_pv(paths: &[CollateralGroupPath], field: ExposureField) -> Vec<f64> {
    let mut total = vec![0.0; paths.first().map_or(0, CollateralGroupPath::len)];
    for path in paths {
        for (acc, x) in total.iter_mut().zip(path.pv_series(field)) {
            *acc += x;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypothecation::{ReplicationInput, ReplicationScheme};
    use approx::assert_relative_eq;
    use exposure_core::types::Date;
    use exposure_core::universe::{MarketVertex, MarketVertexEntity};

    fn d(days: i64) -> Date {
        Date::from_ymd(2024, 1, 1).unwrap().add_days(days).unwrap()
    }

    /// Two-vertex market, one year apart, with decaying survival.
    fn market() -> Arc<MarketPath> {
        let v0 = MarketVertex::new(
            d(0),
            0.0,
            1.0,
            0.0,
            MarketVertexEntity::new(0.01, 1.0, 0.4, 0.01),
            MarketVertexEntity::new(0.02, 1.0, 0.3, 0.0),
        )
        .unwrap();
        let v1 = MarketVertex::new(
            d(365),
            0.0,
            1.0,
            0.0,
            MarketVertexEntity::new(0.01, 0.99, 0.4, 0.01),
            MarketVertexEntity::new(0.02, 0.98, 0.3, 0.0),
        )
        .unwrap();
        Arc::new(MarketPath::new(vec![v0, v1]).unwrap())
    }

    fn path(values: [f64; 2], market: &Arc<MarketPath>) -> CollateralGroupPath {
        let vertices = values
            .iter()
            .zip([d(0), d(365)])
            .map(|(&value, date)| {
                ReplicationScheme::AlbaneseAndersen
                    .vertex(ReplicationInput {
                        date,
                        value,
                        realised_cash_flow: 0.0,
                        collateral_balance: 0.0,
                        edge: None,
                    })
                    .unwrap()
            })
            .collect();
        CollateralGroupPath::new(vertices, Arc::clone(market)).unwrap()
    }

    #[test]
    fn test_credit_debt_digest() {
        let market = market();
        let group = CreditDebtGroupPath::new(
            "NS",
            vec![path([10.0, 20.0], &market), path([-5.0, -40.0], &market)],
        )
        .unwrap();

        assert_eq!(group.collateralised_exposure_pv(), vec![5.0, -20.0]);
        assert_eq!(group.credit_exposure_pv(), vec![10.0, 20.0]);
        assert_eq!(group.debt_exposure_pv(), vec![-5.0, -40.0]);

        let cva = -0.5 * (10.0 * 1.0 + 20.0 * 0.99) * 0.7 * 0.02;
        assert_relative_eq!(group.credit_adjustment(), cva, epsilon = 1e-12);
        let dva = -0.5 * (-5.0 * 1.0 + -40.0 * 0.98) * 0.6 * 0.01;
        assert_relative_eq!(group.debt_adjustment(), dva, epsilon = 1e-12);
        assert!(group.credit_adjustment() < 0.0);
        assert!(group.debt_adjustment() > 0.0);
    }

    #[test]
    fn test_funding_digest() {
        let market = market();
        let group = FundingGroupPath::new("FS", vec![path([10.0, -20.0], &market)]).unwrap();
        // Albanese-Andersen funding exposure is the collateral balance, zero here
        assert_eq!(group.funding_exposure_pv(), vec![0.0, 0.0]);
        assert_eq!(group.funding_value_adjustment(), 0.0);
        assert_eq!(group.period_funding_cost_adjustment().len(), 1);
    }

    #[test]
    fn test_funding_cost_and_benefit_split() {
        let market = market();
        let vertices = [(d(0), 50.0), (d(365), -30.0)]
            .into_iter()
            .map(|(date, balance)| {
                ReplicationScheme::AlbaneseAndersen
                    .vertex(ReplicationInput {
                        date,
                        value: 0.0,
                        realised_cash_flow: 0.0,
                        collateral_balance: balance,
                        edge: None,
                    })
                    .unwrap()
            })
            .collect();
        let path = CollateralGroupPath::new(vertices, Arc::clone(&market)).unwrap();
        let group = FundingGroupPath::new("FS", vec![path]).unwrap();

        let dt = 365.0 / 365.25;
        let fca = -0.5 * (50.0 * 0.01 * 1.0 * 1.0) * dt;
        let fba = -0.5 * (-30.0 * 0.01 * 0.99 * 0.98) * dt;
        assert_relative_eq!(group.funding_cost_adjustment(), fca, epsilon = 1e-12);
        assert_relative_eq!(group.funding_benefit_adjustment(), fba, epsilon = 1e-12);
        assert_relative_eq!(group.funding_value_adjustment(), fca + fba, epsilon = 1e-12);
    }

    #[test]
    fn test_digest_requires_paths_on_one_market() {
        assert!(matches!(
            FundingGroupPath::new("FS", vec![]),
            Err(NettingError::EmptyGroup)
        ));

        let a = market();
        let other = MarketPath::new(vec![
            *a.epochal(),
            MarketVertex::new(
                d(400),
                0.0,
                1.0,
                0.0,
                MarketVertexEntity::riskless(),
                MarketVertexEntity::riskless(),
            )
            .unwrap(),
        ])
        .unwrap();
        let b = Arc::new(other);
        let vertices = [d(0), d(400)]
            .into_iter()
            .map(|date| {
                ReplicationScheme::AlbaneseAndersen
                    .vertex(ReplicationInput {
                        date,
                        value: 1.0,
                        realised_cash_flow: 0.0,
                        collateral_balance: 0.0,
                        edge: None,
                    })
                    .unwrap()
            })
            .collect();
        let foreign = CollateralGroupPath::new(vertices, b).unwrap();
        assert_eq!(
            CreditDebtGroupPath::new("NS", vec![path([1.0, 1.0], &a), foreign]).unwrap_err(),
            NettingError::MarketPathMismatch(1)
        );
    }
}
