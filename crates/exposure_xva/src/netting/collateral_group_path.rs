//! One collateral group's exposure trajectory along a market path.

use std::sync::Arc;

use exposure_core::types::{year_fraction_365_25, Date};
use exposure_core::universe::MarketPath;

use super::error::NettingError;
use crate::hypothecation::CollateralGroupVertex;

/// Vertex quantity selector for series extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExposureField {
    /// Exposure net of collateral.
    Collateralised,
    /// Exposure gross of collateral.
    Uncollateralised,
    /// Credit exposure.
    Credit,
    /// Debt exposure.
    Debt,
    /// Funding exposure.
    Funding,
    /// Collateral balance.
    CollateralBalance,
    /// Hedge error.
    HedgeError,
}

impl ExposureField {
    /// Reads the field from a vertex.
    #[inline]
    pub fn read(&self, vertex: &CollateralGroupVertex) -> f64 {
        match self {
            ExposureField::Collateralised => vertex.collateralised_exposure(),
            ExposureField::Uncollateralised => vertex.uncollateralised_exposure(),
            ExposureField::Credit => vertex.credit_exposure(),
            ExposureField::Debt => vertex.debt_exposure(),
            ExposureField::Funding => vertex.funding_exposure(),
            ExposureField::CollateralBalance => vertex.collateral_balance(),
            ExposureField::HedgeError => vertex.hedge_error(),
        }
    }
}

/// Collateral group vertices over a shared market path.
///
/// Present values discount each vertex amount back to the epoch with the
/// overnight replicator, `amount * rep(t0) / rep(t)`. Period integrals use
/// the trapezoidal rule over Act/365.25 year fractions and have one entry
/// per edge.
#[derive(Clone, Debug)]
pub struct CollateralGroupPath {
    vertices: Vec<CollateralGroupVertex>,
    market_path: Arc<MarketPath>,
}

impl CollateralGroupPath {
    /// Creates a path.
    ///
    /// # Errors
    ///
    /// - `NettingError::TooFewVertices` with fewer than two vertices
    /// - `NettingError::LengthMismatch` if the market path length differs
    /// - `NettingError::NonIncreasingDates` if vertex dates do not advance
    /// - `NettingError::DateMismatch` if a vertex date is off the market path
    pub fn new(
        vertices: Vec<CollateralGroupVertex>,
        market_path: Arc<MarketPath>,
    ) -> Result<Self, NettingError> {
        if vertices.len() < 2 {
            return Err(NettingError::TooFewVertices(vertices.len()));
        }
        if vertices.len() != market_path.len() {
            return Err(NettingError::LengthMismatch {
                expected: market_path.len(),
                actual: vertices.len(),
            });
        }
        for (index, (vertex, market)) in vertices.iter().zip(market_path.vertices()).enumerate() {
            if index > 0 && vertex.anchor_date() <= vertices[index - 1].anchor_date() {
                return Err(NettingError::NonIncreasingDates(index));
            }
            if vertex.anchor_date() != market.anchor_date() {
                return Err(NettingError::DateMismatch(index));
            }
        }
        Ok(Self {
            vertices,
            market_path,
        })
    }

    /// Collateral group vertices.
    #[inline]
    pub fn vertices(&self) -> &[CollateralGroupVertex] {
        &self.vertices
    }

    /// Shared market path.
    #[inline]
    pub fn market_path(&self) -> &Arc<MarketPath> {
        &self.market_path
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false; a path holds at least two vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex dates.
    pub fn vertex_dates(&self) -> Vec<Date> {
        self.vertices.iter().map(|v| v.anchor_date()).collect()
    }

    /// Discount factors `rep(t0) / rep(t)` per vertex.
    pub fn discount_factors(&self) -> Vec<f64> {
        let epochal = self.market_path.epochal();
        self.market_path
            .vertices()
            .iter()
            .map(|v| v.discount_to(epochal))
            .collect()
    }

    /// Raw series of `field`.
    pub fn series(&self, field: ExposureField) -> Vec<f64> {
        self.vertices.iter().map(|v| field.read(v)).collect()
    }

    /// Present-valued series of `field`.
    pub fn pv_series(&self, field: ExposureField) -> Vec<f64> {
        self.vertices
            .iter()
            .zip(self.discount_factors())
            .map(|(v, df)| field.read(v) * df)
            .collect()
    }

    /// Collateralised exposure per vertex.
    pub fn collateralised_exposure(&self) -> Vec<f64> {
        self.series(ExposureField::Collateralised)
    }

    /// Collateralised exposure PV per vertex.
    pub fn collateralised_exposure_pv(&self) -> Vec<f64> {
        self.pv_series(ExposureField::Collateralised)
    }

    /// Uncollateralised exposure per vertex.
    pub fn uncollateralised_exposure(&self) -> Vec<f64> {
        self.series(ExposureField::Uncollateralised)
    }

    /// Uncollateralised exposure PV per vertex.
    pub fn uncollateralised_exposure_pv(&self) -> Vec<f64> {
        self.pv_series(ExposureField::Uncollateralised)
    }

    /// Credit exposure per vertex.
    pub fn credit_exposure(&self) -> Vec<f64> {
        self.series(ExposureField::Credit)
    }

    /// Credit exposure PV per vertex.
    pub fn credit_exposure_pv(&self) -> Vec<f64> {
        self.pv_series(ExposureField::Credit)
    }

    /// Debt exposure per vertex.
    pub fn debt_exposure(&self) -> Vec<f64> {
        self.series(ExposureField::Debt)
    }

    /// Debt exposure PV per vertex.
    pub fn debt_exposure_pv(&self) -> Vec<f64> {
        self.pv_series(ExposureField::Debt)
    }

    /// Funding exposure per vertex.
    pub fn funding_exposure(&self) -> Vec<f64> {
        self.series(ExposureField::Funding)
    }

    /// Funding exposure PV per vertex.
    pub fn funding_exposure_pv(&self) -> Vec<f64> {
        self.pv_series(ExposureField::Funding)
    }

    /// Collateral balance per vertex.
    pub fn collateral_balance(&self) -> Vec<f64> {
        self.series(ExposureField::CollateralBalance)
    }

    /// Collateral balance PV per vertex.
    pub fn collateral_balance_pv(&self) -> Vec<f64> {
        self.pv_series(ExposureField::CollateralBalance)
    }

    /// Hedge error per vertex.
    pub fn hedge_error(&self) -> Vec<f64> {
        self.series(ExposureField::HedgeError)
    }

    /// Period collateral spread sensitivity: the value of one unit of CSA
    /// spread on the PV balance, `-0.5 (B[i-1] + B[i]) * dt`.
    pub fn period_collateral_spread01(&self) -> Vec<f64> {
        let balance = self.collateral_balance_pv();
        self.vertices
            .windows(2)
            .zip(balance.windows(2))
            .map(|(v, b)| {
                -0.5 * (b[0] + b[1]) * year_fraction_365_25(v[0].anchor_date(), v[1].anchor_date())
            })
            .collect()
    }

    /// Period collateral value adjustment,
    /// `-0.5 (B[i-1] s[i-1] + B[i] s[i]) * dt` with `s` the CSA spread.
    pub fn period_collateral_value_adjustment(&self) -> Vec<f64> {
        let balance = self.collateral_balance_pv();
        let market = self.market_path.vertices();
        (1..self.vertices.len())
            .map(|i| {
                let start = balance[i - 1] * market[i - 1].csa_spread();
                let end = balance[i] * market[i].csa_spread();
                -0.5 * (start + end)
                    * year_fraction_365_25(market[i - 1].anchor_date(), market[i].anchor_date())
            })
            .collect()
    }

    /// Collateral value adjustment over the whole path.
    pub fn collateral_value_adjustment(&self) -> f64 {
        self.period_collateral_value_adjustment().iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypothecation::{ReplicationInput, ReplicationScheme};
    use approx::assert_relative_eq;
    use exposure_core::universe::{MarketVertex, MarketVertexEntity};

    fn d(days: i64) -> Date {
        Date::from_ymd(2024, 1, 1).unwrap().add_days(days).unwrap()
    }

    fn market(replicators: &[f64], csa: f64) -> Arc<MarketPath> {
        let vertices = replicators
            .iter()
            .enumerate()
            .map(|(i, &rep)| {
                MarketVertex::new(
                    d(30 * i as i64),
                    0.0,
                    rep,
                    csa,
                    MarketVertexEntity::riskless(),
                    MarketVertexEntity::riskless(),
                )
                .unwrap()
            })
            .collect();
        Arc::new(MarketPath::new(vertices).unwrap())
    }

    fn vertices(values: &[f64], balances: &[f64]) -> Vec<CollateralGroupVertex> {
        values
            .iter()
            .zip(balances)
            .enumerate()
            .map(|(i, (&value, &balance))| {
                ReplicationScheme::AlbaneseAndersen
                    .vertex(ReplicationInput {
                        date: d(30 * i as i64),
                        value,
                        realised_cash_flow: 0.0,
                        collateral_balance: balance,
                        edge: None,
                    })
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_pv_at_epoch_equals_raw() {
        let path = CollateralGroupPath::new(
            vertices(&[10.0, 20.0, 30.0], &[0.0, 5.0, 10.0]),
            market(&[1.0, 1.01, 1.02], 0.0),
        )
        .unwrap();
        let raw = path.collateralised_exposure();
        let pv = path.collateralised_exposure_pv();
        assert_eq!(pv[0], raw[0]);
        assert_relative_eq!(pv[2], raw[2] / 1.02, epsilon = 1e-12);
    }

    #[test]
    fn test_period_series_length_and_zero_balance() {
        let path = CollateralGroupPath::new(
            vertices(&[1.0, 2.0, 3.0, 4.0], &[0.0; 4]),
            market(&[1.0; 4], 0.01),
        )
        .unwrap();
        assert_eq!(path.period_collateral_spread01().len(), 3);
        assert!(path.period_collateral_value_adjustment().iter().all(|&x| x == 0.0));
        assert_eq!(path.collateral_value_adjustment(), 0.0);
    }

    #[test]
    fn test_collateral_value_adjustment_trapezoid() {
        let path = CollateralGroupPath::new(
            vertices(&[0.0, 0.0], &[100.0, 200.0]),
            market(&[1.0, 1.0], 0.02),
        )
        .unwrap();
        let dt = 30.0 / 365.25;
        assert_relative_eq!(path.period_collateral_spread01()[0], -150.0 * dt, epsilon = 1e-12);
        assert_relative_eq!(
            path.collateral_value_adjustment(),
            -0.5 * (2.0 + 4.0) * dt,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_construction_checks() {
        assert_eq!(
            CollateralGroupPath::new(vertices(&[1.0], &[0.0]), market(&[1.0], 0.0)).unwrap_err(),
            NettingError::TooFewVertices(1)
        );
        assert!(matches!(
            CollateralGroupPath::new(vertices(&[1.0, 2.0], &[0.0, 0.0]), market(&[1.0; 3], 0.0)),
            Err(NettingError::LengthMismatch { expected: 3, actual: 2 })
        ));

        let mut shifted = vertices(&[1.0, 2.0], &[0.0, 0.0]);
        shifted[1] = ReplicationScheme::AlbaneseAndersen
            .vertex(ReplicationInput {
                date: d(31),
                value: 2.0,
                realised_cash_flow: 0.0,
                collateral_balance: 0.0,
                edge: None,
            })
            .unwrap();
        assert_eq!(
            CollateralGroupPath::new(shifted, market(&[1.0; 2], 0.0)).unwrap_err(),
            NettingError::DateMismatch(1)
        );
    }

    #[test]
    fn test_repeated_vertex_date_rejected() {
        let mut repeated = vertices(&[1.0, 2.0, 3.0], &[0.0; 3]);
        repeated[2] = repeated[1];
        assert_eq!(
            CollateralGroupPath::new(repeated, market(&[1.0; 3], 0.0)).unwrap_err(),
            NettingError::NonIncreasingDates(2)
        );
    }
}
