//! Funding segment digest.

use std::sync::Arc;

use exposure_core::types::{year_fraction_365_25, Date};
use exposure_core::universe::{MarketPath, MarketVertex};

use super::collateral_group_path::{CollateralGroupPath, ExposureField};
use super::error::NettingError;
use super::{shared_market_path, sum_pv};
use crate::specification::FundingSegmentId;

/// Collateral group paths sharing one funding account.
///
/// Funding cost and benefit integrate the summed PV funding exposure
/// against the dealer funding spread, weighted by the joint survival of
/// dealer and client:
///
/// ```text
/// FCA period = -0.5 * sum over endpoints of FE+ * s_F * S_B * S_C * dt
/// FBA period = -0.5 * sum over endpoints of FE- * s_F * S_B * S_C * dt
/// ```
#[derive(Clone, Debug)]
pub struct FundingGroupPath {
    id: FundingSegmentId,
    paths: Vec<CollateralGroupPath>,
    market_path: Arc<MarketPath>,
}

impl FundingGroupPath {
    /// Creates the digest.
    ///
    /// # Errors
    ///
    /// - `NettingError::EmptyGroup` without paths
    /// - `NettingError::MarketPathMismatch` if paths are on different market paths
    pub fn new(
        id: impl Into<FundingSegmentId>,
        paths: Vec<CollateralGroupPath>,
    ) -> Result<Self, NettingError> {
        let market_path = shared_market_path(&paths)?;
        Ok(Self {
            id: id.into(),
            paths,
            market_path,
        })
    }

    /// Funding segment identifier.
    #[inline]
    pub fn id(&self) -> &FundingSegmentId {
        &self.id
    }

    /// Member collateral group paths.
    #[inline]
    pub fn paths(&self) -> &[CollateralGroupPath] {
        &self.paths
    }

    /// Shared market path.
    #[inline]
    pub fn market_path(&self) -> &Arc<MarketPath> {
        &self.market_path
    }

    /// Vertex dates.
    pub fn vertex_dates(&self) -> Vec<Date> {
        self.market_path.anchor_dates()
    }

    /// Summed PV funding exposure per vertex.
    pub fn funding_exposure_pv(&self) -> Vec<f64> {
        sum_pv(&self.paths, ExposureField::Funding)
    }

    /// Summed PV collateral balance per vertex.
    pub fn collateral_balance_pv(&self) -> Vec<f64> {
        sum_pv(&self.paths, ExposureField::CollateralBalance)
    }

    fn period_integral(&self, select: impl Fn(f64) -> f64) -> Vec<f64> {
        let exposure = self.funding_exposure_pv();
        let market = self.market_path.vertices();
        let weight = |i: usize, vertex: &MarketVertex| {
            select(exposure[i])
                * vertex.dealer().funding_spread()
                * vertex.dealer().survival_probability()
                * vertex.client().survival_probability()
        };
        (1..market.len())
            .map(|i| {
                -0.5 * (weight(i - 1, &market[i - 1]) + weight(i, &market[i]))
                    * year_fraction_365_25(market[i - 1].anchor_date(), market[i].anchor_date())
            })
            .collect()
    }

    /// Funding cost adjustment per period.
    pub fn period_funding_cost_adjustment(&self) -> Vec<f64> {
        self.period_integral(|x| x.max(0.0))
    }

    /// Funding benefit adjustment per period.
    pub fn period_funding_benefit_adjustment(&self) -> Vec<f64> {
        self.period_integral(|x| x.min(0.0))
    }

    /// Funding value adjustment per period.
    pub fn period_funding_value_adjustment(&self) -> Vec<f64> {
        self.period_integral(|x| x)
    }

    /// Funding cost adjustment.
    pub fn funding_cost_adjustment(&self) -> f64 {
        self.period_funding_cost_adjustment().iter().sum()
    }

    /// Funding benefit adjustment.
    pub fn funding_benefit_adjustment(&self) -> f64 {
        self.period_funding_benefit_adjustment().iter().sum()
    }

    /// Funding value adjustment, cost plus benefit.
    pub fn funding_value_adjustment(&self) -> f64 {
        self.funding_cost_adjustment() + self.funding_benefit_adjustment()
    }

    /// Collateral value adjustment summed over member paths.
    pub fn collateral_value_adjustment(&self) -> f64 {
        self.paths
            .iter()
            .map(CollateralGroupPath::collateral_value_adjustment)
            .sum()
    }
}
