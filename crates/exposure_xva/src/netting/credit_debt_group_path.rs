//! Netting segment digest.

use std::sync::Arc;

use exposure_core::types::Date;
use exposure_core::universe::{MarketPath, MarketVertex, MarketVertexEntity};

use super::collateral_group_path::{CollateralGroupPath, ExposureField};
use super::error::NettingError;
use super::{shared_market_path, sum_pv};
use crate::specification::NettingSegmentId;

/// Collateral group paths netted together on default.
///
/// Credit and debt valuation adjustments integrate the summed PV exposure
/// against the default density of one party, weighted by the survival of
/// the other:
///
/// ```text
/// CVA period = -0.5 (CE[i-1] S_B[i-1] + CE[i] S_B[i]) (1 - R_C[i]) (S_C[i-1] - S_C[i])
/// DVA period = -0.5 (DE[i-1] S_C[i-1] + DE[i] S_C[i]) (1 - R_B[i]) (S_B[i-1] - S_B[i])
/// ```
#[derive(Clone, Debug)]
pub struct CreditDebtGroupPath {
    id: NettingSegmentId,
    paths: Vec<CollateralGroupPath>,
    market_path: Arc<MarketPath>,
}

impl CreditDebtGroupPath {
    /// Creates the digest.
    ///
    /// # Errors
    ///
    /// - `NettingError::EmptyGroup` without paths
    /// - `NettingError::MarketPathMismatch` if paths are on different market paths
    pub fn new(
        id: impl Into<NettingSegmentId>,
        paths: Vec<CollateralGroupPath>,
    ) -> Result<Self, NettingError> {
        let market_path = shared_market_path(&paths)?;
        Ok(Self {
            id: id.into(),
            paths,
            market_path,
        })
    }

    /// Netting segment identifier.
    #[inline]
    pub fn id(&self) -> &NettingSegmentId {
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

    /// Summed PV collateralised exposure per vertex.
    pub fn collateralised_exposure_pv(&self) -> Vec<f64> {
        sum_pv(&self.paths, ExposureField::Collateralised)
    }

    /// Summed PV uncollateralised exposure per vertex.
    pub fn uncollateralised_exposure_pv(&self) -> Vec<f64> {
        sum_pv(&self.paths, ExposureField::Uncollateralised)
    }

    /// Summed PV credit exposure per vertex.
    pub fn credit_exposure_pv(&self) -> Vec<f64> {
        sum_pv(&self.paths, ExposureField::Credit)
    }

    /// Summed PV debt exposure per vertex.
    pub fn debt_exposure_pv(&self) -> Vec<f64> {
        sum_pv(&self.paths, ExposureField::Debt)
    }

    fn period_default_integral(
        &self,
        exposure: &[f64],
        survivor: impl Fn(&MarketVertex) -> &MarketVertexEntity,
        defaulter: impl Fn(&MarketVertex) -> &MarketVertexEntity,
    ) -> Vec<f64> {
        let market = self.market_path.vertices();
        (1..market.len())
            .map(|i| {
                let (previous, current) = (&market[i - 1], &market[i]);
                let surviving = exposure[i - 1] * survivor(previous).survival_probability()
                    + exposure[i] * survivor(current).survival_probability();
                let default_probability = defaulter(previous).survival_probability()
                    - defaulter(current).survival_probability();
                -0.5 * surviving * defaulter(current).loss_given_default() * default_probability
            })
            .collect()
    }

    /// Credit valuation adjustment per period.
    pub fn period_credit_adjustment(&self) -> Vec<f64> {
        self.period_default_integral(&self.credit_exposure_pv(), |v| v.dealer(), |v| v.client())
    }

    /// Debt valuation adjustment per period.
    pub fn period_debt_adjustment(&self) -> Vec<f64> {
        self.period_default_integral(&self.debt_exposure_pv(), |v| v.client(), |v| v.dealer())
    }

    /// Credit valuation adjustment.
    pub fn credit_adjustment(&self) -> f64 {
        self.period_credit_adjustment().iter().sum()
    }

    /// Debt valuation adjustment.
    pub fn debt_adjustment(&self) -> f64 {
        self.period_debt_adjustment().iter().sum()
    }
}
