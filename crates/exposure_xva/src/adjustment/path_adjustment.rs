//! Valuation adjustments of a single trajectory.

use std::sync::Arc;

use exposure_core::types::Date;
use exposure_core::universe::MarketPath;

use super::error::AdjustmentError;
use crate::netting::{CreditDebtGroupPath, FundingGroupPath};

fn sum_series(len: usize, series: impl Iterator<Item = Vec<f64>>) -> Vec<f64> {
    let mut total = vec![0.0; len];
    for values in series {
        for (acc, x) in total.iter_mut().zip(values) {
            *acc += x;
        }
    }
    total
}

/// One trajectory's netting and funding digests.
///
/// Every collateral group path appears in exactly one credit-debt group and
/// one funding group, so summing over either partition covers the
/// portfolio once.
#[derive(Clone, Debug)]
pub struct PathExposureAdjustment {
    market_path: Arc<MarketPath>,
    credit_debt_group_paths: Vec<CreditDebtGroupPath>,
    funding_group_paths: Vec<FundingGroupPath>,
}

impl PathExposureAdjustment {
    /// Packages the digests of one trajectory.
    ///
    /// # Errors
    ///
    /// `AdjustmentError::MarketPathMismatch` if a digest is on another
    /// market path; credit-debt groups are numbered first.
    pub fn new(
        market_path: Arc<MarketPath>,
        credit_debt_group_paths: Vec<CreditDebtGroupPath>,
        funding_group_paths: Vec<FundingGroupPath>,
    ) -> Result<Self, AdjustmentError> {
        let digests = credit_debt_group_paths
            .iter()
            .map(CreditDebtGroupPath::market_path)
            .chain(funding_group_paths.iter().map(FundingGroupPath::market_path));
        for (index, other) in digests.enumerate() {
            if !Arc::ptr_eq(&market_path, other) && *market_path != **other {
                return Err(AdjustmentError::MarketPathMismatch(index));
            }
        }
        Ok(Self {
            market_path,
            credit_debt_group_paths,
            funding_group_paths,
        })
    }

    /// Market path of the trajectory.
    #[inline]
    pub fn market_path(&self) -> &Arc<MarketPath> {
        &self.market_path
    }

    /// Netting segment digests.
    #[inline]
    pub fn credit_debt_group_paths(&self) -> &[CreditDebtGroupPath] {
        &self.credit_debt_group_paths
    }

    /// Funding segment digests.
    #[inline]
    pub fn funding_group_paths(&self) -> &[FundingGroupPath] {
        &self.funding_group_paths
    }

    /// Number of vertices on the trajectory.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.market_path.len()
    }

    /// Vertex dates.
    pub fn vertex_dates(&self) -> Vec<Date> {
        self.market_path.anchor_dates()
    }

    /// Credit valuation adjustment.
    pub fn credit_adjustment(&self) -> f64 {
        self.credit_debt_group_paths
            .iter()
            .map(CreditDebtGroupPath::credit_adjustment)
            .sum()
    }

    /// Debt valuation adjustment.
    pub fn debt_adjustment(&self) -> f64 {
        self.credit_debt_group_paths
            .iter()
            .map(CreditDebtGroupPath::debt_adjustment)
            .sum()
    }

    /// Funding cost adjustment.
    pub fn funding_cost_adjustment(&self) -> f64 {
        self.funding_group_paths
            .iter()
            .map(FundingGroupPath::funding_cost_adjustment)
            .sum()
    }

    /// Funding benefit adjustment.
    pub fn funding_benefit_adjustment(&self) -> f64 {
        self.funding_group_paths
            .iter()
            .map(FundingGroupPath::funding_benefit_adjustment)
            .sum()
    }

    /// Funding value adjustment.
    pub fn funding_value_adjustment(&self) -> f64 {
        self.funding_cost_adjustment() + self.funding_benefit_adjustment()
    }

    /// Collateral value adjustment.
    pub fn collateral_value_adjustment(&self) -> f64 {
        self.funding_group_paths
            .iter()
            .map(FundingGroupPath::collateral_value_adjustment)
            .sum()
    }

    /// Total adjustment: CVA + DVA + FVA + ColVA.
    pub fn total_adjustment(&self) -> f64 {
        self.credit_adjustment()
            + self.debt_adjustment()
            + self.funding_value_adjustment()
            + self.collateral_value_adjustment()
    }

    /// PV collateralised exposure summed across groups.
    pub fn collateralised_exposure_pv(&self) -> Vec<f64> {
        sum_series(
            self.vertex_count(),
            self.credit_debt_group_paths
                .iter()
                .map(CreditDebtGroupPath::collateralised_exposure_pv),
        )
    }

    /// PV uncollateralised exposure summed across groups.
    pub fn uncollateralised_exposure_pv(&self) -> Vec<f64> {
        sum_series(
            self.vertex_count(),
            self.credit_debt_group_paths
                .iter()
                .map(CreditDebtGroupPath::uncollateralised_exposure_pv),
        )
    }

    /// PV credit exposure summed across groups.
    pub fn credit_exposure_pv(&self) -> Vec<f64> {
        sum_series(
            self.vertex_count(),
            self.credit_debt_group_paths
                .iter()
                .map(CreditDebtGroupPath::credit_exposure_pv),
        )
    }

    /// PV debt exposure summed across groups.
    pub fn debt_exposure_pv(&self) -> Vec<f64> {
        sum_series(
            self.vertex_count(),
            self.credit_debt_group_paths
                .iter()
                .map(CreditDebtGroupPath::debt_exposure_pv),
        )
    }

    /// PV funding exposure summed across groups.
    pub fn funding_exposure_pv(&self) -> Vec<f64> {
        sum_series(
            self.vertex_count(),
            self.funding_group_paths
                .iter()
                .map(FundingGroupPath::funding_exposure_pv),
        )
    }

    /// PV collateral balance summed across groups.
    pub fn collateral_balance_pv(&self) -> Vec<f64> {
        sum_series(
            self.vertex_count(),
            self.funding_group_paths
                .iter()
                .map(FundingGroupPath::collateral_balance_pv),
        )
    }
}
