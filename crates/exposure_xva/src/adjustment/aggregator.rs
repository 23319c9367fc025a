//! Cross-trajectory aggregation of valuation adjustments.

use serde::Serialize;

use exposure_core::types::{year_fraction_365_25, Date};

use super::error::AdjustmentError;
use super::path_adjustment::PathExposureAdjustment;
use crate::exposure::ExposureCalculator;
use crate::specification::{FundingSegmentId, NettingSegmentId};

/// Mean funding adjustments of one funding segment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FundingGroupDigest {
    /// Funding segment identifier.
    pub id: FundingSegmentId,
    /// Mean funding cost adjustment.
    pub fca: f64,
    /// Mean funding benefit adjustment.
    pub fba: f64,
    /// Mean collateral value adjustment.
    pub colva: f64,
}

impl FundingGroupDigest {
    /// Funding value adjustment, FCA + FBA.
    #[inline]
    pub fn fva(&self) -> f64 {
        self.fca + self.fba
    }
}

/// Mean credit and debt adjustments of one netting segment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreditDebtGroupDigest {
    /// Netting segment identifier.
    pub id: NettingSegmentId,
    /// Mean credit valuation adjustment.
    pub cva: f64,
    /// Mean debt valuation adjustment.
    pub dva: f64,
}

/// Portfolio summary of an aggregated run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AdjustmentSummary {
    /// Number of trajectories.
    pub path_count: usize,
    /// Mean credit valuation adjustment.
    pub cva: f64,
    /// Mean debt valuation adjustment.
    pub dva: f64,
    /// Mean funding cost adjustment.
    pub fca: f64,
    /// Mean funding benefit adjustment.
    pub fba: f64,
    /// Mean funding value adjustment.
    pub fva: f64,
    /// Mean collateral value adjustment.
    pub colva: f64,
    /// Mean total adjustment.
    pub total: f64,
    /// Vertex dates.
    pub dates: Vec<Date>,
    /// Expected collateralised exposure per vertex.
    pub expected_collateralised_exposure: Vec<f64>,
    /// Expected Exposure per vertex.
    pub expected_exposure: Vec<f64>,
    /// Expected Negative Exposure per vertex.
    pub expected_negative_exposure: Vec<f64>,
    /// Potential Future Exposure per vertex.
    pub potential_future_exposure: Vec<f64>,
    /// PFE confidence level.
    pub pfe_confidence: f64,
    /// Time-averaged Expected Positive Exposure.
    pub expected_positive_exposure: f64,
    /// Funding segment digests.
    pub funding_groups: Vec<FundingGroupDigest>,
    /// Netting segment digests.
    pub credit_debt_groups: Vec<CreditDebtGroupDigest>,
}

/// Owns every trajectory's adjustments and reduces them across paths.
///
/// Exposure statistics are taken over the PV collateralised exposure
/// summed across position groups.
#[derive(Clone, Debug)]
pub struct ExposureAdjustmentAggregator {
    paths: Vec<PathExposureAdjustment>,
}

impl ExposureAdjustmentAggregator {
    /// Creates the aggregator.
    ///
    /// # Errors
    ///
    /// - `AdjustmentError::Empty` without paths
    /// - `AdjustmentError::VertexCountMismatch` if vertex counts differ
    /// - `AdjustmentError::SegmentMismatch` if segment layouts differ
    pub fn new(paths: Vec<PathExposureAdjustment>) -> Result<Self, AdjustmentError> {
        let first = paths.first().ok_or(AdjustmentError::Empty)?;
        let expected = first.vertex_count();
        let funding_ids: Vec<_> = first
            .funding_group_paths()
            .iter()
            .map(|g| g.id().clone())
            .collect();
        let netting_ids: Vec<_> = first
            .credit_debt_group_paths()
            .iter()
            .map(|g| g.id().clone())
            .collect();

        for (index, path) in paths.iter().enumerate().skip(1) {
            if path.vertex_count() != expected {
                return Err(AdjustmentError::VertexCountMismatch {
                    index,
                    expected,
                    actual: path.vertex_count(),
                });
            }
            let same_funding = path
                .funding_group_paths()
                .iter()
                .map(|g| g.id())
                .eq(funding_ids.iter());
            let same_netting = path
                .credit_debt_group_paths()
                .iter()
                .map(|g| g.id())
                .eq(netting_ids.iter());
            if !(same_funding && same_netting) {
                return Err(AdjustmentError::SegmentMismatch(index));
            }
        }
        Ok(Self { paths })
    }

    /// Number of trajectories.
    #[inline]
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Per-trajectory results, in trajectory order.
    #[inline]
    pub fn paths(&self) -> &[PathExposureAdjustment] {
        &self.paths
    }

    /// Vertex dates of the first trajectory.
    pub fn vertex_dates(&self) -> Vec<Date> {
        self.paths[0].vertex_dates()
    }

    fn path_wise(&self, metric: impl Fn(&PathExposureAdjustment) -> f64) -> Vec<f64> {
        self.paths.iter().map(metric).collect()
    }

    fn mean(&self, metric: impl Fn(&PathExposureAdjustment) -> f64) -> f64 {
        self.paths.iter().map(metric).sum::<f64>() / self.paths.len() as f64
    }

    /// CVA of every trajectory.
    pub fn credit_adjustment_paths(&self) -> Vec<f64> {
        self.path_wise(PathExposureAdjustment::credit_adjustment)
    }

    /// DVA of every trajectory.
    pub fn debt_adjustment_paths(&self) -> Vec<f64> {
        self.path_wise(PathExposureAdjustment::debt_adjustment)
    }

    /// FCA of every trajectory.
    pub fn funding_cost_adjustment_paths(&self) -> Vec<f64> {
        self.path_wise(PathExposureAdjustment::funding_cost_adjustment)
    }

    /// FBA of every trajectory.
    pub fn funding_benefit_adjustment_paths(&self) -> Vec<f64> {
        self.path_wise(PathExposureAdjustment::funding_benefit_adjustment)
    }

    /// FVA of every trajectory.
    pub fn funding_value_adjustment_paths(&self) -> Vec<f64> {
        self.path_wise(PathExposureAdjustment::funding_value_adjustment)
    }

    /// ColVA of every trajectory.
    pub fn collateral_value_adjustment_paths(&self) -> Vec<f64> {
        self.path_wise(PathExposureAdjustment::collateral_value_adjustment)
    }

    /// Total adjustment of every trajectory.
    pub fn total_adjustment_paths(&self) -> Vec<f64> {
        self.path_wise(PathExposureAdjustment::total_adjustment)
    }

    /// Mean CVA.
    pub fn credit_adjustment(&self) -> f64 {
        self.mean(PathExposureAdjustment::credit_adjustment)
    }

    /// Mean DVA.
    pub fn debt_adjustment(&self) -> f64 {
        self.mean(PathExposureAdjustment::debt_adjustment)
    }

    /// Mean FCA.
    pub fn funding_cost_adjustment(&self) -> f64 {
        self.mean(PathExposureAdjustment::funding_cost_adjustment)
    }

    /// Mean FBA.
    pub fn funding_benefit_adjustment(&self) -> f64 {
        self.mean(PathExposureAdjustment::funding_benefit_adjustment)
    }

    /// Mean FVA.
    pub fn funding_value_adjustment(&self) -> f64 {
        self.mean(PathExposureAdjustment::funding_value_adjustment)
    }

    /// Mean ColVA.
    pub fn collateral_value_adjustment(&self) -> f64 {
        self.mean(PathExposureAdjustment::collateral_value_adjustment)
    }

    /// Mean total adjustment.
    pub fn total_adjustment(&self) -> f64 {
        self.mean(PathExposureAdjustment::total_adjustment)
    }

    /// PV collateralised exposure profile of every trajectory.
    pub fn collateralised_exposure_profiles(&self) -> Vec<Vec<f64>> {
        self.paths
            .iter()
            .map(PathExposureAdjustment::collateralised_exposure_pv)
            .collect()
    }

    /// PV uncollateralised exposure profile of every trajectory.
    pub fn uncollateralised_exposure_profiles(&self) -> Vec<Vec<f64>> {
        self.paths
            .iter()
            .map(PathExposureAdjustment::uncollateralised_exposure_pv)
            .collect()
    }

    /// PV collateral balance profile of every trajectory.
    pub fn collateral_balance_profiles(&self) -> Vec<Vec<f64>> {
        self.paths
            .iter()
            .map(PathExposureAdjustment::collateral_balance_pv)
            .collect()
    }

    /// Mean PV collateralised exposure per vertex.
    pub fn expected_collateralised_exposure(&self) -> Vec<f64> {
        ExposureCalculator::mean_profile(&self.collateralised_exposure_profiles())
    }

    /// Mean PV uncollateralised exposure per vertex.
    pub fn expected_uncollateralised_exposure(&self) -> Vec<f64> {
        ExposureCalculator::mean_profile(&self.uncollateralised_exposure_profiles())
    }

    /// Mean PV collateral balance per vertex.
    pub fn expected_collateral_balance(&self) -> Vec<f64> {
        ExposureCalculator::mean_profile(&self.collateral_balance_profiles())
    }

    /// Expected Exposure of the collateralised exposure.
    pub fn expected_exposure(&self) -> Vec<f64> {
        ExposureCalculator::expected_exposure(&self.collateralised_exposure_profiles())
    }

    /// Expected Negative Exposure of the collateralised exposure.
    pub fn expected_negative_exposure(&self) -> Vec<f64> {
        ExposureCalculator::expected_negative_exposure(&self.collateralised_exposure_profiles())
    }

    /// Potential Future Exposure of the collateralised exposure.
    pub fn potential_future_exposure(&self, confidence: f64) -> Vec<f64> {
        ExposureCalculator::potential_future_exposure(
            &self.collateralised_exposure_profiles(),
            confidence,
        )
    }

    /// Time-averaged EPE over the vertex dates (Act/365.25).
    pub fn expected_positive_exposure(&self) -> f64 {
        let dates = self.vertex_dates();
        let time_grid: Vec<f64> = dates
            .iter()
            .map(|&d| year_fraction_365_25(dates[0], d))
            .collect();
        ExposureCalculator::expected_positive_exposure(&self.expected_exposure(), &time_grid)
    }

    /// Mean funding adjustments per funding segment.
    pub fn funding_group_digests(&self) -> Vec<FundingGroupDigest> {
        let n = self.paths.len() as f64;
        self.paths[0]
            .funding_group_paths()
            .iter()
            .enumerate()
            .map(|(g, group)| {
                let mut digest = FundingGroupDigest {
                    id: group.id().clone(),
                    fca: 0.0,
                    fba: 0.0,
                    colva: 0.0,
                };
                for path in &self.paths {
                    let member = &path.funding_group_paths()[g];
                    digest.fca += member.funding_cost_adjustment() / n;
                    digest.fba += member.funding_benefit_adjustment() / n;
                    digest.colva += member.collateral_value_adjustment() / n;
                }
                digest
            })
            .collect()
    }

    /// Mean credit and debt adjustments per netting segment.
    pub fn credit_debt_group_digests(&self) -> Vec<CreditDebtGroupDigest> {
        let n = self.paths.len() as f64;
        self.paths[0]
            .credit_debt_group_paths()
            .iter()
            .enumerate()
            .map(|(g, group)| {
                let mut digest = CreditDebtGroupDigest {
                    id: group.id().clone(),
                    cva: 0.0,
                    dva: 0.0,
                };
                for path in &self.paths {
                    let member = &path.credit_debt_group_paths()[g];
                    digest.cva += member.credit_adjustment() / n;
                    digest.dva += member.debt_adjustment() / n;
                }
                digest
            })
            .collect()
    }

    /// Portfolio summary with PFE at `pfe_confidence`.
    pub fn summary(&self, pfe_confidence: f64) -> AdjustmentSummary {
        AdjustmentSummary {
            path_count: self.path_count(),
            cva: self.credit_adjustment(),
            dva: self.debt_adjustment(),
            fca: self.funding_cost_adjustment(),
            fba: self.funding_benefit_adjustment(),
            fva: self.funding_value_adjustment(),
            colva: self.collateral_value_adjustment(),
            total: self.total_adjustment(),
            dates: self.vertex_dates(),
            expected_collateralised_exposure: self.expected_collateralised_exposure(),
            expected_exposure: self.expected_exposure(),
            expected_negative_exposure: self.expected_negative_exposure(),
            potential_future_exposure: self.potential_future_exposure(pfe_confidence),
            pfe_confidence,
            expected_positive_exposure: self.expected_positive_exposure(),
            funding_groups: self.funding_group_digests(),
            credit_debt_groups: self.credit_debt_group_digests(),
        }
    }
}
