//! Position groups: the unit of collateralisation.

use std::fmt;
use std::sync::Arc;

use exposure_core::universe::{MarketPath, MarketVertex};

use super::error::HoldingsError;
use crate::specification::{
    FundingSegmentId, NettingSegmentId, PositionGroupId, PositionGroupSpecification,
};

/// Numeraire valuation of a position group at a market vertex.
///
/// Implemented for any `Fn(&MarketVertex) -> f64 + Send + Sync`.
pub trait PositionValuation: Send + Sync {
    /// Numeraire value at `vertex`.
    fn value(&self, vertex: &MarketVertex) -> f64;
}

impl<F> PositionValuation for F
where
    F: Fn(&MarketVertex) -> f64 + Send + Sync,
{
    fn value(&self, vertex: &MarketVertex) -> f64 {
        self(vertex)
    }
}

/// A group of positions sharing collateral terms, a funding segment and a
/// netting segment.
///
/// The group value at a vertex is the position-manifest value scaled by
/// the group's numeraire valuation; without one the numeraire is unity.
///
/// # Examples
///
/// ```
/// use exposure_core::types::Date;
/// use exposure_core::universe::MarketVertex;
/// use exposure_xva::holdings::PositionGroup;
/// use exposure_xva::specification::{
///     CollateralGroupSpecification, CounterpartyGroupSpecification, PositionGroupSpecification,
/// };
///
/// let spec = PositionGroupSpecification::new(
///     CollateralGroupSpecification::zero_threshold("CSA"),
///     CounterpartyGroupSpecification::new("CP", "Client", 0.02, 0.4).unwrap(),
/// );
/// let group = PositionGroup::new("PG1", "Rates book", spec, "FS", "NS")
///     .with_valuation(|_: &MarketVertex| 0.5);
///
/// let t0 = Date::from_ymd(2024, 1, 1).unwrap();
/// let vertex = MarketVertex::new(t0, 10.0, 1.0, 0.0, Default::default(), Default::default()).unwrap();
/// assert_eq!(group.value(&vertex).unwrap(), 5.0);
/// ```
#[derive(Clone)]
pub struct PositionGroup {
    id: PositionGroupId,
    name: String,
    valuation: Option<Arc<dyn PositionValuation>>,
    specification: PositionGroupSpecification,
    funding_segment: FundingSegmentId,
    netting_segment: NettingSegmentId,
}

impl PositionGroup {
    /// Creates a position group with unit numeraire.
    pub fn new(
        id: impl Into<PositionGroupId>,
        name: impl Into<String>,
        specification: PositionGroupSpecification,
        funding_segment: impl Into<FundingSegmentId>,
        netting_segment: impl Into<NettingSegmentId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            valuation: None,
            specification,
            funding_segment: funding_segment.into(),
            netting_segment: netting_segment.into(),
        }
    }

    /// Attaches a numeraire valuation.
    pub fn with_valuation(mut self, valuation: impl PositionValuation + 'static) -> Self {
        self.valuation = Some(Arc::new(valuation));
        self
    }

    /// Attaches a shared numeraire valuation.
    pub fn with_shared_valuation(mut self, valuation: Arc<dyn PositionValuation>) -> Self {
        self.valuation = Some(valuation);
        self
    }

    /// Identifier.
    #[inline]
    pub fn id(&self) -> &PositionGroupId {
        &self.id
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Collateral and credit terms.
    #[inline]
    pub fn specification(&self) -> &PositionGroupSpecification {
        &self.specification
    }

    /// Funding segment.
    #[inline]
    pub fn funding_segment(&self) -> &FundingSegmentId {
        &self.funding_segment
    }

    /// Netting segment.
    #[inline]
    pub fn netting_segment(&self) -> &NettingSegmentId {
        &self.netting_segment
    }

    /// Group value at `vertex`.
    ///
    /// # Errors
    ///
    /// `HoldingsError::NonFiniteValue` if the value is NaN or infinite.
    pub fn value(&self, vertex: &MarketVertex) -> Result<f64, HoldingsError> {
        let numeraire = self.valuation.as_ref().map_or(1.0, |v| v.value(vertex));
        let value = vertex.position_manifest_value() * numeraire;
        if !value.is_finite() {
            return Err(HoldingsError::NonFiniteValue {
                group: self.id.clone(),
                date: vertex.anchor_date(),
            });
        }
        Ok(value)
    }

    /// Group values along a path.
    pub fn values(&self, path: &MarketPath) -> Result<Vec<f64>, HoldingsError> {
        path.vertices().iter().map(|v| self.value(v)).collect()
    }
}

impl fmt::Debug for PositionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionGroup")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("has_valuation", &self.valuation.is_some())
            .field("specification", &self.specification)
            .field("funding_segment", &self.funding_segment)
            .field("netting_segment", &self.netting_segment)
            .finish()
    }
}
