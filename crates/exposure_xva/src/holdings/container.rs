//! Read-only container of position groups and their segment partitions.

use std::collections::HashSet;

use super::error::HoldingsError;
use super::position_group::PositionGroup;
use crate::specification::{FundingSegmentId, NettingSegmentId};

/// Indices of the position groups that belong to one segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment<Id> {
    id: Id,
    members: Vec<usize>,
}

impl<Id> Segment<Id> {
    /// Segment identifier.
    #[inline]
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Position group indices, in container order.
    #[inline]
    pub fn members(&self) -> &[usize] {
        &self.members
    }
}

fn partition<Id: Clone + PartialEq>(
    groups: &[PositionGroup],
    key: impl Fn(&PositionGroup) -> &Id,
) -> Vec<Segment<Id>> {
    let mut segments: Vec<Segment<Id>> = Vec::new();
    for (index, group) in groups.iter().enumerate() {
        let id = key(group);
        match segments.iter_mut().find(|s| &s.id == id) {
            Some(segment) => segment.members.push(index),
            None => segments.push(Segment {
                id: id.clone(),
                members: vec![index],
            }),
        }
    }
    segments
}

/// Position groups of a portfolio, partitioned by funding and netting
/// segment once at construction.
///
/// Segments appear in the order their first member appears.
///
/// # Examples
///
/// ```
/// use exposure_xva::holdings::{PositionGroup, PositionGroupContainer};
/// use exposure_xva::specification::{
///     CollateralGroupSpecification, CounterpartyGroupSpecification, PositionGroupSpecification,
/// };
///
/// let spec = PositionGroupSpecification::new(
///     CollateralGroupSpecification::zero_threshold("CSA"),
///     CounterpartyGroupSpecification::new("CP", "Client", 0.02, 0.4).unwrap(),
/// );
/// let container = PositionGroupContainer::new(vec![
///     PositionGroup::new("PG1", "Rates", spec.clone(), "FS", "NS-A"),
///     PositionGroup::new("PG2", "FX", spec, "FS", "NS-B"),
/// ])
/// .unwrap();
/// assert_eq!(container.funding_segments().len(), 1);
/// assert_eq!(container.netting_segments().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct PositionGroupContainer {
    groups: Vec<PositionGroup>,
    funding_segments: Vec<Segment<FundingSegmentId>>,
    netting_segments: Vec<Segment<NettingSegmentId>>,
}

impl PositionGroupContainer {
    /// Creates the container and derives segment partitions.
    ///
    /// # Errors
    ///
    /// `HoldingsError::DuplicateGroup` if two groups share an identifier.
    pub fn new(groups: Vec<PositionGroup>) -> Result<Self, HoldingsError> {
        let mut seen = HashSet::with_capacity(groups.len());
        for group in &groups {
            if !seen.insert(group.id()) {
                return Err(HoldingsError::DuplicateGroup(group.id().clone()));
            }
        }
        let funding_segments = partition(&groups, PositionGroup::funding_segment);
        let netting_segments = partition(&groups, PositionGroup::netting_segment);
        Ok(Self {
            groups,
            funding_segments,
            netting_segments,
        })
    }

    /// Position groups.
    #[inline]
    pub fn groups(&self) -> &[PositionGroup] {
        &self.groups
    }

    /// Number of position groups.
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the container holds no groups.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Funding segment partition.
    #[inline]
    pub fn funding_segments(&self) -> &[Segment<FundingSegmentId>] {
        &self.funding_segments
    }

    /// Netting segment partition.
    #[inline]
    pub fn netting_segments(&self) -> &[Segment<NettingSegmentId>] {
        &self.netting_segments
    }
}
