//! Combined terms of a position group.

use super::collateral_group::CollateralGroupSpecification;
use super::counterparty_group::CounterpartyGroupSpecification;

/// Collateral and credit terms governing one position group.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionGroupSpecification {
    collateral_group: CollateralGroupSpecification,
    counterparty_group: CounterpartyGroupSpecification,
}

impl PositionGroupSpecification {
    /// Combines collateral and counterparty terms.
    pub fn new(
        collateral_group: CollateralGroupSpecification,
        counterparty_group: CounterpartyGroupSpecification,
    ) -> Self {
        Self {
            collateral_group,
            counterparty_group,
        }
    }

    /// Collateral terms.
    #[inline]
    pub fn collateral_group(&self) -> &CollateralGroupSpecification {
        &self.collateral_group
    }

    /// Counterparty credit terms.
    #[inline]
    pub fn counterparty_group(&self) -> &CounterpartyGroupSpecification {
        &self.counterparty_group
    }
}
