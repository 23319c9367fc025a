//! Collateral and counterparty specifications.
//!
//! - [`CollateralGroupSpecification`]: thresholds, minimum transfer amount, margin period of risk
//! - [`CounterpartyGroupSpecification`]: hazard rate, recovery, rating, independent amount
//! - [`PositionGroupSpecification`]: the two combined for a position group
//! - Identifier newtypes for groups and segments

pub mod collateral_group;
pub mod counterparty_group;
pub mod error;
pub mod ids;
pub mod position_group;

pub use collateral_group::{CollateralGroupSpecification, MAX_MARGIN_PERIOD_OF_RISK_DAYS};
pub use counterparty_group::{CounterpartyGroupSpecification, CreditRating};
pub use error::SpecificationError;
pub use ids::{
    CollateralGroupId, CounterpartyGroupId, FundingSegmentId, NettingSegmentId, PositionGroupId,
};
pub use position_group::PositionGroupSpecification;
