//! Holdings: position groups and their funding and netting partitions.

pub mod container;
pub mod error;
pub mod position_group;

pub use container::{PositionGroupContainer, Segment};
pub use error::HoldingsError;
pub use position_group::{PositionGroup, PositionValuation};
