//! Valuation adjustments per trajectory and across trajectories.
//!
//! ```text
//! PathSimulator ──► PathExposureAdjustment (one per trajectory)
//!                        │ CVA, DVA, FCA, FBA, FVA, ColVA, PV series
//!                        ▼
//!              ExposureAdjustmentAggregator
//!                        │ means, path-wise values, EE / ENE / PFE / EPE,
//!                        ▼ per-segment digests
//!                 AdjustmentSummary
//! ```

pub mod aggregator;
pub mod error;
pub mod path_adjustment;

pub use aggregator::{
    AdjustmentSummary, CreditDebtGroupDigest, ExposureAdjustmentAggregator, FundingGroupDigest,
};
pub use error::AdjustmentError;
pub use path_adjustment::PathExposureAdjustment;
