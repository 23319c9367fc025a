//! Trajectory simulation.
//!
//! `PathSimulator` turns unit draws into market paths, collateral balances
//! and exposure decompositions for every position group, then digests them
//! into per-trajectory adjustments under a `PathSimulatorScheme`.

pub mod error;
pub mod scheme;
pub mod simulator;

pub use error::SimulationError;
pub use scheme::{AdjustmentDigestScheme, PathSimulatorScheme};
pub use simulator::PathSimulator;
