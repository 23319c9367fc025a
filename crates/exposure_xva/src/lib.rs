//! # exposure_xva (L4: Application)
//!
//! Collateralised exposure simulation and valuation-adjustment aggregation.
//!
//! This crate provides:
//! - Collateral and counterparty terms of position groups
//! - Variation-margin estimation and replication-scheme exposure decomposition
//! - Per-trajectory collateral group paths with funding and credit-debt digests
//! - A rayon-parallel path simulator
//! - Cross-trajectory aggregation (CVA, DVA, FCA, FBA, FVA, ColVA, EE, PFE)
//! - TOML configuration with environment overrides
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              exposure_xva (L4)               │
//! ├──────────────────────────────────────────────┤
//! │  specification/ - Collateral, counterparty   │
//! │  hypothecation/ - Estimator, replication     │
//! │  holdings/      - Position groups, segments  │
//! │  netting/       - Group paths and digests    │
//! │  dynamics/      - PathSimulator, schemes     │
//! │  adjustment/    - Path and portfolio XVA     │
//! │  exposure/      - EE, ENE, PFE, EPE          │
//! │  parallel/      - Rayon utilities            │
//! │  config         - SimulationConfig           │
//! └──────────────────────────────────────────────┘
//!          ↓
//! ┌──────────────────────────────────────────────┐
//! │             exposure_core (L1)               │
//! │  Dates, market universe, bridges, draws      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use exposure_core::rng::UnitDrawGenerator;
//! use exposure_core::types::Date;
//! use exposure_core::universe::{BrownianVertexGenerator, MarketVertex, MarketVertexEntity};
//! use exposure_xva::dynamics::PathSimulator;
//! use exposure_xva::holdings::{PositionGroup, PositionGroupContainer};
//! use exposure_xva::specification::{
//!     CollateralGroupSpecification, CounterpartyGroupSpecification, PositionGroupSpecification,
//! };
//!
//! let spec = PositionGroupSpecification::new(
//!     CollateralGroupSpecification::zero_threshold("CSA"),
//!     CounterpartyGroupSpecification::new("CP", "Client", 0.02, 0.4).unwrap(),
//! );
//! let container = PositionGroupContainer::new(vec![
//!     PositionGroup::new("PG1", "Swaps", spec, "FS", "NS"),
//! ])
//! .unwrap();
//!
//! let initial = MarketVertex::new(
//!     Date::from_ymd(2024, 1, 1).unwrap(),
//!     0.0,
//!     1.0,
//!     0.0,
//!     MarketVertexEntity::new(0.01, 1.0, 0.4, 0.002),
//!     MarketVertexEntity::new(0.02, 1.0, 0.4, 0.0),
//! )
//! .unwrap();
//!
//! let simulator = PathSimulator::unit_position_group_value(
//!     16,
//!     Arc::new(BrownianVertexGenerator::new(30, 0.0, 10.0).unwrap()),
//!     Arc::new(container),
//! )
//! .unwrap();
//!
//! let aggregator = simulator
//!     .simulate(&initial, &UnitDrawGenerator::new(42, 12, 1))
//!     .unwrap();
//! assert_eq!(aggregator.path_count(), 16);
//! assert_eq!(aggregator.vertex_dates().len(), 13);
//! ```

#![deny(missing_docs)]

pub mod adjustment;
pub mod config;
pub mod dynamics;
pub mod exposure;
pub mod holdings;
pub mod hypothecation;
pub mod netting;
pub mod parallel;
pub mod specification;

// Re-export commonly used types
pub use adjustment::{AdjustmentSummary, ExposureAdjustmentAggregator, PathExposureAdjustment};
pub use config::{ConfigError, SimulationConfig};
pub use dynamics::{PathSimulator, PathSimulatorScheme, SimulationError};
pub use exposure::ExposureCalculator;
pub use parallel::ParallelConfig;
