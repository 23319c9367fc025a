//! # exposure_core: Market Foundation for Exposure Simulation
//!
//! ## Layer 1 (Foundation) Role
//!
//! exposure_core is the bottom layer of the workspace, providing:
//! - Calendar types: `Date` and the ACT/365.25 year fraction (`types`)
//! - Market universe: `MarketVertex`, `MarketEdge`, `MarketPath` and the
//!   `MarketVertexGenerator` contract (`universe`)
//! - Broken-date interpolation for margin look-back dates (`bridge`)
//! - Seeded, optionally correlated unit draws (`rng`)
//!
//! ## Dependencies
//!
//! Layer 1 depends on no other workspace crate:
//! - chrono: Date arithmetic
//! - rand / rand_distr: Seeded standard-normal draws
//! - thiserror: Error enums
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use exposure_core::rng::UnitDrawGenerator;
//! use exposure_core::types::Date;
//! use exposure_core::universe::{
//!     BrownianVertexGenerator, MarketPath, MarketVertex, MarketVertexEntity, MarketVertexGenerator,
//! };
//!
//! let t0 = Date::from_ymd(2024, 1, 1).unwrap();
//! let initial = MarketVertex::new(
//!     t0,
//!     0.0,
//!     1.0,
//!     0.0,
//!     MarketVertexEntity::new(0.01, 1.0, 0.4, 0.002),
//!     MarketVertexEntity::new(0.02, 1.0, 0.4, 0.0),
//! )
//! .unwrap();
//!
//! let generator = BrownianVertexGenerator::new(30, 0.0, 10.0).unwrap();
//! let draws = UnitDrawGenerator::new(42, 12, 1).draws(0);
//! let path = MarketPath::new(generator.generate(&initial, &draws).unwrap()).unwrap();
//! assert_eq!(path.len(), 13);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Date`, `MarketVertex` and
//!   `BrokenDateScheme`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod bridge;
pub mod rng;
pub mod types;
pub mod universe;
