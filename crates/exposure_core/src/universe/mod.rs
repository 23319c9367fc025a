//! Market universe: the simulated market states a trajectory walks through.
//!
//! ```text
//! MarketVertex ──► MarketEdge (consecutive pair)
//!      │
//!      └──► MarketPath (ordered, strictly increasing dates, epochal vertex first)
//!                ▲
//! UnitDrawMatrix ──► MarketVertexGenerator::generate
//! ```

pub mod edge;
pub mod error;
pub mod generator;
pub mod path;
pub mod vertex;

pub use edge::MarketEdge;
pub use error::UniverseError;
pub use generator::{BrownianVertexGenerator, MarketVertexGenerator, MAX_STEP_DAYS};
pub use path::MarketPath;
pub use vertex::{MarketVertex, MarketVertexEntity};
