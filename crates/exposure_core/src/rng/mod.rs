//! Unit-draw generation.
//!
//! - [`DrawRng`]: seeded standard-normal stream, one per trajectory
//! - [`CorrelationMatrix`] / [`CholeskyFactor`]: factor correlation
//! - [`UnitDrawMatrix`] / [`UnitDrawGenerator`]: step-by-factor draw matrices
//!   fed to market vertex generators

pub mod correlated;
pub mod draws;
pub mod error;
pub mod prng;

pub use correlated::{CholeskyFactor, CorrelationMatrix};
pub use draws::{UnitDrawGenerator, UnitDrawMatrix};
pub use error::CorrelationError;
pub use prng::DrawRng;
