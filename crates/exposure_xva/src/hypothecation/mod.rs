//! Hypothecation: collateral estimation and exposure decomposition.
//!
//! ```text
//! BrokenDateBridge ──► CollateralAmountEstimator ──► collateral balance X
//!                                                       │
//! position value V, MarketEdge ──► ReplicationScheme::vertex ──► CollateralGroupVertex
//! ```

pub mod close_out;
pub mod error;
pub mod estimator;
pub mod replication;
pub mod vertex;

pub use close_out::CloseOutScheme;
pub use error::HypothecationError;
pub use estimator::{CollateralAmountEstimator, CollateralAmountEstimatorOutput};
pub use replication::{ReplicationInput, ReplicationScheme};
pub use vertex::{CollateralGroupVertex, ExposureComponents};
