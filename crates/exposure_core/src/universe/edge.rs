//! Market edge: the period between two consecutive vertices.

use super::error::UniverseError;
use super::vertex::MarketVertex;
use crate::types::year_fraction_365_25;

/// Ordered pair of consecutive market vertices.
///
/// A degenerate edge (start and finish on the same vertex) has zero width
/// and stands in for the period ending at the epochal vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarketEdge {
    start: MarketVertex,
    finish: MarketVertex,
}

impl MarketEdge {
    /// Creates an edge between two vertices.
    ///
    /// # Errors
    ///
    /// Returns `UniverseError::InvalidEdge` unless `finish` is strictly after `start`.
    pub fn new(start: MarketVertex, finish: MarketVertex) -> Result<Self, UniverseError> {
        if finish.anchor_date() <= start.anchor_date() {
            return Err(UniverseError::InvalidEdge {
                start: start.anchor_date(),
                finish: finish.anchor_date(),
            });
        }
        Ok(Self { start, finish })
    }

    /// Edge between vertices already known to be ordered.
    pub(crate) fn spanning(start: MarketVertex, finish: MarketVertex) -> Self {
        Self { start, finish }
    }

    /// Zero-width edge anchored on a single vertex.
    pub fn degenerate(vertex: MarketVertex) -> Self {
        Self {
            start: vertex,
            finish: vertex,
        }
    }

    /// Start vertex.
    #[inline]
    pub fn start(&self) -> &MarketVertex {
        &self.start
    }

    /// Finish vertex.
    #[inline]
    pub fn finish(&self) -> &MarketVertex {
        &self.finish
    }

    /// Whether the edge has zero width.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start.anchor_date() == self.finish.anchor_date()
    }

    /// Calendar days spanned by the edge.
    #[inline]
    pub fn days(&self) -> i64 {
        self.finish.anchor_date() - self.start.anchor_date()
    }

    /// Period width as an Act/365.25 year fraction.
    #[inline]
    pub fn year_fraction(&self) -> f64 {
        year_fraction_365_25(self.start.anchor_date(), self.finish.anchor_date())
    }

    /// Dealer funding spread accrued over the edge (trapezoidal rule).
    #[inline]
    pub fn funding_spread_accrual(&self) -> f64 {
        0.5 * (self.start.dealer().funding_spread() + self.finish.dealer().funding_spread())
            * self.year_fraction()
    }

    /// Dealer recovery rate at the finish vertex.
    #[inline]
    pub fn finish_dealer_recovery(&self) -> f64 {
        self.finish.dealer().recovery_rate()
    }
}
