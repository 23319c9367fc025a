//! Market vertex generator contract.
//!
//! A generator expands an initial vertex and a matrix of unit draws into
//! the dated vertex sequence of one trajectory. Stochastic models live
//! outside this workspace and plug in through [`MarketVertexGenerator`];
//! [`BrownianVertexGenerator`] is a minimal model for scenarios and
//! benchmarks.

use super::error::UniverseError;
use super::vertex::{MarketVertex, MarketVertexEntity};
use crate::rng::UnitDrawMatrix;
use crate::types::year_fraction_365_25;

/// Expands unit draws into market vertices.
///
/// Implementations must return exactly `draws.rows() + 1` vertices, the
/// first being `initial`, with strictly increasing anchor dates.
pub trait MarketVertexGenerator: Send + Sync {
    /// Generates one trajectory.
    fn generate(
        &self,
        initial: &MarketVertex,
        draws: &UnitDrawMatrix,
    ) -> Result<Vec<MarketVertex>, UniverseError>;

    /// Number of draw factors consumed per step.
    fn factor_count(&self) -> usize {
        1
    }
}

/// Longest calendar step accepted by [`BrownianVertexGenerator`] (ten years).
pub const MAX_STEP_DAYS: i64 = 3_653;

/// Arithmetic Brownian position value on a fixed step calendar.
///
/// Per step of `dt` years:
///
/// ```text
/// V(t+dt) = V(t) + drift * dt + volatility * sqrt(dt) * z
/// rep(t+dt) = rep(t) * exp(rate * dt)
/// S(t+dt) = S(t) * exp(-hazard * dt)
/// ```
///
/// Hazard rates, recoveries and spreads are carried from the initial vertex.
///
/// # Examples
///
/// ```
/// use exposure_core::rng::UnitDrawMatrix;
/// use exposure_core::types::Date;
/// use exposure_core::universe::{BrownianVertexGenerator, MarketVertex, MarketVertexEntity, MarketVertexGenerator};
///
/// let t0 = Date::from_ymd(2024, 1, 1).unwrap();
/// let initial = MarketVertex::new(t0, 10.0, 1.0, 0.0, Default::default(), Default::default()).unwrap();
/// let generator = BrownianVertexGenerator::new(30, 0.0, 5.0).unwrap();
/// let vertices = generator.generate(&initial, &UnitDrawMatrix::zeros(4, 1)).unwrap();
/// assert_eq!(vertices.len(), 5);
/// assert_eq!(vertices[4].position_manifest_value(), 10.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BrownianVertexGenerator {
    step_days: i64,
    drift: f64,
    volatility: f64,
    rate: f64,
}

impl BrownianVertexGenerator {
    /// Creates a generator stepping `step_days` calendar days at a time.
    ///
    /// # Errors
    ///
    /// `UniverseError::Generation` if `step_days` lies outside
    /// `1..=MAX_STEP_DAYS`, or the drift or volatility is non-finite or the
    /// volatility is negative.
    pub fn new(step_days: i64, drift: f64, volatility: f64) -> Result<Self, UniverseError> {
        if !(1..=MAX_STEP_DAYS).contains(&step_days) {
            return Err(UniverseError::Generation(format!(
                "Step must lie in 1..={} days, got {}",
                MAX_STEP_DAYS, step_days
            )));
        }
        if !drift.is_finite() || !volatility.is_finite() || volatility < 0.0 {
            return Err(UniverseError::Generation(
                "Drift and volatility must be finite, volatility non-negative".to_string(),
            ));
        }
        Ok(Self {
            step_days,
            drift,
            volatility,
            rate: 0.0,
        })
    }

    /// Sets the continuously compounded overnight rate.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Step width in days.
    #[inline]
    pub fn step_days(&self) -> i64 {
        self.step_days
    }

    fn decay(entity: &MarketVertexEntity, dt: f64) -> MarketVertexEntity {
        MarketVertexEntity::new(
            entity.hazard_rate(),
            entity.survival_probability() * (-entity.hazard_rate() * dt).exp(),
            entity.recovery_rate(),
            entity.funding_spread(),
        )
    }
}

impl MarketVertexGenerator for BrownianVertexGenerator {
    fn generate(
        &self,
        initial: &MarketVertex,
        draws: &UnitDrawMatrix,
    ) -> Result<Vec<MarketVertex>, UniverseError> {
        if draws.rows() > 0 && draws.factors() < 1 {
            return Err(UniverseError::Generation(
                "Brownian generator needs one draw factor".to_string(),
            ));
        }

        let mut vertices = Vec::with_capacity(draws.rows() + 1);
        vertices.push(*initial);

        let mut current = *initial;
        for row in draws.iter_rows() {
            let date = current.anchor_date().add_days(self.step_days)?;
            let dt = year_fraction_365_25(current.anchor_date(), date);
            let value = current.position_manifest_value()
                + self.drift * dt
                + self.volatility * dt.sqrt() * row[0];
            current = MarketVertex::new(
                date,
                value,
                current.overnight_replicator() * (self.rate * dt).exp(),
                current.csa_spread(),
                Self::decay(current.dealer(), dt),
                Self::decay(current.client(), dt),
            )?;
            vertices.push(current);
        }
        Ok(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Date, DateError};
    use approx::assert_relative_eq;

    fn initial() -> MarketVertex {
        MarketVertex::new(
            Date::from_ymd(2024, 1, 1).unwrap(),
            0.0,
            1.0,
            0.001,
            MarketVertexEntity::new(0.01, 1.0, 0.4, 0.002),
            MarketVertexEntity::new(0.03, 1.0, 0.4, 0.0),
        )
        .unwrap()
    }

    #[test]
    fn test_step_calendar_and_decay() {
        let generator = BrownianVertexGenerator::new(365, 0.0, 1.0)
            .unwrap()
            .with_rate(0.05);
        let draws = UnitDrawMatrix::new(vec![1.0, -1.0], 2, 1).unwrap();
        let vertices = generator.generate(&initial(), &draws).unwrap();

        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[2].anchor_date() - vertices[0].anchor_date(), 730);
        let dt: f64 = 365.0 / 365.25;
        assert_relative_eq!(vertices[1].position_manifest_value(), dt.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(vertices[2].position_manifest_value(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(vertices[1].overnight_replicator(), (0.05 * dt).exp(), epsilon = 1e-12);
        assert_relative_eq!(
            vertices[2].client().survival_probability(),
            (-0.03 * 2.0 * dt).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(BrownianVertexGenerator::new(0, 0.0, 1.0).is_err());
        assert!(BrownianVertexGenerator::new(MAX_STEP_DAYS, 0.0, 1.0).is_ok());
        assert!(BrownianVertexGenerator::new(MAX_STEP_DAYS + 1, 0.0, 1.0).is_err());
        assert!(BrownianVertexGenerator::new(i64::MAX, 0.0, 1.0).is_err());
        assert!(BrownianVertexGenerator::new(30, 0.0, -1.0).is_err());
    }

    #[test]
    fn test_step_past_calendar_end_is_an_error() {
        let last = MarketVertex::new(
            Date::from_naive(chrono::NaiveDate::MAX),
            0.0,
            1.0,
            0.0,
            MarketVertexEntity::default(),
            MarketVertexEntity::default(),
        )
        .unwrap();
        let generator = BrownianVertexGenerator::new(30, 0.0, 1.0).unwrap();
        let result = generator.generate(&last, &UnitDrawMatrix::zeros(1, 1));
        assert!(matches!(
            result,
            Err(UniverseError::Date(DateError::OutOfRange { days: 30, .. }))
        ));
    }
}
