//! Market vertex: the simulated market state on one anchor date.

use super::error::UniverseError;
use crate::types::Date;

/// Market state of a single entity (dealer or client) at a vertex.
///
/// # Examples
///
/// ```
/// use exposure_core::universe::MarketVertexEntity;
///
/// let dealer = MarketVertexEntity::new(0.01, 0.99, 0.4, 0.005);
/// assert_eq!(dealer.loss_given_default(), 0.6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketVertexEntity {
    hazard_rate: f64,
    survival_probability: f64,
    recovery_rate: f64,
    funding_spread: f64,
}

impl MarketVertexEntity {
    /// Creates an entity state. Validation happens when the state is
    /// attached to a [`MarketVertex`].
    pub const fn new(
        hazard_rate: f64,
        survival_probability: f64,
        recovery_rate: f64,
        funding_spread: f64,
    ) -> Self {
        Self {
            hazard_rate,
            survival_probability,
            recovery_rate,
            funding_spread,
        }
    }

    /// Riskless entity: zero hazard, certain survival, full recovery, no spread.
    pub const fn riskless() -> Self {
        Self::new(0.0, 1.0, 1.0, 0.0)
    }

    /// Annualised hazard rate.
    #[inline]
    pub fn hazard_rate(&self) -> f64 {
        self.hazard_rate
    }

    /// Survival probability from the epoch to this vertex.
    #[inline]
    pub fn survival_probability(&self) -> f64 {
        self.survival_probability
    }

    /// Recovery rate on default.
    #[inline]
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// Loss given default, `1 - recovery`.
    #[inline]
    pub fn loss_given_default(&self) -> f64 {
        1.0 - self.recovery_rate
    }

    /// Unsecured funding spread over the overnight rate.
    #[inline]
    pub fn funding_spread(&self) -> f64 {
        self.funding_spread
    }

    fn validate(&self, date: Date, names: [&'static str; 4]) -> Result<(), UniverseError> {
        let fields = [
            self.hazard_rate,
            self.survival_probability,
            self.recovery_rate,
            self.funding_spread,
        ];
        for (value, field) in fields.iter().zip(names) {
            if !value.is_finite() {
                return Err(UniverseError::NonFinite { field, date });
            }
        }
        for (value, field) in [
            (self.survival_probability, names[1]),
            (self.recovery_rate, names[2]),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(UniverseError::OutOfUnitInterval { field, date, value });
            }
        }
        Ok(())
    }
}

impl Default for MarketVertexEntity {
    fn default() -> Self {
        Self::riskless()
    }
}

const DEALER_FIELDS: [&str; 4] = [
    "dealer.hazard_rate",
    "dealer.survival_probability",
    "dealer.recovery_rate",
    "dealer.funding_spread",
];

const CLIENT_FIELDS: [&str; 4] = [
    "client.hazard_rate",
    "client.survival_probability",
    "client.recovery_rate",
    "client.funding_spread",
];

/// Immutable market state on one anchor date of a trajectory.
///
/// The position-manifest value is the portfolio value in numeraire units;
/// position groups scale it by their own numeraire valuation.
///
/// # Examples
///
/// ```
/// use exposure_core::types::Date;
/// use exposure_core::universe::{MarketVertex, MarketVertexEntity};
///
/// let t0 = Date::from_ymd(2024, 1, 1).unwrap();
/// let vertex = MarketVertex::new(
///     t0,
///     100.0,
///     1.0,
///     0.0,
///     MarketVertexEntity::riskless(),
///     MarketVertexEntity::riskless(),
/// )
/// .unwrap();
/// assert_eq!(vertex.anchor_date(), t0);
/// assert!(MarketVertex::new(t0, f64::NAN, 1.0, 0.0, Default::default(), Default::default()).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketVertex {
    anchor_date: Date,
    position_manifest_value: f64,
    overnight_replicator: f64,
    csa_spread: f64,
    dealer: MarketVertexEntity,
    client: MarketVertexEntity,
}

impl MarketVertex {
    /// Creates a validated market vertex.
    ///
    /// # Errors
    ///
    /// - `UniverseError::NonFinite` if any numeric field is NaN or infinite
    /// - `UniverseError::NonPositiveReplicator` if the replicator is not positive
    /// - `UniverseError::OutOfUnitInterval` if a survival or recovery is outside [0, 1]
    pub fn new(
        anchor_date: Date,
        position_manifest_value: f64,
        overnight_replicator: f64,
        csa_spread: f64,
        dealer: MarketVertexEntity,
        client: MarketVertexEntity,
    ) -> Result<Self, UniverseError> {
        for (value, field) in [
            (position_manifest_value, "position_manifest_value"),
            (overnight_replicator, "overnight_replicator"),
            (csa_spread, "csa_spread"),
        ] {
            if !value.is_finite() {
                return Err(UniverseError::NonFinite {
                    field,
                    date: anchor_date,
                });
            }
        }
        if overnight_replicator <= 0.0 {
            return Err(UniverseError::NonPositiveReplicator {
                date: anchor_date,
                value: overnight_replicator,
            });
        }
        dealer.validate(anchor_date, DEALER_FIELDS)?;
        client.validate(anchor_date, CLIENT_FIELDS)?;

        Ok(Self {
            anchor_date,
            position_manifest_value,
            overnight_replicator,
            csa_spread,
            dealer,
            client,
        })
    }

    /// Anchor date of the vertex.
    #[inline]
    pub fn anchor_date(&self) -> Date {
        self.anchor_date
    }

    /// Portfolio value in numeraire units.
    #[inline]
    pub fn position_manifest_value(&self) -> f64 {
        self.position_manifest_value
    }

    /// Overnight (risk-free) accumulator used to present-value amounts.
    #[inline]
    pub fn overnight_replicator(&self) -> f64 {
        self.overnight_replicator
    }

    /// Spread paid on posted collateral over the overnight rate.
    #[inline]
    pub fn csa_spread(&self) -> f64 {
        self.csa_spread
    }

    /// Dealer (own) entity state.
    #[inline]
    pub fn dealer(&self) -> &MarketVertexEntity {
        &self.dealer
    }

    /// Client (counterparty) entity state.
    #[inline]
    pub fn client(&self) -> &MarketVertexEntity {
        &self.client
    }

    /// Discount factor from this vertex back to `epochal`, `rep(t0) / rep(t)`.
    #[inline]
    pub fn discount_to(&self, epochal: &MarketVertex) -> f64 {
        epochal.overnight_replicator / self.overnight_replicator
    }
}
