//! Counterparty group credit terms.

use std::fmt;
use std::str::FromStr;

use super::error::SpecificationError;
use super::ids::CounterpartyGroupId;

/// Credit rating following the standard agency scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum CreditRating {
    /// Highest quality
    AAA,
    /// High quality
    AA,
    /// Upper medium grade
    A,
    /// Lower medium grade (investment grade threshold)
    BBB,
    /// Non-investment grade speculative
    BB,
    /// Highly speculative
    B,
    /// Substantial risks
    CCC,
    /// Extremely speculative
    CC,
    /// Default imminent
    C,
    /// In default
    D,
}

impl CreditRating {
    /// Whether the rating is investment grade (BBB or better).
    #[inline]
    pub fn is_investment_grade(&self) -> bool {
        *self <= CreditRating::BBB
    }

    /// Indicative annual hazard rate for the rating.
    pub fn indicative_hazard_rate(&self) -> f64 {
        match self {
            CreditRating::AAA => 0.0001,
            CreditRating::AA => 0.0005,
            CreditRating::A => 0.001,
            CreditRating::BBB => 0.002,
            CreditRating::BB => 0.01,
            CreditRating::B => 0.03,
            CreditRating::CCC => 0.10,
            CreditRating::CC => 0.20,
            CreditRating::C => 0.40,
            CreditRating::D => 1.0,
        }
    }
}

impl FromStr for CreditRating {
    type Err = SpecificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AAA" => Ok(CreditRating::AAA),
            "AA" => Ok(CreditRating::AA),
            "A" => Ok(CreditRating::A),
            "BBB" => Ok(CreditRating::BBB),
            "BB" => Ok(CreditRating::BB),
            "B" => Ok(CreditRating::B),
            "CCC" => Ok(CreditRating::CCC),
            "CC" => Ok(CreditRating::CC),
            "C" => Ok(CreditRating::C),
            "D" => Ok(CreditRating::D),
            _ => Err(SpecificationError::UnknownRating(s.to_string())),
        }
    }
}

impl fmt::Display for CreditRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Credit terms of a counterparty group.
///
/// The independent amount is collateral held regardless of exposure;
/// positive when the client posts it to the dealer.
///
/// # Examples
///
/// ```
/// use exposure_xva::specification::{CounterpartyGroupSpecification, CreditRating};
///
/// let spec = CounterpartyGroupSpecification::new("CP-1", "Client", 0.02, 0.4)
///     .unwrap()
///     .with_rating(CreditRating::A)
///     .with_independent_amount(50.0)
///     .unwrap();
/// assert!((spec.loss_given_default() - 0.6).abs() < 1e-15);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CounterpartyGroupSpecification {
    id: CounterpartyGroupId,
    name: String,
    hazard_rate: f64,
    recovery_rate: f64,
    rating: Option<CreditRating>,
    independent_amount: f64,
}

impl CounterpartyGroupSpecification {
    /// Creates credit terms.
    ///
    /// # Errors
    ///
    /// `SpecificationError::InvalidCounterpartyGroup` if the hazard rate is
    /// negative or the recovery rate lies outside [0, 1].
    pub fn new(
        id: impl Into<CounterpartyGroupId>,
        name: impl Into<String>,
        hazard_rate: f64,
        recovery_rate: f64,
    ) -> Result<Self, SpecificationError> {
        if !hazard_rate.is_finite() || hazard_rate < 0.0 {
            return Err(SpecificationError::InvalidCounterpartyGroup(
                "Hazard rate must be non-negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&recovery_rate) {
            return Err(SpecificationError::InvalidCounterpartyGroup(format!(
                "Recovery rate must be in [0, 1], got {}",
                recovery_rate
            )));
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            hazard_rate,
            recovery_rate,
            rating: None,
            independent_amount: 0.0,
        })
    }

    /// Terms with hazard rate taken from a rating.
    pub fn from_rating(
        id: impl Into<CounterpartyGroupId>,
        name: impl Into<String>,
        rating: CreditRating,
        recovery_rate: f64,
    ) -> Result<Self, SpecificationError> {
        Ok(Self::new(id, name, rating.indicative_hazard_rate(), recovery_rate)?.with_rating(rating))
    }

    /// Attaches a credit rating.
    pub fn with_rating(mut self, rating: CreditRating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the independent amount.
    pub fn with_independent_amount(mut self, amount: f64) -> Result<Self, SpecificationError> {
        if !amount.is_finite() {
            return Err(SpecificationError::InvalidCounterpartyGroup(
                "Independent amount must be finite".to_string(),
            ));
        }
        self.independent_amount = amount;
        Ok(self)
    }

    /// Identifier.
    #[inline]
    pub fn id(&self) -> &CounterpartyGroupId {
        &self.id
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Annualised hazard rate.
    #[inline]
    pub fn hazard_rate(&self) -> f64 {
        self.hazard_rate
    }

    /// Recovery rate on default.
    #[inline]
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// Loss given default.
    #[inline]
    pub fn loss_given_default(&self) -> f64 {
        1.0 - self.recovery_rate
    }

    /// Credit rating, if known.
    #[inline]
    pub fn rating(&self) -> Option<CreditRating> {
        self.rating
    }

    /// Independent amount.
    #[inline]
    pub fn independent_amount(&self) -> f64 {
        self.independent_amount
    }

    /// Survival probability to `t` years under a flat hazard rate.
    #[inline]
    pub fn survival_probability(&self, t: f64) -> f64 {
        (-self.hazard_rate * t).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validation() {
        assert!(CounterpartyGroupSpecification::new("X", "X", -0.01, 0.4).is_err());
        assert!(CounterpartyGroupSpecification::new("X", "X", 0.01, 1.4).is_err());
        assert!(CounterpartyGroupSpecification::new("X", "X", 0.01, 0.4)
            .unwrap()
            .with_independent_amount(f64::INFINITY)
            .is_err());
    }

    #[test]
    fn test_rating_drives_hazard() {
        let spec =
            CounterpartyGroupSpecification::from_rating("X", "X", CreditRating::BB, 0.4).unwrap();
        assert_eq!(spec.rating(), Some(CreditRating::BB));
        assert_relative_eq!(spec.hazard_rate(), 0.01);
        assert!(!CreditRating::BB.is_investment_grade());
        assert!(CreditRating::BBB.is_investment_grade());
        assert_relative_eq!(spec.survival_probability(1.0), (-0.01f64).exp());
    }

    #[test]
    fn test_rating_parse() {
        assert_eq!("bbb".parse::<CreditRating>().unwrap(), CreditRating::BBB);
        assert!("Z".parse::<CreditRating>().is_err());
        assert_eq!(CreditRating::AA.to_string(), "AA");
    }
}
