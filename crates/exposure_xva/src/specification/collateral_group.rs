//! Collateral group (credit support) terms.

use super::error::SpecificationError;
use super::ids::CollateralGroupId;

/// Longest margin period of risk accepted, in calendar days.
pub const MAX_MARGIN_PERIOD_OF_RISK_DAYS: i64 = 366;

/// Variation-margin terms of a collateral agreement.
///
/// Thresholds are unsecured amounts each side tolerates before calling
/// collateral. The margin period of risk (MPoR) is the look-back, in
/// calendar days, between the last successful margin call and a close-out.
///
/// # Examples
///
/// ```
/// use exposure_xva::specification::CollateralGroupSpecification;
///
/// let spec = CollateralGroupSpecification::new("CSA-1", "Standard CSA", 1_000.0, 2_000.0, 100.0)
///     .unwrap()
///     .with_margin_period_of_risk(10, 10)
///     .unwrap();
/// assert_eq!(spec.client_threshold(), 2_000.0);
/// assert_eq!(spec.dealer_mpor_days(), 10);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CollateralGroupSpecification {
    id: CollateralGroupId,
    name: String,
    dealer_threshold: f64,
    client_threshold: f64,
    minimum_transfer_amount: f64,
    dealer_mpor_days: i64,
    client_mpor_days: i64,
}

impl CollateralGroupSpecification {
    /// Creates collateral terms with zero margin period of risk.
    ///
    /// # Errors
    ///
    /// `SpecificationError::InvalidCollateralGroup` if a threshold or the
    /// minimum transfer amount is negative or non-finite.
    pub fn new(
        id: impl Into<CollateralGroupId>,
        name: impl Into<String>,
        dealer_threshold: f64,
        client_threshold: f64,
        minimum_transfer_amount: f64,
    ) -> Result<Self, SpecificationError> {
        for (value, label) in [
            (dealer_threshold, "Dealer threshold"),
            (client_threshold, "Client threshold"),
            (minimum_transfer_amount, "Minimum transfer amount"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SpecificationError::InvalidCollateralGroup(format!(
                    "{} must be non-negative, got {}",
                    label, value
                )));
            }
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            dealer_threshold,
            client_threshold,
            minimum_transfer_amount,
            dealer_mpor_days: 0,
            client_mpor_days: 0,
        })
    }

    /// Zero-threshold, zero-MTA, zero-MPoR terms (full daily collateralisation).
    pub fn zero_threshold(id: impl Into<CollateralGroupId>) -> Self {
        Self {
            id: id.into(),
            name: "Zero Threshold".to_string(),
            dealer_threshold: 0.0,
            client_threshold: 0.0,
            minimum_transfer_amount: 0.0,
            dealer_mpor_days: 0,
            client_mpor_days: 0,
        }
    }

    /// Sets the dealer and client margin periods of risk in days.
    ///
    /// # Errors
    ///
    /// `SpecificationError::InvalidCollateralGroup` unless both lie in
    /// `0..=MAX_MARGIN_PERIOD_OF_RISK_DAYS`.
    pub fn with_margin_period_of_risk(
        mut self,
        dealer_days: i64,
        client_days: i64,
    ) -> Result<Self, SpecificationError> {
        let bounds = 0..=MAX_MARGIN_PERIOD_OF_RISK_DAYS;
        if !bounds.contains(&dealer_days) || !bounds.contains(&client_days) {
            return Err(SpecificationError::InvalidCollateralGroup(format!(
                "Margin period of risk must lie in 0..={} days, got dealer {} and client {}",
                MAX_MARGIN_PERIOD_OF_RISK_DAYS, dealer_days, client_days
            )));
        }
        self.dealer_mpor_days = dealer_days;
        self.client_mpor_days = client_days;
        Ok(self)
    }

    /// Identifier.
    #[inline]
    pub fn id(&self) -> &CollateralGroupId {
        &self.id
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Amount the dealer may owe before posting.
    #[inline]
    pub fn dealer_threshold(&self) -> f64 {
        self.dealer_threshold
    }

    /// Amount the client may owe before posting.
    #[inline]
    pub fn client_threshold(&self) -> f64 {
        self.client_threshold
    }

    /// Smallest balance change that triggers a transfer.
    #[inline]
    pub fn minimum_transfer_amount(&self) -> f64 {
        self.minimum_transfer_amount
    }

    /// Dealer margin period of risk in days.
    #[inline]
    pub fn dealer_mpor_days(&self) -> i64 {
        self.dealer_mpor_days
    }

    /// Client margin period of risk in days.
    #[inline]
    pub fn client_mpor_days(&self) -> i64 {
        self.client_mpor_days
    }
}
