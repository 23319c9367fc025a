//! Variation-margin collateral estimation.
//!
//! On each vertex date the collateral balance reflects the position value
//! observed one margin period of risk earlier, since the last margin call
//! that could have settled before a close-out was made on that date:
//!
//! ```text
//! dealer posting  = min(V(t - MPoR_dealer) + H_dealer, 0)   (we post)
//! client posting  = max(V(t - MPoR_client) - H_client, 0)   (we receive)
//! requirement     = dealer posting + client posting + independent amount
//! ```
//!
//! A change smaller than the minimum transfer amount leaves the previous
//! balance in place.

use exposure_core::bridge::BrokenDateInterpolator;
use exposure_core::types::Date;

use super::error::HypothecationError;
use crate::specification::{
    CollateralGroupSpecification, CounterpartyGroupSpecification, PositionGroupSpecification,
};

/// Full breakdown of one collateral estimate.
#[derive(Clone, Debug, PartialEq)]
pub struct CollateralAmountEstimatorOutput {
    /// Date the estimate was made for.
    pub date: Date,
    /// Look-back date for the dealer's posting.
    pub dealer_margin_date: Date,
    /// Look-back date for the client's posting.
    pub client_margin_date: Date,
    /// Position value at the dealer margin date.
    pub dealer_window_value: f64,
    /// Position value at the client margin date.
    pub client_window_value: f64,
    /// Dealer threshold.
    pub dealer_threshold: f64,
    /// Client threshold.
    pub client_threshold: f64,
    /// Collateral the dealer must post (non-positive).
    pub dealer_posting_requirement: f64,
    /// Collateral the client must post (non-negative).
    pub client_posting_requirement: f64,
    /// Independent amount.
    pub independent_amount: f64,
    /// Requirement before the minimum transfer amount is applied.
    pub unadjusted_requirement: f64,
    /// Collateral balance after the minimum transfer amount.
    pub posting_requirement: f64,
}

/// Estimates the collateral balance of one position group on a date.
///
/// `lane` selects the position group's lane in a multi-lane interpolator.
///
/// # Examples
///
/// ```
/// use exposure_core::bridge::{BridgeAnchor, LinearTimeInterpolator};
/// use exposure_core::types::Date;
/// use exposure_xva::hypothecation::CollateralAmountEstimator;
/// use exposure_xva::specification::{
///     CollateralGroupSpecification, CounterpartyGroupSpecification, PositionGroupSpecification,
/// };
///
/// let t0 = Date::from_ymd(2024, 1, 1).unwrap();
/// let interp = LinearTimeInterpolator::new(
///     BridgeAnchor::scalar(t0, 100.0),
///     BridgeAnchor::scalar(t0.add_days(30).unwrap(), 80.0),
/// )
/// .unwrap();
/// let spec = PositionGroupSpecification::new(
///     CollateralGroupSpecification::zero_threshold("CSA"),
///     CounterpartyGroupSpecification::new("CP", "Client", 0.02, 0.4).unwrap(),
/// );
///
/// let estimator = CollateralAmountEstimator::new(&spec, &interp, 0);
/// assert_eq!(estimator.posting_requirement(t0.add_days(30).unwrap()).unwrap(), 80.0);
/// ```
pub struct CollateralAmountEstimator<'a, I: BrokenDateInterpolator + ?Sized> {
    collateral_group: &'a CollateralGroupSpecification,
    counterparty_group: &'a CounterpartyGroupSpecification,
    interpolator: &'a I,
    lane: usize,
    previous_balance: Option<f64>,
}

impl<'a, I: BrokenDateInterpolator + ?Sized> CollateralAmountEstimator<'a, I> {
    /// Creates an estimator over `lane` of `interpolator`.
    pub fn new(spec: &'a PositionGroupSpecification, interpolator: &'a I, lane: usize) -> Self {
        Self {
            collateral_group: spec.collateral_group(),
            counterparty_group: spec.counterparty_group(),
            interpolator,
            lane,
            previous_balance: None,
        }
    }

    /// Sets the previous collateral balance used for the minimum transfer
    /// test. A non-finite hint counts as no hint.
    pub fn with_previous_balance(mut self, balance: f64) -> Self {
        self.previous_balance = balance.is_finite().then_some(balance);
        self
    }

    /// Previous balance hint, if any.
    #[inline]
    pub fn previous_balance(&self) -> Option<f64> {
        self.previous_balance
    }

    /// Full estimate breakdown on `date`.
    ///
    /// # Errors
    ///
    /// - `HypothecationError::Date` if a margin date falls off the calendar
    /// - `HypothecationError::Interpolation` if a margin date falls outside
    ///   the interpolator bracket
    /// - `HypothecationError::NonFinite` if the result is not finite
    pub fn output(&self, date: Date) -> Result<CollateralAmountEstimatorOutput, HypothecationError> {
        let collateral = self.collateral_group;

        let dealer_margin_date = date.sub_days(collateral.dealer_mpor_days())?;
        let client_margin_date = date.sub_days(collateral.client_mpor_days())?;

        let dealer_window_value = self
            .interpolator
            .interpolate_lane(dealer_margin_date, self.lane)?;
        let client_window_value = self
            .interpolator
            .interpolate_lane(client_margin_date, self.lane)?;

        let dealer_threshold = collateral.dealer_threshold();
        let client_threshold = collateral.client_threshold();
        let dealer_posting_requirement = (dealer_window_value + dealer_threshold).min(0.0);
        let client_posting_requirement = (client_window_value - client_threshold).max(0.0);
        let independent_amount = self.counterparty_group.independent_amount();

        let unadjusted_requirement =
            dealer_posting_requirement + client_posting_requirement + independent_amount;

        let previous = self.previous_balance.unwrap_or(0.0);
        let posting_requirement = if (unadjusted_requirement - previous).abs()
            < collateral.minimum_transfer_amount()
        {
            previous
        } else {
            unadjusted_requirement
        };

        if !posting_requirement.is_finite() {
            return Err(HypothecationError::NonFinite {
                quantity: "collateral posting requirement",
                date,
            });
        }

        Ok(CollateralAmountEstimatorOutput {
            date,
            dealer_margin_date,
            client_margin_date,
            dealer_window_value,
            client_window_value,
            dealer_threshold,
            client_threshold,
            dealer_posting_requirement,
            client_posting_requirement,
            independent_amount,
            unadjusted_requirement,
            posting_requirement,
        })
    }

    /// Collateral balance on `date`.
    pub fn posting_requirement(&self, date: Date) -> Result<f64, HypothecationError> {
        Ok(self.output(date)?.posting_requirement)
    }
}
