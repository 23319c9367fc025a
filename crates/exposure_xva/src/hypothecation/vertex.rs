//! Per-date exposure decomposition of one collateral group.

use exposure_core::types::Date;

use super::error::HypothecationError;
use super::replication::ReplicationScheme;

/// Exposure components produced by a replication scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExposureComponents {
    /// Exposure net of collateral.
    pub collateralised: f64,
    /// Exposure gross of collateral.
    pub uncollateralised: f64,
    /// Positive part of the exposure lost on client default.
    pub credit: f64,
    /// Negative part of the exposure gained on dealer default.
    pub debt: f64,
    /// Amount the dealer must fund unsecured.
    pub funding: f64,
    /// Residual from imperfect hedging.
    pub hedge_error: f64,
}

/// Immutable exposure decomposition of a collateral group on one vertex.
///
/// # Examples
///
/// ```
/// use exposure_core::types::Date;
/// use exposure_xva::hypothecation::{CollateralGroupVertex, ExposureComponents, ReplicationScheme};
///
/// let date = Date::from_ymd(2024, 1, 1).unwrap();
/// let components = ExposureComponents { collateralised: 5.0, uncollateralised: 5.0, credit: 5.0, ..Default::default() };
/// let vertex = CollateralGroupVertex::new(date, 5.0, 0.0, 0.0, components, ReplicationScheme::AlbaneseAndersen).unwrap();
/// assert_eq!(vertex.credit_exposure(), 5.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollateralGroupVertex {
    anchor_date: Date,
    value: f64,
    realised_cash_flow: f64,
    collateral_balance: f64,
    components: ExposureComponents,
    scheme: ReplicationScheme,
}

impl CollateralGroupVertex {
    /// Creates a vertex, rejecting non-finite amounts.
    pub fn new(
        anchor_date: Date,
        value: f64,
        realised_cash_flow: f64,
        collateral_balance: f64,
        components: ExposureComponents,
        scheme: ReplicationScheme,
    ) -> Result<Self, HypothecationError> {
        let checks = [
            (value, "position value"),
            (realised_cash_flow, "realised cash flow"),
            (collateral_balance, "collateral balance"),
            (components.collateralised, "collateralised exposure"),
            (components.uncollateralised, "uncollateralised exposure"),
            (components.credit, "credit exposure"),
            (components.debt, "debt exposure"),
            (components.funding, "funding exposure"),
            (components.hedge_error, "hedge error"),
        ];
        if let Some((_, quantity)) = checks.into_iter().find(|(v, _)| !v.is_finite()) {
            return Err(HypothecationError::NonFinite {
                quantity,
                date: anchor_date,
            });
        }
        Ok(Self {
            anchor_date,
            value,
            realised_cash_flow,
            collateral_balance,
            components,
            scheme,
        })
    }

    /// Vertex date.
    #[inline]
    pub fn anchor_date(&self) -> Date {
        self.anchor_date
    }

    /// Position group value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Cash flow realised over the period ending at this vertex.
    #[inline]
    pub fn realised_cash_flow(&self) -> f64 {
        self.realised_cash_flow
    }

    /// Collateral balance held (positive) or posted (negative).
    #[inline]
    pub fn collateral_balance(&self) -> f64 {
        self.collateral_balance
    }

    /// Exposure net of collateral.
    #[inline]
    pub fn collateralised_exposure(&self) -> f64 {
        self.components.collateralised
    }

    /// Exposure gross of collateral.
    #[inline]
    pub fn uncollateralised_exposure(&self) -> f64 {
        self.components.uncollateralised
    }

    /// Credit exposure.
    #[inline]
    pub fn credit_exposure(&self) -> f64 {
        self.components.credit
    }

    /// Debt exposure.
    #[inline]
    pub fn debt_exposure(&self) -> f64 {
        self.components.debt
    }

    /// Funding exposure.
    #[inline]
    pub fn funding_exposure(&self) -> f64 {
        self.components.funding
    }

    /// Hedge error.
    #[inline]
    pub fn hedge_error(&self) -> f64 {
        self.components.hedge_error
    }

    /// All exposure components.
    #[inline]
    pub fn components(&self) -> &ExposureComponents {
        &self.components
    }

    /// Scheme that produced the decomposition.
    #[inline]
    pub fn scheme(&self) -> ReplicationScheme {
        self.scheme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_finite_component() {
        let date = Date::from_ymd(2024, 1, 1).unwrap();
        let components = ExposureComponents {
            funding: f64::NAN,
            ..Default::default()
        };
        let err = CollateralGroupVertex::new(
            date,
            0.0,
            0.0,
            0.0,
            components,
            ReplicationScheme::AlbaneseAndersen,
        )
        .unwrap_err();
        assert_eq!(
            err,
            HypothecationError::NonFinite {
                quantity: "funding exposure",
                date
            }
        );
    }
}
