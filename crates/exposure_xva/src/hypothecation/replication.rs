//! Exposure decomposition by replication scheme.
//!
//! Each scheme splits a position value `V` and collateral balance `X` into
//! collateralised, credit, debt and funding exposure according to how the
//! dealer replicates the position and its own default risk.
//!
//! | Scheme | Collateralised `C` | Credit | Debt | Funding |
//! |---|---|---|---|---|
//! | Albanese-Andersen | `V - X` | `C+` | `C-` | `V - C` |
//! | Burgard-Kjaer hedge error | `(V - X)(1 + e a)` | `C+` | close-out `C-` | `C` |
//! | Burgard-Kjaer semi-replication | `V - X` | `C+` | close-out `C-` | `C+ + R_B C-` |
//! | Burgard-Kjaer gold-plated | `0` (`X = V`) | `0` | `0` | `0` |
//! | Burgard-Kjaer one-way CSA | `V+` (`X = V-`) | `C` | `0` | `V` |
//! | Burgard-Kjaer set-off | `V - X` | `C+` | `C-` | `C+` |
//!
//! `a` is the dealer funding spread accrued over the market edge ending at
//! the vertex, `e` the hedge error coefficient and `R_B` the dealer recovery
//! at the edge finish. The uncollateralised exposure is always `V`.

use std::fmt;
use std::str::FromStr;

use exposure_core::types::Date;
use exposure_core::universe::MarketEdge;

use super::close_out::CloseOutScheme;
use super::error::HypothecationError;
use super::vertex::{CollateralGroupVertex, ExposureComponents};

/// Inputs to a single-vertex decomposition.
#[derive(Clone, Copy, Debug)]
pub struct ReplicationInput<'a> {
    /// Vertex date.
    pub date: Date,
    /// Position group value.
    pub value: f64,
    /// Cash flow realised over the period.
    pub realised_cash_flow: f64,
    /// Collateral balance from the estimator.
    pub collateral_balance: f64,
    /// Market edge ending at the vertex (degenerate at the epoch).
    pub edge: Option<&'a MarketEdge>,
}

/// Replication scheme, fixed for a simulation run.
///
/// ```
/// use exposure_xva::hypothecation::{CloseOutScheme, ReplicationScheme};
///
/// let scheme: ReplicationScheme = "burgard_kjaer_one_way_csa".parse().unwrap();
/// assert_eq!(
///     scheme,
///     ReplicationScheme::BurgardKjaerOneWayCsa { close_out: CloseOutScheme::Bilateral }
/// );
/// assert_eq!(ReplicationScheme::try_from(1u8).unwrap(), ReplicationScheme::AlbaneseAndersen);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ReplicationScheme {
    /// Albanese-Andersen metrics decomposition.
    #[default]
    AlbaneseAndersen,
    /// Burgard-Kjaer dual-bond replication with a hedge error.
    BurgardKjaerHedgeErrorDualBond {
        /// Hedge error coefficient.
        hedge_error: f64,
        /// Close-out convention.
        close_out: CloseOutScheme,
    },
    /// Burgard-Kjaer dual-bond semi-replication.
    BurgardKjaerSemiReplicationDualBond {
        /// Close-out convention.
        close_out: CloseOutScheme,
    },
    /// Burgard-Kjaer gold-plated two-way CSA.
    BurgardKjaerGoldPlatedTwoWayCsa {
        /// Close-out convention.
        close_out: CloseOutScheme,
    },
    /// Burgard-Kjaer one-way CSA (dealer posts, client does not).
    BurgardKjaerOneWayCsa {
        /// Close-out convention.
        close_out: CloseOutScheme,
    },
    /// Burgard-Kjaer set-off of the funding account against the CSA.
    BurgardKjaerSetOff,
}

impl ReplicationScheme {
    /// Canonical scheme names in code order.
    pub const NAMES: [&'static str; 6] = [
        "albanese_andersen",
        "burgard_kjaer_hedge_error_dual_bond",
        "burgard_kjaer_semi_replication_dual_bond",
        "burgard_kjaer_gold_plated_two_way_csa",
        "burgard_kjaer_one_way_csa",
        "burgard_kjaer_set_off",
    ];

    /// Hedge-error dual-bond scheme with a validated coefficient.
    pub fn hedge_error_dual_bond(
        hedge_error: f64,
        close_out: CloseOutScheme,
    ) -> Result<Self, HypothecationError> {
        if !hedge_error.is_finite() {
            return Err(HypothecationError::InvalidParameter(format!(
                "Hedge error must be finite, got {}",
                hedge_error
            )));
        }
        Ok(ReplicationScheme::BurgardKjaerHedgeErrorDualBond {
            hedge_error,
            close_out,
        })
    }

    /// Builds a scheme from its name and optional parameters.
    ///
    /// Parameters not used by the named scheme are ignored.
    pub fn from_parts(
        name: &str,
        hedge_error: f64,
        close_out: CloseOutScheme,
    ) -> Result<Self, HypothecationError> {
        Ok(match name.parse::<ReplicationScheme>()? {
            ReplicationScheme::BurgardKjaerHedgeErrorDualBond { .. } => {
                Self::hedge_error_dual_bond(hedge_error, close_out)?
            }
            scheme => scheme.with_close_out(close_out),
        })
    }

    /// Replaces the close-out convention of schemes that carry one.
    pub fn with_close_out(self, close_out: CloseOutScheme) -> Self {
        match self {
            ReplicationScheme::BurgardKjaerHedgeErrorDualBond { hedge_error, .. } => {
                ReplicationScheme::BurgardKjaerHedgeErrorDualBond {
                    hedge_error,
                    close_out,
                }
            }
            ReplicationScheme::BurgardKjaerSemiReplicationDualBond { .. } => {
                ReplicationScheme::BurgardKjaerSemiReplicationDualBond { close_out }
            }
            ReplicationScheme::BurgardKjaerGoldPlatedTwoWayCsa { .. } => {
                ReplicationScheme::BurgardKjaerGoldPlatedTwoWayCsa { close_out }
            }
            ReplicationScheme::BurgardKjaerOneWayCsa { .. } => {
                ReplicationScheme::BurgardKjaerOneWayCsa { close_out }
            }
            other => other,
        }
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        Self::NAMES[usize::from(self.code() - 1)]
    }

    /// Numeric code (1-6).
    pub fn code(&self) -> u8 {
        match self {
            ReplicationScheme::AlbaneseAndersen => 1,
            ReplicationScheme::BurgardKjaerHedgeErrorDualBond { .. } => 2,
            ReplicationScheme::BurgardKjaerSemiReplicationDualBond { .. } => 3,
            ReplicationScheme::BurgardKjaerGoldPlatedTwoWayCsa { .. } => 4,
            ReplicationScheme::BurgardKjaerOneWayCsa { .. } => 5,
            ReplicationScheme::BurgardKjaerSetOff => 6,
        }
    }

    /// Close-out convention, for schemes that carry one.
    pub fn close_out(&self) -> Option<CloseOutScheme> {
        match self {
            ReplicationScheme::BurgardKjaerHedgeErrorDualBond { close_out, .. }
            | ReplicationScheme::BurgardKjaerSemiReplicationDualBond { close_out }
            | ReplicationScheme::BurgardKjaerGoldPlatedTwoWayCsa { close_out }
            | ReplicationScheme::BurgardKjaerOneWayCsa { close_out } => Some(*close_out),
            ReplicationScheme::AlbaneseAndersen | ReplicationScheme::BurgardKjaerSetOff => None,
        }
    }

    /// Whether the scheme reads the market edge.
    #[inline]
    pub fn requires_edge(&self) -> bool {
        !matches!(self, ReplicationScheme::AlbaneseAndersen)
    }

    /// Whether the collateral balance is an input (rather than implied).
    #[inline]
    pub fn uses_collateral_balance(&self) -> bool {
        !matches!(
            self,
            ReplicationScheme::BurgardKjaerGoldPlatedTwoWayCsa { .. }
                | ReplicationScheme::BurgardKjaerOneWayCsa { .. }
        )
    }

    /// Decomposes exposure at one vertex.
    ///
    /// # Errors
    ///
    /// - `HypothecationError::MissingEdge` if the scheme needs an edge and none is given
    /// - `HypothecationError::NonFinite` on non-finite inputs or outputs
    pub fn vertex(
        &self,
        input: ReplicationInput<'_>,
    ) -> Result<CollateralGroupVertex, HypothecationError> {
        let ReplicationInput {
            date,
            value,
            realised_cash_flow,
            collateral_balance,
            edge,
        } = input;

        for (amount, quantity) in [
            (value, "position value"),
            (realised_cash_flow, "realised cash flow"),
            (collateral_balance, "collateral balance"),
        ] {
            if !amount.is_finite() {
                return Err(HypothecationError::NonFinite { quantity, date });
            }
        }

        let edge = match (edge, self.requires_edge()) {
            (None, true) => {
                return Err(HypothecationError::MissingEdge {
                    scheme: self.name(),
                    date,
                })
            }
            (edge, _) => edge,
        };

        let (balance, components) = match *self {
            ReplicationScheme::AlbaneseAndersen => {
                let c = value - collateral_balance;
                (
                    collateral_balance,
                    ExposureComponents {
                        collateralised: c,
                        uncollateralised: value,
                        credit: c.max(0.0),
                        debt: c.min(0.0),
                        funding: value - c,
                        hedge_error: 0.0,
                    },
                )
            }
            ReplicationScheme::BurgardKjaerHedgeErrorDualBond {
                hedge_error,
                close_out,
            } => {
                let accrual = edge.map_or(0.0, MarketEdge::funding_spread_accrual);
                let net = value - collateral_balance;
                let error = net * hedge_error * accrual;
                let c = net + error;
                (
                    collateral_balance,
                    ExposureComponents {
                        collateralised: c,
                        uncollateralised: value,
                        credit: c.max(0.0),
                        debt: close_out.debt_exposure(c.min(0.0)),
                        funding: c,
                        hedge_error: error,
                    },
                )
            }
            ReplicationScheme::BurgardKjaerSemiReplicationDualBond { close_out } => {
                let recovery = edge.map_or(0.0, MarketEdge::finish_dealer_recovery);
                let c = value - collateral_balance;
                (
                    collateral_balance,
                    ExposureComponents {
                        collateralised: c,
                        uncollateralised: value,
                        credit: c.max(0.0),
                        debt: close_out.debt_exposure(c.min(0.0)),
                        funding: c.max(0.0) + recovery * c.min(0.0),
                        hedge_error: 0.0,
                    },
                )
            }
            ReplicationScheme::BurgardKjaerGoldPlatedTwoWayCsa { .. } => (
                value,
                ExposureComponents {
                    uncollateralised: value,
                    ..Default::default()
                },
            ),
            ReplicationScheme::BurgardKjaerOneWayCsa { .. } => {
                let c = value.max(0.0);
                (
                    value.min(0.0),
                    ExposureComponents {
                        collateralised: c,
                        uncollateralised: value,
                        credit: c,
                        debt: 0.0,
                        funding: value,
                        hedge_error: 0.0,
                    },
                )
            }
            ReplicationScheme::BurgardKjaerSetOff => {
                let c = value - collateral_balance;
                (
                    collateral_balance,
                    ExposureComponents {
                        collateralised: c,
                        uncollateralised: value,
                        credit: c.max(0.0),
                        debt: c.min(0.0),
                        funding: c.max(0.0),
                        hedge_error: 0.0,
                    },
                )
            }
        };

        CollateralGroupVertex::new(date, value, realised_cash_flow, balance, components, *self)
    }
}

impl FromStr for ReplicationScheme {
    type Err = HypothecationError;

    /// Parses a scheme name with default parameters (zero hedge error,
    /// bilateral close-out).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        let close_out = CloseOutScheme::Bilateral;
        match key.as_str() {
            "albanese_andersen" => Ok(ReplicationScheme::AlbaneseAndersen),
            "burgard_kjaer_hedge_error_dual_bond" => {
                Ok(ReplicationScheme::BurgardKjaerHedgeErrorDualBond {
                    hedge_error: 0.0,
                    close_out,
                })
            }
            "burgard_kjaer_semi_replication_dual_bond" => {
                Ok(ReplicationScheme::BurgardKjaerSemiReplicationDualBond { close_out })
            }
            "burgard_kjaer_gold_plated_two_way_csa" => {
                Ok(ReplicationScheme::BurgardKjaerGoldPlatedTwoWayCsa { close_out })
            }
            "burgard_kjaer_one_way_csa" => Ok(ReplicationScheme::BurgardKjaerOneWayCsa { close_out }),
            "burgard_kjaer_set_off" => Ok(ReplicationScheme::BurgardKjaerSetOff),
            _ => Err(HypothecationError::UnknownScheme {
                kind: "replication",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<u8> for ReplicationScheme {
    type Error = HypothecationError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1..=6 => Self::NAMES[usize::from(code - 1)].parse(),
            _ => Err(HypothecationError::UnknownScheme {
                kind: "replication",
                value: code.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReplicationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
