//! Sample portfolio and market for the demonstration run.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;

use exposure_core::types::Date;
use exposure_core::universe::{BrownianVertexGenerator, MarketVertex, MarketVertexEntity};
use exposure_xva::holdings::{PositionGroup, PositionGroupContainer};
use exposure_xva::specification::{
    CollateralGroupSpecification, CounterpartyGroupSpecification, CreditRating,
    PositionGroupSpecification,
};

/// Market generator settings, the `[market]` table of the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketSettings {
    /// Calendar days between vertices
    #[serde(default = "default_step_days")]
    pub step_days: i64,
    /// Manifest value drift per year
    #[serde(default)]
    pub drift: f64,
    /// Manifest value volatility per square-root year
    #[serde(default = "default_volatility")]
    pub volatility: f64,
    /// Overnight rate accrued by the replicator
    #[serde(default = "default_rate")]
    pub rate: f64,
}

fn default_step_days() -> i64 {
    30
}

fn default_volatility() -> f64 {
    25.0
}

fn default_rate() -> f64 {
    0.03
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            step_days: default_step_days(),
            drift: 0.0,
            volatility: default_volatility(),
            rate: default_rate(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct MarketTable {
    #[serde(default)]
    market: MarketSettings,
}

impl MarketSettings {
    /// Reads the `[market]` table from TOML text, defaults when absent.
    pub fn from_toml(content: &str) -> Result<Self> {
        let table: MarketTable = toml::from_str(content).context("parsing [market] table")?;
        Ok(table.market)
    }

    /// Brownian manifest-value generator.
    pub fn generator(&self) -> Result<BrownianVertexGenerator> {
        Ok(
            BrownianVertexGenerator::new(self.step_days, self.drift, self.volatility)
                .context("building market generator")?
                .with_rate(self.rate),
        )
    }
}

/// Epochal market state: dealer rated A, client rated BBB.
pub fn initial_vertex() -> Result<MarketVertex> {
    let dealer = MarketVertexEntity::new(CreditRating::A.indicative_hazard_rate(), 1.0, 0.4, 0.006);
    let client = MarketVertexEntity::new(CreditRating::BBB.indicative_hazard_rate(), 1.0, 0.4, 0.0);
    let anchor = Date::from_ymd(2025, 1, 2).context("epoch date")?;
    MarketVertex::new(anchor, 0.0, 1.0, 0.002, dealer, client).context("epochal vertex")
}

/// Two position groups sharing one funding account, netted separately.
///
/// The swap book is fully collateralised with a ten-day margin period of
/// risk; the FX book has thresholds, a minimum transfer amount and an
/// independent amount.
pub fn sample_container() -> Result<PositionGroupContainer> {
    let client = CounterpartyGroupSpecification::from_rating("CP-001", "Client", CreditRating::BBB, 0.4)?;

    let swaps = PositionGroupSpecification::new(
        CollateralGroupSpecification::zero_threshold("CSA-SWAP").with_margin_period_of_risk(10, 10)?,
        client.clone(),
    );
    let fx = PositionGroupSpecification::new(
        CollateralGroupSpecification::new("CSA-FX", "FX CSA", 10.0, 5.0, 1.0)?
            .with_margin_period_of_risk(10, 20)?,
        client.with_independent_amount(2.0)?,
    );

    let container = PositionGroupContainer::new(vec![
        PositionGroup::new("PG-SWAP", "Interest rate swaps", swaps, "FUND-1", "NET-SWAP"),
        PositionGroup::new("PG-FX", "FX forwards", fx, "FUND-1", "NET-FX")
            .with_valuation(|_: &MarketVertex| -0.6),
    ])?;
    Ok(container)
}

/// Shared handle on the sample container.
pub fn shared_container() -> Result<Arc<PositionGroupContainer>> {
    Ok(Arc::new(sample_container()?))
}
