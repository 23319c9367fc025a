//! Exposure Demo CLI
//!
//! Runs a sample two-group portfolio through the path simulator and
//! prints portfolio valuation adjustments with the exposure profile.
//!
//! ```text
//! exposure-demo --config exposure.toml --paths 5000 --seed 7 --json
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use exposure_xva::adjustment::AdjustmentSummary;
use exposure_xva::config::SimulationConfig;
use exposure_xva::dynamics::PathSimulator;

mod portfolio;

use portfolio::MarketSettings;

/// Collateralised exposure simulation demo
#[derive(Parser)]
#[command(name = "exposure-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (defaults are used when it is missing)
    #[arg(short, long, default_value = "exposure.toml")]
    config: PathBuf,

    /// Override the number of trajectories
    #[arg(short, long)]
    paths: Option<usize>,

    /// Override the draw seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("exposure_xva=info".parse()?)
                .add_directive("exposure_demo=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let content = std::fs::read_to_string(&cli.config).ok();
    let mut config = match &content {
        Some(text) => SimulationConfig::from_toml(text)
            .with_context(|| format!("reading {}", cli.config.display()))?,
        None => {
            info!(path = %cli.config.display(), "Config file not found, using defaults");
            SimulationConfig::default()
        }
    }
    .with_env_override();
    if let Some(paths) = cli.paths {
        config.path_count = paths;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config.validate().context("invalid simulation configuration")?;

    let market = match &content {
        Some(text) => MarketSettings::from_toml(text)?,
        None => MarketSettings::default(),
    };

    let simulator = PathSimulator::new(
        config.path_count,
        Arc::new(market.generator()?),
        config.scheme()?,
        portfolio::shared_container()?,
    )?
    .with_parallel_config(config.parallel_config());

    let initial = portfolio::initial_vertex()?;
    let aggregator = simulator
        .simulate(&initial, &config.draw_generator(1))
        .context("simulation failed")?;
    let summary = aggregator.summary(config.pfe_confidence);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &AdjustmentSummary) {
    println!("Paths: {}", summary.path_count);
    println!();
    println!("{:<8}{:>14}", "Metric", "Mean");
    for (name, value) in [
        ("CVA", summary.cva),
        ("DVA", summary.dva),
        ("FCA", summary.fca),
        ("FBA", summary.fba),
        ("FVA", summary.fva),
        ("ColVA", summary.colva),
        ("Total", summary.total),
    ] {
        println!("{:<8}{:>14.6}", name, value);
    }

    println!();
    for group in &summary.credit_debt_groups {
        println!("{:<10} CVA {:>12.6}  DVA {:>12.6}", group.id, group.cva, group.dva);
    }
    for group in &summary.funding_groups {
        println!(
            "{:<10} FCA {:>12.6}  FBA {:>12.6}  ColVA {:>12.6}",
            group.id, group.fca, group.fba, group.colva
        );
    }

    println!();
    println!(
        "{:<12}{:>12}{:>12}{:>12}",
        "Date",
        "EE",
        "ENE",
        format!("PFE{:.0}", summary.pfe_confidence * 100.0)
    );
    for (i, date) in summary.dates.iter().enumerate() {
        println!(
            "{:<12}{:>12.4}{:>12.4}{:>12.4}",
            date.to_string(),
            summary.expected_exposure[i],
            summary.expected_negative_exposure[i],
            summary.potential_future_exposure[i]
        );
    }
    println!();
    println!("EPE: {:.4}", summary.expected_positive_exposure);
}
