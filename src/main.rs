//! Tax-free savings explorer CLI
//!
//! Projects the headline savings plan, then writes every grid combination
//! with its eligibility flag to CSV.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use taxfree_explorer::export::{format_float, format_float_array, write_grid_to_path};
use taxfree_explorer::fv::round_currency;
use taxfree_explorer::{ExplorerConfig, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(version, about = "Explore tax-free savings scenarios against contribution limits")]
struct Args {
    /// Output CSV path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration overriding the built-in grid, limits and headline plan
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Append each scenario's projected value as a Future_Value column
    #[arg(long)]
    with_projection: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ExplorerConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ExplorerConfig::default(),
    };
    if let Some(output) = args.output {
        config.output_path = output;
    }
    if args.with_projection {
        config.include_projection = true;
    }

    // Headline plan
    let headline = config.headline.scenario().context("Invalid headline scenario")?;
    println!(
        "Investment will yield a total of R{} in {} years",
        format_float(round_currency(headline.projected_value())),
        headline.time_horizon()
    );

    let sweep = config.headline.rate_sweep(&config.grid.return_rates)?;
    println!("{}", format_float_array(&sweep));

    // Scenario grid
    let runner = ScenarioRunner::new(config.limits).with_projection(config.include_projection);
    let grid = runner.run_grid(&config.grid).context("Failed to build scenario grid")?;

    let summary = grid.summary();
    log::info!(
        "{} of {} scenarios valid, {} rejected (lump sum over cap: {}, lifetime cap: {}, first-year cap: {})",
        summary.valid,
        summary.total,
        summary.invalid(),
        summary.annual_cap_exceeded,
        summary.lifetime_cap_exceeded,
        summary.first_year_cap_exceeded,
    );
    log::debug!("Summary: {}", serde_json::to_string(&summary)?);

    write_grid_to_path(&grid, &config.output_path)
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;
    log::info!("Grid written to {}", config.output_path.display());

    Ok(())
}
