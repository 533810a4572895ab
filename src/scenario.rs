//! Scenario grid generation and evaluation
//!
//! A grid is the cross product of candidate horizons, return rates, lump
//! sums and monthly contributions. Every combination is checked against the
//! contribution limits and, optionally, projected forward.

use crate::error::{ExplorerError, Result};
use crate::fv::{monthly_future_value, round_currency};
use crate::limits::{ContributionLimits, Ineligibility};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest horizon whose month count still fits in a `u32`
pub const MAX_TIME_HORIZON: u32 = u32::MAX / 12;

/// One investment plan: horizon, return and contribution pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    time_horizon: u32,
    annual_return_rate: f64,
    lump_sum: f64,
    monthly_contribution: f64,
}

impl Scenario {
    /// Create a scenario, rejecting zero or oversized horizons, negative amounts
    /// and non-finite values
    pub fn new(
        time_horizon: u32,
        annual_return_rate: f64,
        lump_sum: f64,
        monthly_contribution: f64,
    ) -> Result<Self> {
        if time_horizon == 0 || time_horizon > MAX_TIME_HORIZON {
            return Err(ExplorerError::InvalidScenario {
                field: "time_horizon",
                value: time_horizon as f64,
            });
        }
        if !annual_return_rate.is_finite() {
            return Err(ExplorerError::InvalidScenario {
                field: "annual_return_rate",
                value: annual_return_rate,
            });
        }
        for (field, value) in [
            ("lump_sum", lump_sum),
            ("monthly_contribution", monthly_contribution),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ExplorerError::InvalidScenario { field, value });
            }
        }

        Ok(Self {
            time_horizon,
            annual_return_rate,
            lump_sum,
            monthly_contribution,
        })
    }

    /// Horizon in whole years
    pub fn time_horizon(&self) -> u32 {
        self.time_horizon
    }

    pub fn annual_return_rate(&self) -> f64 {
        self.annual_return_rate
    }

    pub fn lump_sum(&self) -> f64 {
        self.lump_sum
    }

    pub fn monthly_contribution(&self) -> f64 {
        self.monthly_contribution
    }

    /// Projected account value at the end of the horizon, as a positive amount
    pub fn projected_value(&self) -> f64 {
        -monthly_future_value(
            self.annual_return_rate,
            self.time_horizon,
            self.monthly_contribution,
            self.lump_sum,
        )
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}y @ {:.2}% (lump R{:.0}, R{:.0}/month)",
            self.time_horizon,
            self.annual_return_rate * 100.0,
            self.lump_sum,
            self.monthly_contribution
        )
    }
}

/// Candidate values for each grid dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub time_horizons: Vec<u32>,
    pub return_rates: Vec<f64>,
    pub lump_sums: Vec<f64>,
    pub monthly_contributions: Vec<f64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            time_horizons: (1..=50).collect(),
            return_rates: vec![0.0721, 0.0993, 0.1218, 0.1659, 0.18],
            lump_sums: vec![
                0.0, 350.0, 500.0, 1000.0, 2000.0, 3000.0, 4000.0, 5000.0, 6000.0, 7000.0,
                10000.0, 15000.0, 20000.0, 25000.0, 30000.0,
            ],
            monthly_contributions: vec![
                0.0, 100.0, 200.0, 300.0, 500.0, 700.0, 1000.0, 1500.0, 2000.0, 2500.0,
            ],
        }
    }
}

impl GridConfig {
    /// Number of combinations in the cross product
    pub fn len(&self) -> usize {
        self.time_horizons.len()
            * self.return_rates.len()
            * self.lump_sums.len()
            * self.monthly_contributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build every scenario in the grid.
    ///
    /// Order: return rate outermost, then horizon, then lump sum, with the
    /// monthly contribution varying fastest.
    pub fn scenarios(&self) -> Result<Vec<Scenario>> {
        let dimensions = [
            ("time_horizons", self.time_horizons.is_empty()),
            ("return_rates", self.return_rates.is_empty()),
            ("lump_sums", self.lump_sums.is_empty()),
            ("monthly_contributions", self.monthly_contributions.is_empty()),
        ];
        if let Some((name, _)) = dimensions.iter().find(|(_, empty)| *empty) {
            return Err(ExplorerError::EmptyDimension(*name));
        }

        let mut scenarios = Vec::with_capacity(self.len());
        for &rate in &self.return_rates {
            for &years in &self.time_horizons {
                for &lump_sum in &self.lump_sums {
                    for &monthly in &self.monthly_contributions {
                        scenarios.push(Scenario::new(years, rate, lump_sum, monthly)?);
                    }
                }
            }
        }

        Ok(scenarios)
    }
}

/// One evaluated grid combination
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub scenario: Scenario,
    pub rejection: Option<Ineligibility>,
    /// Rounded projected value, present when projection is enabled
    pub projected_value: Option<f64>,
}

impl GridRow {
    pub fn is_valid(&self) -> bool {
        self.rejection.is_none()
    }
}

/// Counts of valid and rejected scenarios by rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GridSummary {
    pub total: usize,
    pub valid: usize,
    pub annual_cap_exceeded: usize,
    pub lifetime_cap_exceeded: usize,
    pub first_year_cap_exceeded: usize,
}

impl GridSummary {
    fn from_rows(rows: &[GridRow]) -> Self {
        let mut summary = Self {
            total: rows.len(),
            ..Default::default()
        };
        for row in rows {
            match row.rejection {
                None => summary.valid += 1,
                Some(Ineligibility::AnnualCapExceeded) => summary.annual_cap_exceeded += 1,
                Some(Ineligibility::LifetimeCapExceeded) => summary.lifetime_cap_exceeded += 1,
                Some(Ineligibility::FirstYearCapExceeded) => summary.first_year_cap_exceeded += 1,
            }
        }
        summary
    }

    pub fn invalid(&self) -> usize {
        self.total - self.valid
    }
}

/// Evaluated grid in generation order
#[derive(Debug, Clone)]
pub struct ScenarioGrid {
    pub rows: Vec<GridRow>,
    pub includes_projection: bool,
}

impl ScenarioGrid {
    pub fn summary(&self) -> GridSummary {
        GridSummary::from_rows(&self.rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Evaluates scenarios against a fixed set of contribution limits
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(ContributionLimits::default());
/// let grid = runner.run_grid(&GridConfig::default())?;
/// println!("{} valid", grid.summary().valid);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    limits: ContributionLimits,
    with_projection: bool,
}

impl ScenarioRunner {
    pub fn new(limits: ContributionLimits) -> Self {
        Self {
            limits,
            with_projection: false,
        }
    }

    /// Also compute each scenario's projected value
    pub fn with_projection(mut self, enabled: bool) -> Self {
        self.with_projection = enabled;
        self
    }


    /// Evaluate a single scenario
    pub fn run(&self, scenario: Scenario) -> GridRow {
        let rejection = self.limits.check(&scenario).err();
        if let Some(reason) = rejection {
            log::debug!("rejected {}: {}", scenario, reason);
        }

        GridRow {
            scenario,
            rejection,
            projected_value: self
                .with_projection
                .then(|| round_currency(scenario.projected_value())),
        }
    }

    /// Evaluate a batch of scenarios in parallel, keeping input order
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<GridRow> {
        scenarios.par_iter().map(|&s| self.run(s)).collect()
    }

    /// Generate and evaluate the full grid
    pub fn run_grid(&self, config: &GridConfig) -> Result<ScenarioGrid> {
        let scenarios = config.scenarios()?;
        log::info!(
            "Evaluating {} scenarios ({} horizons x {} rates x {} lump sums x {} contributions)",
            scenarios.len(),
            config.time_horizons.len(),
            config.return_rates.len(),
            config.lump_sums.len(),
            config.monthly_contributions.len(),
        );

        Ok(ScenarioGrid {
            rows: self.run_batch(&scenarios),
            includes_projection: self.with_projection,
        })
    }
}
