//! Explorer configuration
//!
//! Every field has a built-in default, so a run with no configuration file
//! reproduces the standard grid. A JSON file may override any subset:
//!
//! ```json
//! { "limits": { "annual_cap": 36000 }, "grid": { "time_horizons": [5, 10, 20] } }
//! ```

use crate::error::Result;
use crate::export::DEFAULT_OUTPUT_PATH;
use crate::fv::round_currency;
use crate::limits::ContributionLimits;
use crate::scenario::{GridConfig, Scenario};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The single plan reported on stdout before the grid is built
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlineScenario {
    pub time_horizon: u32,
    pub annual_return_rate: f64,
    pub lump_sum: f64,
    pub monthly_contribution: f64,
}

impl Default for HeadlineScenario {
    fn default() -> Self {
        Self {
            time_horizon: 26,
            annual_return_rate: 0.0993,
            lump_sum: 2000.0,
            monthly_contribution: 200.0,
        }
    }
}

impl HeadlineScenario {
    pub fn scenario(&self) -> Result<Scenario> {
        Scenario::new(
            self.time_horizon,
            self.annual_return_rate,
            self.lump_sum,
            self.monthly_contribution,
        )
    }

    /// Projected value of this plan at each of `rates`, rounded to cents
    pub fn rate_sweep(&self, rates: &[f64]) -> Result<Vec<f64>> {
        rates
            .iter()
            .map(|&rate| {
                let scenario = Scenario::new(
                    self.time_horizon,
                    rate,
                    self.lump_sum,
                    self.monthly_contribution,
                )?;
                Ok(round_currency(scenario.projected_value()))
            })
            .collect()
    }
}

/// Top-level configuration for one explorer run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub headline: HeadlineScenario,
    pub grid: GridConfig,
    pub limits: ContributionLimits,
    pub output_path: PathBuf,
    /// Append a projected value column to the export
    pub include_projection: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            headline: HeadlineScenario::default(),
            grid: GridConfig::default(),
            limits: ContributionLimits::default(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            include_projection: false,
        }
    }
}

impl ExplorerConfig {
    /// Parse a JSON document, filling missing fields from the defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExplorerError;

    #[test]
    fn test_defaults() {
        let config = ExplorerConfig::default();
        assert_eq!(config.output_path, PathBuf::from("taxfree_investment_options.csv"));
        assert_eq!(config.grid.len(), 37_500);
        assert_eq!(config.limits.annual_cap, 33_000.0);
        assert_eq!(config.limits.lifetime_cap, 500_000.0);
        assert!(!config.include_projection);
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = ExplorerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ExplorerConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = ExplorerConfig::from_json_str(
            r#"{
                "limits": { "annual_cap": 36000 },
                "grid": { "time_horizons": [5, 10] },
                "output_path": "out.csv"
            }"#,
        )
        .unwrap();

        assert_eq!(config.limits.annual_cap, 36_000.0);
        assert_eq!(config.limits.lifetime_cap, 500_000.0);
        assert_eq!(config.grid.time_horizons, vec![5, 10]);
        assert_eq!(config.grid.return_rates.len(), 5);
        assert_eq!(config.grid.len(), 2 * 5 * 15 * 10);
        assert_eq!(config.output_path, PathBuf::from("out.csv"));
        assert_eq!(config.headline, HeadlineScenario::default());
    }

    #[test]
    fn test_malformed_json() {
        let err = ExplorerConfig::from_json_str("{ \"grid\": 3 }").unwrap_err();
        assert!(matches!(err, ExplorerError::Config(_)));
    }

    #[test]
    fn test_headline_rate_sweep() {
        let headline = HeadlineScenario::default();
        let sweep = headline
            .rate_sweep(&GridConfig::default().return_rates)
            .unwrap();

        assert_eq!(
            sweep,
            vec![195_435.14, 318_155.25, 487_215.45, 1_179_679.29, 1_582_699.27]
        );
    }

    #[test]
    fn test_headline_scenario_is_eligible() {
        let scenario = HeadlineScenario::default().scenario().unwrap();
        assert!(ContributionLimits::default().is_valid(&scenario));
    }
}
