//! Statutory contribution limits for tax-free savings accounts
//!
//! Rules are checked in order and the first failure wins:
//! 1. The lump sum alone may not exceed the annual cap
//! 2. Lump sum plus every monthly contribution over the horizon may not
//!    exceed the lifetime cap
//! 3. Lump sum plus the first twelve monthly contributions may not exceed
//!    the annual cap at any month
//!
//! Only the first year is simulated for rule 3. Later years are not
//! re-checked against the annual cap.

use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Annual contribution cap in rand
pub const DEFAULT_ANNUAL_CAP: f64 = 33_000.0;

/// Lifetime contribution cap in rand
pub const DEFAULT_LIFETIME_CAP: f64 = 500_000.0;

const MONTHS_PER_YEAR: u32 = 12;

/// Why a scenario breaks the contribution rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ineligibility {
    /// Lump sum on its own is above the annual cap
    AnnualCapExceeded,
    /// Total contributions over the horizon are above the lifetime cap
    LifetimeCapExceeded,
    /// Running total in the first year goes above the annual cap
    FirstYearCapExceeded,
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Ineligibility::AnnualCapExceeded => "lump sum exceeds annual cap",
            Ineligibility::LifetimeCapExceeded => "total contributions exceed lifetime cap",
            Ineligibility::FirstYearCapExceeded => "first-year contributions exceed annual cap",
        };
        f.write_str(reason)
    }
}

/// Contribution caps applied to every scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributionLimits {
    pub annual_cap: f64,
    pub lifetime_cap: f64,
}

impl Default for ContributionLimits {
    fn default() -> Self {
        Self {
            annual_cap: DEFAULT_ANNUAL_CAP,
            lifetime_cap: DEFAULT_LIFETIME_CAP,
        }
    }
}

impl ContributionLimits {
    /// Check a scenario against the rules, returning the first rule it breaks
    pub fn check(&self, scenario: &Scenario) -> Result<(), Ineligibility> {
        let lump_sum = scenario.lump_sum();
        let monthly = scenario.monthly_contribution();
        let periods = scenario.time_horizon() as f64 * MONTHS_PER_YEAR as f64;

        if lump_sum > self.annual_cap {
            return Err(Ineligibility::AnnualCapExceeded);
        }

        if lump_sum + periods * monthly > self.lifetime_cap {
            return Err(Ineligibility::LifetimeCapExceeded);
        }

        let mut total = lump_sum;
        for _ in 0..MONTHS_PER_YEAR {
            total += monthly;
            if total > self.annual_cap {
                return Err(Ineligibility::FirstYearCapExceeded);
            }
        }

        Ok(())
    }

    /// True when the scenario passes every rule
    pub fn is_valid(&self, scenario: &Scenario) -> bool {
        self.check(scenario).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(years: u32, lump_sum: f64, monthly: f64) -> Scenario {
        Scenario::new(years, 0.0993, lump_sum, monthly).unwrap()
    }

    #[test]
    fn test_lump_sum_over_annual_cap_always_invalid() {
        let limits = ContributionLimits::default();
        for years in [1, 10, 50] {
            for monthly in [0.0, 100.0, 2500.0] {
                let s = scenario(years, 34_000.0, monthly);
                assert_eq!(limits.check(&s), Err(Ineligibility::AnnualCapExceeded));
                assert!(!limits.is_valid(&s));
            }
        }
    }

    #[test]
    fn test_lump_sum_at_annual_cap_with_no_contributions() {
        let limits = ContributionLimits::default();
        assert!(limits.is_valid(&scenario(1, 33_000.0, 0.0)));
    }

    #[test]
    fn test_twelve_months_under_cap() {
        let limits = ContributionLimits::default();
        // 12 * 2500 = 30000
        assert!(limits.is_valid(&scenario(1, 0.0, 2500.0)));
    }

    #[test]
    fn test_first_year_boundary() {
        let limits = ContributionLimits::default();
        // 12 * 2750 = 33000 exactly, not above the cap
        assert!(limits.is_valid(&scenario(1, 0.0, 2750.0)));
        // 12 * 2751 = 33012
        assert_eq!(
            limits.check(&scenario(1, 0.0, 2751.0)),
            Err(Ineligibility::FirstYearCapExceeded)
        );
    }

    #[test]
    fn test_lump_sum_counts_towards_first_year() {
        let limits = ContributionLimits::default();
        // 30000 + 3 * 1000 = 33000, 4th month tips over
        assert_eq!(
            limits.check(&scenario(1, 30_000.0, 1000.0)),
            Err(Ineligibility::FirstYearCapExceeded)
        );
        assert!(limits.is_valid(&scenario(1, 30_000.0, 250.0)));
    }

    #[test]
    fn test_lifetime_cap() {
        let limits = ContributionLimits::default();
        // 50 * 12 * 1000 = 600000
        assert_eq!(
            limits.check(&scenario(50, 0.0, 1000.0)),
            Err(Ineligibility::LifetimeCapExceeded)
        );
        // 41 * 12 * 1000 = 492000, plus 8000 lands exactly on the cap
        assert!(limits.is_valid(&scenario(41, 8_000.0, 1000.0)));
        assert!(!limits.is_valid(&scenario(41, 8_001.0, 1000.0)));
    }

    #[test]
    fn test_lifetime_rule_checked_before_first_year() {
        let limits = ContributionLimits::default();
        // Breaks both the lifetime and first-year rules
        assert_eq!(
            limits.check(&scenario(50, 0.0, 2751.0)),
            Err(Ineligibility::LifetimeCapExceeded)
        );
    }

    #[test]
    fn test_custom_limits() {
        let limits = ContributionLimits {
            annual_cap: 36_000.0,
            lifetime_cap: 500_000.0,
        };
        assert!(limits.is_valid(&scenario(1, 0.0, 3000.0)));
        assert!(!ContributionLimits::default().is_valid(&scenario(1, 0.0, 3000.0)));
    }

    #[test]
    fn test_longest_horizon_hits_lifetime_cap() {
        let limits = ContributionLimits::default();
        let s = scenario(crate::scenario::MAX_TIME_HORIZON, 0.0, 1.0);
        assert_eq!(limits.check(&s), Err(Ineligibility::LifetimeCapExceeded));
    }
}
