//! Tax-free savings explorer - scenario grid for South African TFSA contribution rules
//!
//! This library provides:
//! - Future value of a lump sum plus monthly contributions
//! - Annual and lifetime contribution limit checks
//! - Cross-product scenario grid generation and evaluation
//! - CSV export of the evaluated grid

pub mod config;
pub mod error;
pub mod export;
pub mod fv;
pub mod limits;
pub mod scenario;

// Re-export commonly used types
pub use config::{ExplorerConfig, HeadlineScenario};
pub use error::{ExplorerError, Result};
pub use fv::{future_value, PaymentTiming};
pub use limits::{ContributionLimits, Ineligibility};
pub use scenario::{GridConfig, GridRow, GridSummary, Scenario, ScenarioGrid, ScenarioRunner};
