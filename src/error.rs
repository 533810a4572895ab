//! Error type shared by the explorer library

use thiserror::Error;

/// Errors raised while building, validating or exporting a scenario grid
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A scenario field outside its allowed range (negative amount, zero horizon, NaN)
    #[error("invalid scenario: {field} = {value}")]
    InvalidScenario { field: &'static str, value: f64 },

    /// A grid dimension with no candidate values
    #[error("grid dimension '{0}' has no candidate values")]
    EmptyDimension(&'static str),
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
