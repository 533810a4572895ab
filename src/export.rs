//! CSV export of an evaluated scenario grid

use crate::error::Result;
use crate::scenario::{GridRow, ScenarioGrid};
use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Default output file name
pub const DEFAULT_OUTPUT_PATH: &str = "taxfree_investment_options.csv";

/// Columns written for every grid
pub const BASE_COLUMNS: [&str; 5] = [
    "Time_Horizon",
    "Return_Rate",
    "Lump_Sum",
    "Monthly_Contrib",
    "Valid_Investment",
];

/// Extra column written when the grid carries projected values
pub const PROJECTION_COLUMN: &str = "Future_Value";

/// Shortest round-trip decimal, always with a fractional part ("1.0", "0.0721")
///
/// Exponent forms differ from pandas output: very small or large values render
/// as `1e-5`/`1e16` here rather than `1e-05`/`1e+16`. The default grid never
/// reaches them.
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

/// Bracketed list aligned on the decimal point, as numpy prints a float array
///
/// `[195435.14, 1179679.29]` renders as `[ 195435.14 1179679.29]`. Integral
/// values drop the trailing zero (`1.`). Exponent forms are not aligned.
pub fn format_float_array(values: &[f64]) -> String {
    let parts: Vec<(String, String)> = values
        .iter()
        .map(|&v| {
            let text = format_float(v);
            match text.split_once('.') {
                Some((int, "0")) => (int.to_string(), String::new()),
                Some((int, frac)) => (int.to_string(), frac.to_string()),
                None => (text.clone(), String::new()),
            }
        })
        .collect();

    let int_width = parts.iter().map(|(i, _)| i.len()).max().unwrap_or(0);
    let frac_width = parts.iter().map(|(_, f)| f.len()).max().unwrap_or(0);

    let cells: Vec<String> = parts
        .iter()
        .map(|(int, frac)| format!("{:>iw$}.{:<fw$}", int, frac, iw = int_width, fw = frac_width))
        .collect();
    format!("[{}]", cells.join(" "))
}

pub fn format_flag(valid: bool) -> &'static str {
    if valid {
        "True"
    } else {
        "False"
    }
}

fn record(row: &GridRow, include_projection: bool) -> Vec<String> {
    let s = &row.scenario;
    let mut fields = vec![
        format_float(s.time_horizon() as f64),
        format_float(s.annual_return_rate()),
        format_float(s.lump_sum()),
        format_float(s.monthly_contribution()),
        format_flag(row.is_valid()).to_string(),
    ];
    if include_projection {
        fields.push(row.projected_value.map(format_float).unwrap_or_default());
    }
    fields
}

/// Write the grid with a header row and no index column
pub fn write_grid<W: Write>(grid: &ScenarioGrid, writer: W) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);

    let mut header: Vec<&str> = BASE_COLUMNS.to_vec();
    if grid.includes_projection {
        header.push(PROJECTION_COLUMN);
    }
    csv_writer.write_record(&header)?;

    for row in &grid.rows {
        csv_writer.write_record(record(row, grid.includes_projection))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the grid to a file, replacing any existing file
pub fn write_grid_to_path<P: AsRef<Path>>(grid: &ScenarioGrid, path: P) -> Result<()> {
    let path = path.as_ref();
    log::debug!("Writing {} rows to {}", grid.len(), path.display());
    write_grid(grid, File::create(path)?)
}
