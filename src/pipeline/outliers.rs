//! Progressive outlier filtering across numeric columns
//!
//! Columns are visited in table order and each filter runs on the table already
//! narrowed by the previous columns. Rows removed for one column are never seen
//! by the next column's bounds, so filtering correlated columns compounds.

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::numeric::{
    column_values, mean, numeric_column_names, population_std_dev, present_values, quantile,
};

/// Multiplier applied to the interquartile range to build the fences
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Rows with an absolute z-score at or above this value are removed
pub const Z_SCORE_LIMIT: f64 = 3.0;

/// Outlier detection method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum OutlierMethod {
    /// Keep all rows (default)
    #[default]
    None,
    /// Tukey fences at 1.5 x IQR around the quartiles
    Iqr,
    /// Population z-score with a cutoff of 3
    ZScore,
}

impl std::fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutlierMethod::None => write!(f, "None"),
            OutlierMethod::Iqr => write!(f, "IQR"),
            OutlierMethod::ZScore => write!(f, "Z-score"),
        }
    }
}

impl std::str::FromStr for OutlierMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(OutlierMethod::None),
            "iqr" => Ok(OutlierMethod::Iqr),
            "zscore" | "z-score" => Ok(OutlierMethod::ZScore),
            _ => Err(format!(
                "Unknown outlier method: '{}'. Use 'none', 'iqr' or 'zscore'.",
                s
            )),
        }
    }
}

/// Rows removed while visiting one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnRemoval {
    pub column: String,
    pub rows_before: usize,
    pub rows_removed: usize,
    /// `false` when the column was skipped (zero or undefined spread for z-scores)
    pub applied: bool,
}

/// Per-column record of a progressive filtering pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutlierReport {
    pub initial_rows: usize,
    pub final_rows: usize,
    pub columns: Vec<ColumnRemoval>,
}

impl OutlierReport {
    pub fn total_removed(&self) -> usize {
        self.initial_rows - self.final_rows
    }
}

/// Remove outlier rows, narrowing the table column by column.
pub fn remove_outliers(df: &DataFrame, method: OutlierMethod) -> Result<DataFrame> {
    remove_outliers_with_report(df, method).map(|(filtered, _)| filtered)
}

/// Same as [`remove_outliers`], also returning how many rows each column removed.
pub fn remove_outliers_with_report(
    df: &DataFrame,
    method: OutlierMethod,
) -> Result<(DataFrame, OutlierReport)> {
    let mut report = OutlierReport {
        initial_rows: df.height(),
        final_rows: df.height(),
        columns: Vec::new(),
    };

    if method == OutlierMethod::None {
        return Ok((df.clone(), report));
    }

    // Sequential fold: each step sees the previous step's output
    let mut current = df.clone();
    for col_name in numeric_column_names(df) {
        let rows_before = current.height();
        let (next, applied) = filter_column(&current, &col_name, method)?;
        report.columns.push(ColumnRemoval {
            column: col_name,
            rows_before,
            rows_removed: rows_before - next.height(),
            applied,
        });
        current = next;
    }

    report.final_rows = current.height();
    Ok((current, report))
}

/// Apply one column's filter to the table as it currently stands.
///
/// Returns the narrowed table and whether the filter was applied. A missing value
/// in the visited column never satisfies the bounds, so such rows are removed.
pub fn filter_column(
    df: &DataFrame,
    col_name: &str,
    method: OutlierMethod,
) -> Result<(DataFrame, bool)> {
    let values = column_values(df.column(col_name)?)?;
    let present = present_values(&values);

    let keep: Vec<bool> = match method {
        OutlierMethod::None => return Ok((df.clone(), false)),
        OutlierMethod::Iqr => {
            let Some((lower, upper)) = iqr_bounds(&present) else {
                // No quartiles to compare against: every comparison fails
                return Ok((df.clear(), true));
            };
            values
                .iter()
                .map(|v| v.is_some_and(|x| x >= lower && x <= upper))
                .collect()
        }
        OutlierMethod::ZScore => {
            let std = population_std_dev(&present).unwrap_or(f64::NAN);
            if std == 0.0 || !std.is_finite() {
                return Ok((df.clone(), false));
            }
            let m = mean(&present).unwrap_or(f64::NAN);
            values
                .iter()
                .map(|v| v.is_some_and(|x| ((x - m) / std).abs() < Z_SCORE_LIMIT))
                .collect()
        }
    };

    let mask: BooleanChunked = keep.into_iter().collect();
    Ok((df.filter(&mask)?, true))
}

/// Tukey fences `[Q1 - 1.5 IQR, Q3 + 1.5 IQR]`, or `None` without present values.
pub fn iqr_bounds(present: &[f64]) -> Option<(f64, f64)> {
    let q1 = quantile(present, 0.25)?;
    let q3 = quantile(present, 0.75)?;
    let iqr = q3 - q1;
    Some((q1 - IQR_MULTIPLIER * iqr, q3 + IQR_MULTIPLIER * iqr))
}
