//! Missing value overview, shown before cleaning

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::numeric::column_values;

/// Missing value count for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingCount {
    pub column: String,
    pub missing: usize,
    pub ratio: f64,
}

/// Count missing values in every column.
///
/// Nulls count as missing in all columns; NaN additionally counts in numeric
/// columns. Results are sorted by count descending, then by column name.
pub fn analyze_missing_values(df: &DataFrame) -> Result<Vec<MissingCount>> {
    // Handle empty DataFrame
    if df.height() == 0 {
        return Ok(Vec::new());
    }

    let rows = df.height() as f64;
    let mut counts: Vec<MissingCount> = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        let missing = if column.dtype().is_float() {
            column_values(column)?.iter().filter(|v| v.is_none()).count()
        } else {
            column.null_count()
        };

        counts.push(MissingCount {
            column: column.name().to_string(),
            missing,
            ratio: missing as f64 / rows,
        });
    }

    counts.sort_by(|a, b| b.missing.cmp(&a.missing).then_with(|| a.column.cmp(&b.column)));

    Ok(counts)
}

/// Total number of missing cells across the table
pub fn total_missing(counts: &[MissingCount]) -> usize {
    counts.iter().map(|c| c.missing).sum()
}
