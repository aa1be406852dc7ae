//! Weight extraction and weighted column means

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::error::WeightError;
use super::numeric::{column_values, mean, numeric_column_names, present_values};

/// Which column, if any, supplies sample weights
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WeightSelector {
    /// Plain arithmetic means (default)
    #[default]
    Unweighted,
    /// Weighted means using the named column
    Column(String),
}

impl WeightSelector {
    /// Build a selector from an optional column name.
    ///
    /// The literal string `"None"` also selects unweighted means, so a column
    /// picker can offer it as a regular choice.
    pub fn from_option(column: Option<&str>) -> Self {
        match column {
            None | Some("None") => WeightSelector::Unweighted,
            Some(name) => WeightSelector::Column(name.to_string()),
        }
    }

    pub fn column_name(&self) -> Option<&str> {
        match self {
            WeightSelector::Unweighted => None,
            WeightSelector::Column(name) => Some(name.as_str()),
        }
    }
}

/// Whether a summary holds plain or weighted means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SummaryKind {
    Mean,
    WeightedMean,
}

impl SummaryKind {
    /// Column header used when the summary is rendered
    pub fn label(&self) -> &'static str {
        match self {
            SummaryKind::Mean => "Mean",
            SummaryKind::WeightedMean => "Weighted Mean",
        }
    }
}

/// Mean of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMean {
    pub variable: String,
    /// `None` when the column has no present values
    pub value: Option<f64>,
}

/// Per-column means in table column order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    pub kind: SummaryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_column: Option<String>,
    pub means: Vec<ColumnMean>,
}

impl SummaryResult {
    pub fn get(&self, variable: &str) -> Option<f64> {
        self.means
            .iter()
            .find(|m| m.variable == variable)
            .and_then(|m| m.value)
    }

    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }
}

/// Coerce a weight column to numbers.
///
/// Numeric and boolean columns are cast directly. Any other column is read as
/// text and each entry parsed as a float; entries that fail to parse, nulls and
/// NaN all become `None`.
pub fn coerce_weights(column: &Column) -> PolarsResult<Vec<Option<f64>>> {
    let dtype = column.dtype();
    if dtype.is_primitive_numeric() || dtype == &DataType::Boolean {
        return column_values(column);
    }

    let Ok(text) = column.cast(&DataType::String) else {
        return Ok(vec![None; column.len()]);
    };
    let weights = text
        .str()?
        .into_iter()
        .map(|v| {
            v.and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|w| !w.is_nan())
        })
        .collect();
    Ok(weights)
}

/// Arithmetic mean of every numeric column, skipping missing values per column.
pub fn unweighted_means(df: &DataFrame) -> PolarsResult<SummaryResult> {
    let mut means = Vec::new();
    for col_name in numeric_column_names(df) {
        let values = column_values(df.column(&col_name)?)?;
        means.push(ColumnMean {
            value: mean(&present_values(&values)),
            variable: col_name,
        });
    }

    Ok(SummaryResult {
        kind: SummaryKind::Mean,
        weight_column: None,
        means,
    })
}

/// Compute plain or weighted means for every numeric column.
///
/// With a weight column, only rows holding a valid weight take part. For each
/// column the result is `sum(value * weight) / sum(weight)`, where the numerator
/// skips missing values and the denominator covers every valid-weight row.
/// A numeric weight column is summarized like any other numeric column.
///
/// # Errors
/// * [`WeightError::ColumnNotFound`] - the weight column does not exist
/// * [`WeightError::InvalidWeights`] - no entry could be read as a number
/// * [`WeightError::ZeroTotalWeight`] - valid weights sum to exactly zero
pub fn apply_weights(
    df: &DataFrame,
    selector: &WeightSelector,
) -> Result<SummaryResult, WeightError> {
    let weight_col = match selector {
        WeightSelector::Unweighted => return Ok(unweighted_means(df)?),
        WeightSelector::Column(name) => name,
    };

    let column = df
        .column(weight_col)
        .map_err(|_| WeightError::ColumnNotFound {
            column: weight_col.clone(),
        })?;
    let weights = coerce_weights(column)?;

    let valid: Vec<(usize, f64)> = weights
        .iter()
        .enumerate()
        .filter_map(|(row, w)| w.map(|w| (row, w)))
        .collect();

    if valid.is_empty() {
        return Err(WeightError::InvalidWeights {
            column: weight_col.clone(),
        });
    }

    let total_weight: f64 = valid.iter().map(|(_, w)| w).sum();
    if total_weight == 0.0 {
        return Err(WeightError::ZeroTotalWeight {
            column: weight_col.clone(),
        });
    }

    let mut means = Vec::new();
    for col_name in numeric_column_names(df) {
        let values = column_values(df.column(&col_name)?)?;
        let weighted_sum: f64 = valid
            .iter()
            .filter_map(|&(row, w)| values[row].map(|x| x * w))
            .sum();
        means.push(ColumnMean {
            variable: col_name,
            value: Some(weighted_sum / total_weight),
        });
    }

    Ok(SummaryResult {
        kind: SummaryKind::WeightedMean,
        weight_column: Some(weight_col.clone()),
        means,
    })
}

/// Summary together with the reason weighting was abandoned, if it was
#[derive(Debug)]
pub struct SummaryOutcome {
    pub summary: SummaryResult,
    pub fallback_reason: Option<WeightError>,
}

/// Weighted means, falling back to plain means when the weights are unusable.
///
/// Any [`WeightError`] other than an underlying polars failure triggers the
/// fallback; the error is handed back so the caller can warn about it.
pub fn summarize_with_fallback(
    df: &DataFrame,
    selector: &WeightSelector,
) -> Result<SummaryOutcome> {
    match apply_weights(df, selector) {
        Ok(summary) => Ok(SummaryOutcome {
            summary,
            fallback_reason: None,
        }),
        Err(WeightError::Polars(e)) => Err(e.into()),
        Err(reason) => Ok(SummaryOutcome {
            summary: unweighted_means(df)?,
            fallback_reason: Some(reason),
        }),
    }
}
