//! Margin of error for column means
//!
//! The margin is the half-width of a Student-t confidence interval for the mean:
//! `sem * t(n - 1, (1 + confidence) / 2)` with `sem = s / sqrt(n)` and `s` the
//! sample standard deviation.

use polars::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use super::error::StatsError;
use super::numeric::{column_values, numeric_column_names, present_values, sample_std_dev};

/// Confidence level used when none is given
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Margin of error for one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum Margin {
    Defined(f64),
    /// Fewer than two present values
    Undefined,
}

impl Margin {
    pub fn value(&self) -> Option<f64> {
        match self {
            Margin::Defined(v) => Some(*v),
            Margin::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Margin::Undefined)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMargin {
    pub variable: String,
    pub margin: Margin,
}

/// Per-column margins in table column order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarginResult {
    pub confidence: f64,
    pub margins: Vec<ColumnMargin>,
}

impl MarginResult {
    pub fn get(&self, variable: &str) -> Option<Margin> {
        self.margins
            .iter()
            .find(|m| m.variable == variable)
            .map(|m| m.margin)
    }

    pub fn len(&self) -> usize {
        self.margins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.margins.is_empty()
    }
}

/// Two-tailed Student-t critical value for `degrees_of_freedom`.
pub fn t_critical(confidence: f64, degrees_of_freedom: f64) -> Result<f64, StatsError> {
    validate_confidence(confidence)?;
    let dist = StudentsT::new(0.0, 1.0, degrees_of_freedom)
        .map_err(|e| StatsError::Distribution(e.to_string()))?;
    Ok(dist.inverse_cdf((1.0 + confidence) / 2.0))
}

/// Margin of error of the mean of a single column.
///
/// Missing values are ignored. With fewer than two present values the margin is
/// [`Margin::Undefined`]; a constant column yields a margin of zero.
pub fn margin_of_error(column: &Column, confidence: f64) -> Result<Margin, StatsError> {
    validate_confidence(confidence)?;

    let present = present_values(&column_values(column)?);
    let n = present.len();
    let Some(std) = sample_std_dev(&present) else {
        return Ok(Margin::Undefined);
    };

    let std_err = std / (n as f64).sqrt();
    if std_err == 0.0 || present.iter().all(|&x| x == present[0]) {
        return Ok(Margin::Defined(0.0));
    }

    let t = t_critical(confidence, (n - 1) as f64)?;
    Ok(Margin::Defined(std_err * t))
}

/// Margin of error for every numeric column of the table.
pub fn column_margins(df: &DataFrame, confidence: f64) -> Result<MarginResult, StatsError> {
    let mut margins = Vec::new();
    for col_name in numeric_column_names(df) {
        let margin = margin_of_error(df.column(&col_name)?, confidence)?;
        margins.push(ColumnMargin {
            variable: col_name,
            margin,
        });
    }

    Ok(MarginResult {
        confidence,
        margins,
    })
}

fn validate_confidence(confidence: f64) -> Result<(), StatsError> {
    if confidence > 0.0 && confidence < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidConfidence(confidence))
    }
}
