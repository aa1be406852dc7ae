//! Descriptive statistics per column, shown in the dataset overview
//!
//! Numeric columns get count, mean, sample std, min, quartiles and max over
//! their present values. Every other column gets count, number of distinct
//! values, the most frequent value and its frequency.

use std::collections::HashMap;

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::numeric::{column_values, mean, present_values, quantile_sorted, sample_std_dev};

/// Summary of the present values of a numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation; `None` below two values
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Summary of a text, boolean or other non-numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalStats {
    pub count: usize,
    pub unique: usize,
    /// Most frequent value; ties go to the value seen first
    pub top: Option<String>,
    pub freq: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnStats {
    Numeric(NumericStats),
    Categorical(CategoricalStats),
}

/// Descriptive statistics for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescription {
    pub column: String,
    pub stats: ColumnStats,
}

/// Describe every column of the table, in table order.
pub fn describe_columns(df: &DataFrame) -> Result<Vec<ColumnDescription>> {
    let mut descriptions = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        let stats = if column.dtype().is_primitive_numeric() {
            ColumnStats::Numeric(numeric_stats(column)?)
        } else {
            ColumnStats::Categorical(categorical_stats(column)?)
        };
        descriptions.push(ColumnDescription {
            column: column.name().to_string(),
            stats,
        });
    }

    Ok(descriptions)
}

fn numeric_stats(column: &Column) -> PolarsResult<NumericStats> {
    let mut present = present_values(&column_values(column)?);
    present.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Ok(NumericStats {
        count: present.len(),
        mean: mean(&present),
        std: sample_std_dev(&present),
        min: present.first().copied(),
        q25: quantile_sorted(&present, 0.25),
        q50: quantile_sorted(&present, 0.5),
        q75: quantile_sorted(&present, 0.75),
        max: present.last().copied(),
    })
}

fn categorical_stats(column: &Column) -> PolarsResult<CategoricalStats> {
    let count = column.len() - column.null_count();

    // Nested types have no text form to count
    let Ok(text) = column.cast(&DataType::String) else {
        return Ok(CategoricalStats {
            count,
            unique: 0,
            top: None,
            freq: 0,
        });
    };

    let mut frequencies: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    for value in text.str()?.into_iter().flatten() {
        let entry = frequencies.entry(value).or_insert_with(|| {
            first_seen.push(value);
            0
        });
        *entry += 1;
    }

    let mut top: Option<(&str, usize)> = None;
    for value in &first_seen {
        let freq = frequencies[value];
        if top.map_or(true, |(_, best)| freq > best) {
            top = Some((*value, freq));
        }
    }

    Ok(CategoricalStats {
        count,
        unique: frequencies.len(),
        top: top.map(|(value, _)| value.to_string()),
        freq: top.map_or(0, |(_, freq)| freq),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_stats_skip_missing() {
        let df = df! {
            "x" => [Some(4.0f64), None, Some(2.0), Some(f64::NAN), Some(6.0)],
        }
        .unwrap();

        let desc = describe_columns(&df).unwrap();
        let ColumnStats::Numeric(stats) = &desc[0].stats else {
            panic!("expected numeric stats");
        };
        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean, Some(4.0));
        assert_eq!(stats.std, Some(2.0));
        assert_eq!(stats.min, Some(2.0));
        assert_eq!(stats.q50, Some(4.0));
        assert_eq!(stats.max, Some(6.0));
    }

    #[test]
    fn test_all_missing_numeric_column() {
        let df = df! { "x" => [None::<f64>, None] }.unwrap();

        let desc = describe_columns(&df).unwrap();
        let ColumnStats::Numeric(stats) = &desc[0].stats else {
            panic!("expected numeric stats");
        };
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_none() && stats.q25.is_none() && stats.max.is_none());
    }

    #[test]
    fn test_top_ties_go_to_first_seen() {
        let df = df! { "region" => ["south", "north", "north", "south", "east"] }.unwrap();

        let desc = describe_columns(&df).unwrap();
        let ColumnStats::Categorical(stats) = &desc[0].stats else {
            panic!("expected categorical stats");
        };
        assert_eq!(stats.unique, 3);
        assert_eq!(stats.top.as_deref(), Some("south"));
        assert_eq!(stats.freq, 2);
    }

    #[test]
    fn test_booleans_are_categorical() {
        let df = df! { "urban" => [true, false, true] }.unwrap();

        let desc = describe_columns(&df).unwrap();
        assert!(matches!(desc[0].stats, ColumnStats::Categorical(_)));
    }
}
