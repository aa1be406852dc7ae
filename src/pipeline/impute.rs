//! Missing value imputation for numeric columns

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::numeric::{column_values, mean, median, numeric_column_names, present_values};

/// Strategy used to fill missing numeric values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ImputeMethod {
    /// Replace missing values with the column mean (default)
    #[default]
    Mean,
    /// Replace missing values with the column median
    Median,
    /// Leave missing values in place
    None,
}

impl std::fmt::Display for ImputeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImputeMethod::Mean => write!(f, "Mean"),
            ImputeMethod::Median => write!(f, "Median"),
            ImputeMethod::None => write!(f, "None"),
        }
    }
}

impl std::str::FromStr for ImputeMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" => Ok(ImputeMethod::Mean),
            "median" => Ok(ImputeMethod::Median),
            "none" => Ok(ImputeMethod::None),
            _ => Err(format!(
                "Unknown imputation method: '{}'. Use 'mean', 'median' or 'none'.",
                s
            )),
        }
    }
}

/// Fill missing values in every numeric column with that column's mean or median.
///
/// Columns are handled independently. Non-numeric columns are returned untouched,
/// and a column with no present values stays fully missing. Columns that receive
/// imputed values are stored as `Float64`.
pub fn impute_missing(df: &DataFrame, method: ImputeMethod) -> Result<DataFrame> {
    let mut imputed = df.clone();
    if method == ImputeMethod::None {
        return Ok(imputed);
    }

    for col_name in numeric_column_names(df) {
        let column = df.column(&col_name)?;
        let values = column_values(column)?;
        let missing = values.iter().filter(|v| v.is_none()).count();
        if missing == 0 {
            continue;
        }

        let present = present_values(&values);
        let fill = match method {
            ImputeMethod::Mean => mean(&present),
            ImputeMethod::Median => median(&present),
            ImputeMethod::None => None,
        };

        // All-missing column: nothing to impute from
        let Some(fill) = fill else {
            continue;
        };

        let filled: Vec<f64> = values.iter().map(|v| v.unwrap_or(fill)).collect();
        imputed.with_column(Column::new(column.name().clone(), filled))?;
    }

    Ok(imputed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_and_display() {
        assert_eq!("mean".parse::<ImputeMethod>().unwrap(), ImputeMethod::Mean);
        assert_eq!("MEDIAN".parse::<ImputeMethod>().unwrap(), ImputeMethod::Median);
        assert_eq!("None".parse::<ImputeMethod>().unwrap(), ImputeMethod::None);
        assert!("mode".parse::<ImputeMethod>().is_err());
        assert_eq!(ImputeMethod::Median.to_string(), "Median");
    }

    #[test]
    fn test_none_is_noop() {
        let df = df! {
            "x" => [Some(1.0f64), None, Some(3.0)],
        }
        .unwrap();
        let out = impute_missing(&df, ImputeMethod::None).unwrap();
        assert!(out.equals_missing(&df));
    }

    #[test]
    fn test_mean_fill() {
        let df = df! {
            "x" => [Some(1.0f64), None, Some(5.0)],
        }
        .unwrap();
        let out = impute_missing(&df, ImputeMethod::Mean).unwrap();
        let values = column_values(out.column("x").unwrap()).unwrap();
        assert_eq!(values, vec![Some(1.0), Some(3.0), Some(5.0)]);
    }

    #[test]
    fn test_integer_column_becomes_float_only_when_filled() {
        let df = df! {
            "with_gap" => [Some(1i64), None, Some(4)],
            "complete" => [1i64, 2, 3],
        }
        .unwrap();
        let out = impute_missing(&df, ImputeMethod::Median).unwrap();
        assert_eq!(out.column("with_gap").unwrap().dtype(), &DataType::Float64);
        assert_eq!(out.column("complete").unwrap().dtype(), &DataType::Int64);
        let values = column_values(out.column("with_gap").unwrap()).unwrap();
        assert_eq!(values[1], Some(2.5));
    }

    #[test]
    fn test_all_missing_column_stays_missing() {
        let df = df! {
            "empty" => [None::<f64>, None, None],
            "x" => [Some(2.0f64), None, Some(4.0)],
        }
        .unwrap();
        let out = impute_missing(&df, ImputeMethod::Mean).unwrap();
        assert_eq!(out.column("empty").unwrap().null_count(), 3);
        assert_eq!(out.column("x").unwrap().null_count(), 0);
    }

    #[test]
    fn test_string_columns_untouched() {
        let df = df! {
            "region" => [Some("a"), None, Some("c")],
            "x" => [Some(2.0f64), None, Some(4.0)],
        }
        .unwrap();
        let out = impute_missing(&df, ImputeMethod::Mean).unwrap();
        assert_eq!(out.column("region").unwrap().null_count(), 1);
        assert_eq!(out.get_column_names(), df.get_column_names());
    }
}
