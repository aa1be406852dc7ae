//! Numeric column access and descriptive statistics shared by the cleaning steps
//!
//! Polars nulls and floating-point NaN are both treated as missing values.
//! Quantiles use linear interpolation between closest ranks (position `p * (n - 1)`
//! in the sorted values), which matches the default in most statistics packages.

use polars::prelude::*;

/// Names of all primitive numeric columns, in table order.
///
/// Booleans, strings, dates and other types are not considered numeric.
pub fn numeric_column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .map(|col| col.name().to_string())
        .collect()
}

/// Read a numeric column as optional `f64` values, mapping NaN to `None`.
pub fn column_values(column: &Column) -> PolarsResult<Vec<Option<f64>>> {
    let float_col = column.cast(&DataType::Float64)?;
    let values = float_col
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(values)
}

/// Only the present values of a column, in row order.
pub fn present_values(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().filter_map(|v| *v).collect()
}

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Median of the values; the average of the two middle values for even counts.
pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let sorted = sorted_copy(data);
    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Compute the `p`-th quantile with linear interpolation.
///
/// Returns `None` for empty input or `p` outside `[0, 1]`.
pub fn quantile(data: &[f64], p: f64) -> Option<f64> {
    if data.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }
    quantile_sorted(&sorted_copy(data), p)
}

/// Quantile over data that is already sorted ascending.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    let g = h - h.floor();

    if j + 1 >= n {
        Some(sorted[n - 1])
    } else {
        Some(sorted[j] + g * (sorted[j + 1] - sorted[j]))
    }
}

/// Population standard deviation (divisor `n`). `None` for empty input.
pub fn population_std_dev(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|x| (x - m).powi(2)).sum();
    Some((ss / data.len() as f64).sqrt())
}

/// Sample standard deviation (divisor `n - 1`). `None` for fewer than two values.
pub fn sample_std_dev(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|x| (x - m).powi(2)).sum();
    Some((ss / (data.len() - 1) as f64).sqrt())
}

fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_column_names_skips_strings_and_booleans() {
        let df = df! {
            "region" => ["north", "south"],
            "income" => [1.0f64, 2.0],
            "household" => [3i64, 4],
            "urban" => [true, false],
        }
        .unwrap();

        assert_eq!(numeric_column_names(&df), vec!["income", "household"]);
    }

    #[test]
    fn test_column_values_treats_nan_as_missing() {
        let col = Column::new("x".into(), &[Some(1.0f64), None, Some(f64::NAN)]);
        let values = column_values(&col).unwrap();
        assert_eq!(values, vec![Some(1.0), None, None]);
    }

    #[test]
    fn test_column_values_casts_integers() {
        let col = Column::new("x".into(), &[Some(1i32), None, Some(3)]);
        let values = column_values(&col).unwrap();
        assert_eq!(values, vec![Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let data = [1.0, 2.0, 3.0, 4.0, 100.0];
        assert_eq!(quantile(&data, 0.25), Some(2.0));
        assert_eq!(quantile(&data, 0.75), Some(4.0));

        let data = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile(&data, 0.25).unwrap() - 1.75).abs() < 1e-12);
        assert!((quantile(&data, 0.75).unwrap() - 3.25).abs() < 1e-12);
        assert_eq!(quantile(&data, 1.5), None);
    }

    #[test]
    fn test_std_devs() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_std_dev(&data).unwrap() - 2.0).abs() < 1e-12);
        assert!((sample_std_dev(&data).unwrap() - 2.138089935299395).abs() < 1e-12);
        assert_eq!(sample_std_dev(&[1.0]), None);
        assert_eq!(population_std_dev(&[]), None);
    }
}
