//! Shared test utilities and fixture generators

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a small survey DataFrame with known characteristics for testing
///
/// This DataFrame includes:
/// - `respondent`: String identifier (never summarized)
/// - `age`: Clean numeric column
/// - `income`: Two missing values
/// - `score`: One large outlier (100.0)
/// - `weight`: Positive sample weights
pub fn create_survey_dataframe() -> DataFrame {
    df! {
        "respondent" => ["r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8"],
        "age" => [23.0f64, 35.0, 41.0, 29.0, 52.0, 38.0, 45.0, 31.0],
        "income" => [Some(30.0f64), None, Some(42.0), Some(38.0), None, Some(51.0), Some(47.0), Some(36.0)],
        "score" => [3.0f64, 4.0, 5.0, 4.0, 3.0, 100.0, 4.0, 5.0],
        "weight" => [1.0f64, 1.5, 0.5, 2.0, 1.0, 1.0, 0.5, 2.5],
    }
    .unwrap()
}

/// Create a larger survey DataFrame for performance/stress tests
///
/// Values are standard-ish uniform noise; a `weight` column is appended.
pub fn create_large_survey_dataframe(rows: usize, cols: usize) -> DataFrame {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let mut columns: Vec<Column> = Vec::with_capacity(cols + 1);

    for i in 0..cols {
        let values: Vec<f64> = (0..rows).map(|_| rng.gen_range(0.0..10.0)).collect();
        columns.push(Column::new(format!("q{}", i).into(), values));
    }

    let weights: Vec<f64> = (0..rows).map(|_| rng.gen_range(0.5..2.0)).collect();
    columns.push(Column::new("weight".into(), weights));

    DataFrame::new(columns).unwrap()
}

/// Create a DataFrame with specific missing value patterns
pub fn create_missing_test_dataframe() -> DataFrame {
    df! {
        "col_complete" => [1.0f64, 2.0, 3.0, 4.0, 5.0],
        "col_20pct_missing" => [Some(1.0f64), None, Some(3.0), Some(4.0), Some(5.0)],
        "col_40pct_missing" => [Some(1.0f64), Some(2.0), None, None, Some(5.0)],
        "col_all_missing" => [None::<f64>, None, None, None, None],
        "label" => ["a", "b", "c", "d", "e"],
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("survey.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("survey.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(
        rows, expected_rows,
        "Row count mismatch: expected {}, got {}",
        expected_rows, rows
    );
    assert_eq!(
        cols, expected_cols,
        "Column count mismatch: expected {}, got {}",
        expected_cols, cols
    );
}

/// Assert two floats agree within `tol`
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "Expected {} (±{}), got {}",
        expected,
        tol,
        actual
    );
}

/// Float values of a column, nulls and NaN as `None`
pub fn column_f64(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect()
}
