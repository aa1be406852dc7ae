//! Unit tests for missing value analysis

use polars::prelude::*;
use svyreport::pipeline::{analyze_missing_values, impute_missing, total_missing, ImputeMethod};

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_analyze_missing_values_basic() {
    let df = df! {
        "col_complete" => [1.0f64, 2.0, 3.0, 4.0, 5.0],
        "col_partial_missing" => [Some(1.0f64), Some(2.0), None, None, Some(5.0)],
        "col_all_missing" => [None::<f64>, None, None, None, None],
    }
    .unwrap();

    let counts = analyze_missing_values(&df).unwrap();
    let by_name: std::collections::HashMap<_, _> = counts
        .iter()
        .map(|c| (c.column.as_str(), (c.missing, c.ratio)))
        .collect();

    assert_eq!(by_name["col_complete"].0, 0);
    assert_eq!(by_name["col_partial_missing"].0, 2);
    common::assert_close(by_name["col_partial_missing"].1, 0.4, 1e-12);
    assert_eq!(by_name["col_all_missing"].0, 5);
    common::assert_close(by_name["col_all_missing"].1, 1.0, 1e-12);
}

#[test]
fn test_analyze_missing_values_sorted_descending() {
    let df = common::create_missing_test_dataframe();

    let counts = analyze_missing_values(&df).unwrap();

    for pair in counts.windows(2) {
        assert!(
            pair[0].missing >= pair[1].missing,
            "Counts should be sorted descending: {} >= {}",
            pair[0].missing,
            pair[1].missing
        );
    }
    assert_eq!(counts[0].column, "col_all_missing");
}

#[test]
fn test_nan_counts_as_missing() {
    let df = df! {
        "x" => [Some(1.0f64), Some(f64::NAN), None, Some(4.0)],
    }
    .unwrap();

    let counts = analyze_missing_values(&df).unwrap();

    assert_eq!(counts[0].missing, 2);
}

#[test]
fn test_string_nulls_are_counted() {
    let df = df! {
        "label" => [Some("a"), None, Some("c")],
    }
    .unwrap();

    let counts = analyze_missing_values(&df).unwrap();

    assert_eq!(total_missing(&counts), 1);
}

#[test]
fn test_empty_dataframe() {
    let df = DataFrame::empty();

    let counts = analyze_missing_values(&df).unwrap();

    assert!(counts.is_empty());
}

#[test]
fn test_imputation_clears_partial_columns_only() {
    let df = common::create_missing_test_dataframe();

    let imputed = impute_missing(&df, ImputeMethod::Mean).unwrap();
    let counts = analyze_missing_values(&imputed).unwrap();

    // All-missing columns have no mean to fill with
    assert_eq!(total_missing(&counts), 5);
    assert_eq!(counts[0].column, "col_all_missing");
}
