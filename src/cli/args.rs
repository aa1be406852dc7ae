//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{ImputeMethod, OutlierMethod, DEFAULT_CONFIDENCE};
use crate::report::DEFAULT_TITLE;

/// svyreport - Clean survey data and report (weighted) means with margins of error
#[derive(Parser, Debug)]
#[command(name = "svyreport")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Missing value imputation for numeric columns: "mean", "median" or "none"
    #[arg(long, default_value = "mean")]
    pub impute: ImputeMethod,

    /// Outlier filtering applied column by column: "none", "iqr" or "zscore"
    #[arg(long, default_value = "none")]
    pub outliers: OutlierMethod,

    /// Column containing sample weights.
    /// If not provided, one can be selected interactively (or "None" for plain means).
    #[arg(short = 'w', long)]
    pub weight_column: Option<String>,

    /// Confidence level for margins of error (strictly between 0 and 1)
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE, value_parser = validate_confidence)]
    pub confidence: f64,

    /// Report title
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Output path for the text report.
    /// Defaults to input directory with '_report.txt' suffix (e.g., data.csv -> data_report.txt).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also export the report document as JSON next to the text report
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Package the text (and JSON) report into a zip archive
    #[arg(long, default_value = "false")]
    pub bundle: bool,

    /// Skip interactive prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Get the report path, deriving it from the input if not explicitly provided.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let parent = self
                .input
                .parent()
                .unwrap_or_else(|| std::path::Path::new("."));
            let stem = self
                .input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            parent.join(format!("{}_report.txt", stem))
        })
    }

    /// Name of the dataset as shown in the report
    pub fn dataset_name(&self) -> String {
        self.input
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| self.input.display().to_string())
    }
}

/// Validator for the confidence parameter
fn validate_confidence(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!(
            "confidence must be between 0.0 and 1.0 (exclusive), got {}",
            value
        ))
    }
}
