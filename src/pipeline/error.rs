//! Error types for the statistical core.
//!
//! Weight failures are recoverable: callers are expected to fall back to an
//! unweighted summary. Polars-level failures are carried along unchanged.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while computing weighted means.
#[derive(Debug, Error)]
pub enum WeightError {
    /// The selected weight column does not exist in the table.
    #[error("Weight column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// No row carries a value that can be read as a number.
    #[error("No valid numeric weights found in column '{column}'")]
    InvalidWeights { column: String },

    /// The valid weights add up to exactly zero.
    #[error("Sum of weights in column '{column}' is zero; cannot compute weighted mean")]
    ZeroTotalWeight { column: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Errors raised while estimating margins of error.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Confidence level must lie strictly between 0 and 1.
    #[error("Confidence level must be between 0 and 1 (exclusive), got {0}")]
    InvalidConfidence(f64),

    /// The t distribution could not be constructed.
    #[error("Failed to build t distribution: {0}")]
    Distribution(String),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}
