//! Error handling for result normalization operations.
//!
//! Provides typed errors with context for shape validation, temporal key
//! parsing, and backend response conversion failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteframeError {
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Delimited field parsing error: {0}")]
    Delimited(#[from] csv::Error),

    #[error("Variable encoding not defined: {name}")]
    EncodingNotFound { name: String },

    #[error(
        "Cube shape mismatch: {cells} cells supplied for {expected} dimension combinations"
    )]
    CubeShapeMismatch { cells: usize, expected: usize },

    #[error("Export row {row} has {found} fields, expected {expected}")]
    RowArityMismatch {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Invalid {grain} period key: '{key}' - {reason}")]
    PeriodParse {
        key: String,
        grain: &'static str,
        reason: String,
    },

    #[error("Malformed backend response: {reason}")]
    MalformedResponse { reason: String },
}

pub type Result<T> = std::result::Result<T, RouteframeError>;
