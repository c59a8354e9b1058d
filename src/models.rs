//! Core data structures for result normalization.
//!
//! Defines the stable internal contract for backend query results: count
//! cubes, row exports, temporal grain selection, and variable metadata.
//! Backend-generation-specific wire shapes live in [`crate::adapter`]; the
//! normalizers only ever see these types.

use crate::error::{Result, RouteframeError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dimension of a count cube: a name and its ordered category labels
///
/// The label sequence is exactly what the backend returned, including the
/// totals pseudo-category when present; stripping it is the normalizer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeDimension {
    /// Column name the dimension contributes to the normalized frame
    pub name: String,
    /// Ordered category labels
    pub labels: Vec<String>,
}

impl CubeDimension {
    pub fn new(name: impl Into<String>, labels: Vec<String>) -> Self {
        Self {
            name: name.into(),
            labels,
        }
    }
}

/// An N-dimensional count cube returned by the query backend
///
/// Counts are stored as a flat vector in row-major order over the
/// dimensions: the last dimension varies fastest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cube {
    pub dimensions: Vec<CubeDimension>,
    /// Row-major cell counts; length must equal the product of label counts
    pub counts: Vec<i64>,
    /// Name of the measure column in the normalized frame
    pub measure: String,
}

impl Cube {
    pub fn new(dimensions: Vec<CubeDimension>, counts: Vec<i64>, measure: impl Into<String>) -> Self {
        Self {
            dimensions,
            counts,
            measure: measure.into(),
        }
    }

    /// Total number of cells the dimensions describe
    pub fn expected_cells(&self) -> usize {
        self.dimensions.iter().map(|d| d.labels.len()).product()
    }

    /// Verify the count vector matches the dimension cross product
    pub fn validate(&self) -> Result<()> {
        let expected = self.expected_cells();
        if self.counts.len() != expected {
            return Err(RouteframeError::CubeShapeMismatch {
                cells: self.counts.len(),
                expected,
            });
        }
        Ok(())
    }
}

/// A flat row export: requested column names plus one string tuple per record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportRows {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Verify every row matches the requested column list arity
    pub fn validate(&self) -> Result<()> {
        for (index, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(RouteframeError::RowArityMismatch {
                    row: index,
                    found: row.len(),
                    expected: self.columns.len(),
                });
            }
        }
        Ok(())
    }
}

/// How raw reporting-period keys are interpreted
///
/// The grain is always chosen by the call site (a report either shows all
/// years or drills into one), never guessed from key content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemporalGrain {
    /// Keys are 4-digit years (`YYYY`)
    Years,
    /// Keys are year+month (`YYYYMM`)
    Months,
}

impl TemporalGrain {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemporalGrain::Years => "year",
            TemporalGrain::Months => "month",
        }
    }
}

/// Metadata about a backend variable, as reported by the system catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDetails {
    pub code: String,
    pub description: String,
    /// Earliest date covered, for date variables
    pub min_date: Option<NaiveDate>,
    /// Latest date covered, for date variables
    pub max_date: Option<NaiveDate>,
}
