//! Routeframe Library
//!
//! A Rust library for normalizing flight-route analytics results into tidy
//! Polars frames ready for charting.
//!
//! This library provides tools for:
//! - Converting N-dimensional count cubes into long-format frames with the
//!   backend's totals pseudo-category stripped
//! - Converting row exports/datagrids into frames with named columns
//! - Deriving month/year labels from raw reporting-period keys and filtering
//!   to a selected year
//! - Minimum-count filtering, per-category top-N selection, and pruning of
//!   categories with zero measured activity
//! - Right-outer merging of a measured frame against a reference frame
//! - Parsing raw backend response payloads into one stable internal contract

pub mod adapter;
pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod models;
pub mod reports;

// Re-export commonly used types
pub use config::VariableRegistry;
pub use error::{Result, RouteframeError};
pub use models::{Cube, CubeDimension, ExportRows, TemporalGrain, VariableDetails};
