//! Temporal bucketing of reporting-period keys.
//!
//! Period keys arrive as `YYYY` or `YYYYMM` strings; which one is always
//! decided by the call site via [`TemporalGrain`], never guessed from key
//! content. The backend's unclassified sentinel (an all-zero key) is
//! dropped before labels are derived or years filtered.

use crate::constants::{self, columns, is_unclassified_period};
use crate::error::{Result, RouteframeError};
use crate::frame::bool_mask;
use crate::models::TemporalGrain;
use polars::prelude::*;
use tracing::debug;

/// A parsed reporting-period key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodParts {
    pub year: i32,
    /// 1-based month, present under [`TemporalGrain::Months`]
    pub month: Option<u32>,
}

/// Parse a raw period key under the selected grain
pub fn parse_period_key(key: &str, grain: TemporalGrain) -> Result<PeriodParts> {
    let digits = !key.is_empty() && key.chars().all(|c| c.is_ascii_digit());
    match grain {
        TemporalGrain::Years => {
            if !digits || key.len() != 4 {
                return Err(period_error(key, grain, "expected a 4-digit year"));
            }
            let year = key
                .parse::<i32>()
                .map_err(|_| period_error(key, grain, "expected a 4-digit year"))?;
            Ok(PeriodParts { year, month: None })
        }
        TemporalGrain::Months => {
            if !digits || key.len() != 6 {
                return Err(period_error(key, grain, "expected a 6-digit year+month"));
            }
            let year = key[..4]
                .parse::<i32>()
                .map_err(|_| period_error(key, grain, "invalid year component"))?;
            let month = key[4..]
                .parse::<u32>()
                .map_err(|_| period_error(key, grain, "invalid month component"))?;
            if !(1..=12).contains(&month) {
                return Err(period_error(key, grain, "month must be 01-12"));
            }
            Ok(PeriodParts {
                year,
                month: Some(month),
            })
        }
    }
}

/// Derive the human-readable label for a period key
///
/// `Years` keys label as the 4-digit year string itself; `Months` keys
/// label as the full month name from the fixed month table.
pub fn period_label(key: &str, grain: TemporalGrain) -> Result<String> {
    let parts = parse_period_key(key, grain)?;
    match parts.month {
        None => Ok(key.to_string()),
        Some(month) => constants::month_name(month)
            .map(str::to_string)
            .ok_or_else(|| period_error(key, grain, "month out of table range")),
    }
}

/// Compact `"Mon YY"` label for a `YYYYMM` key, e.g. `199602` -> `Feb 96`
pub fn month_year_label(key: &str) -> Result<String> {
    let grain = TemporalGrain::Months;
    let parts = parse_period_key(key, grain)?;
    let abbrev = parts
        .month
        .and_then(constants::month_abbrev)
        .ok_or_else(|| period_error(key, grain, "month out of table range"))?;
    Ok(format!("{} {}", abbrev, &key[2..4]))
}

/// Drop rows whose period key is the backend's unclassified sentinel
pub fn drop_unclassified_periods(df: &DataFrame, period_column: &str) -> Result<DataFrame> {
    let keys = df.column(period_column)?.str()?;
    let mask: Vec<bool> = keys
        .into_iter()
        .map(|key| key.is_none_or(|k| !is_unclassified_period(k)))
        .collect();
    Ok(df.filter(&bool_mask(mask))?)
}

/// Append the derived period-label column to a frame
///
/// Unclassified-period rows are dropped first; every remaining key must
/// parse under the selected grain.
pub fn bucket_periods(df: &DataFrame, period_column: &str, grain: TemporalGrain) -> Result<DataFrame> {
    let mut out = drop_unclassified_periods(df, period_column)?;

    let labels = {
        let keys = out.column(period_column)?.str()?;
        let mut labels = Vec::with_capacity(out.height());
        for key in keys {
            let key = key.ok_or_else(|| period_error("<null>", grain, "null period key"))?;
            labels.push(period_label(key, grain)?);
        }
        labels
    };

    debug!(
        rows = out.height(),
        grain = grain.as_str(),
        "bucketed periods"
    );

    out.with_column(Column::new(columns::PERIOD_LABEL.into(), labels))?;
    Ok(out)
}

/// Retain rows whose period key falls in the requested year
///
/// The unclassified sentinel is excluded before any key is parsed.
pub fn filter_to_year(
    df: &DataFrame,
    period_column: &str,
    grain: TemporalGrain,
    year: i32,
) -> Result<DataFrame> {
    let keys = df.column(period_column)?.str()?;
    let mut mask = Vec::with_capacity(df.height());
    for key in keys {
        let keep = match key {
            None => return Err(period_error("<null>", grain, "null period key")),
            Some(k) if is_unclassified_period(k) => false,
            Some(k) => parse_period_key(k, grain)?.year == year,
        };
        mask.push(keep);
    }
    Ok(df.filter(&bool_mask(mask))?)
}

fn period_error(key: &str, grain: TemporalGrain, reason: &str) -> RouteframeError {
    RouteframeError::PeriodParse {
        key: key.to_string(),
        grain: grain.as_str(),
        reason: reason.to_string(),
    }
}
