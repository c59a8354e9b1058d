//! Merging a measured frame with a reference frame.
//!
//! The right-outer merge keeps every reference row and joins measured rows
//! on key equality; reference rows with no match carry nulls for the
//! measured columns. Pruning groups with zero total activity afterwards is
//! what makes the final membership reflect measured activity rather than
//! reference membership.

use crate::error::Result;
use crate::frame::aggregate;
use polars::prelude::*;
use tracing::debug;

/// Right-outer merge of `primary` (measured) into `secondary` (reference)
///
/// Every `secondary` row appears at least once. Implemented as a left join
/// with the operands swapped, so the reference columns lead in the output.
pub fn right_outer_merge(
    primary: &DataFrame,
    secondary: &DataFrame,
    primary_on: &str,
    secondary_on: &str,
) -> Result<DataFrame> {
    let joined = secondary
        .clone()
        .lazy()
        .join(
            primary.clone().lazy(),
            [col(secondary_on)],
            [col(primary_on)],
            JoinArgs::new(JoinType::Left),
        )
        .collect()?;

    debug!(
        reference_rows = secondary.height(),
        measured_rows = primary.height(),
        joined_rows = joined.height(),
        "merged frames"
    );

    Ok(joined)
}

/// Merge, then drop reference groups with zero measured activity
///
/// The two phases always run in this order: joining first means a group's
/// total is computed over the selected time window, so a destination that
/// exists in the reference table but saw no activity is removed entirely.
pub fn merge_with_activity(
    primary: &DataFrame,
    secondary: &DataFrame,
    primary_on: &str,
    secondary_on: &str,
    measure_column: &str,
) -> Result<DataFrame> {
    let joined = right_outer_merge(primary, secondary, primary_on, secondary_on)?;
    aggregate::retain_active_groups(&joined, secondary_on, measure_column)
}
