//! Cube-to-frame normalization.
//!
//! Unrolls an N-dimensional count cube into a long-format frame with one
//! row per cell, stripping the totals pseudo-category the backend appends
//! to every dimension.

use crate::constants::TOTALS_SENTINEL;
use crate::error::Result;
use crate::models::Cube;
use polars::prelude::*;
use tracing::debug;

/// Convert a count cube into a tidy frame
///
/// Output columns are the dimension names followed by the measure name; one
/// row per cell of the cross product in row-major order (last dimension
/// varies fastest). Labels equal to [`TOTALS_SENTINEL`] are dropped from
/// every dimension before rows are emitted. Cells are never pruned here,
/// zero counts included; activity-based pruning is the caller's choice via
/// [`crate::frame::aggregate`].
pub fn cube_to_frame(cube: &Cube) -> Result<DataFrame> {
    cube.validate()?;

    // Per-dimension label positions with the totals pseudo-category removed
    let kept: Vec<Vec<usize>> = cube
        .dimensions
        .iter()
        .map(|dim| {
            dim.labels
                .iter()
                .enumerate()
                .filter(|(_, label)| label.as_str() != TOTALS_SENTINEL)
                .map(|(index, _)| index)
                .collect()
        })
        .collect();

    // Strides into the flat count vector, last dimension fastest
    let dim_count = cube.dimensions.len();
    let mut strides = vec![1usize; dim_count];
    for d in (0..dim_count.saturating_sub(1)).rev() {
        strides[d] = strides[d + 1] * cube.dimensions[d + 1].labels.len();
    }

    let row_count: usize = kept.iter().map(Vec::len).product();
    let mut label_columns: Vec<Vec<String>> = (0..dim_count)
        .map(|_| Vec::with_capacity(row_count))
        .collect();
    let mut counts: Vec<i64> = Vec::with_capacity(row_count);

    for row in 0..row_count {
        // Decompose the output row index into per-dimension positions
        let mut remainder = row;
        let mut flat = 0usize;
        for d in (0..dim_count).rev() {
            let size = kept[d].len();
            let position = kept[d][remainder % size];
            remainder /= size;
            flat += position * strides[d];
            label_columns[d].push(cube.dimensions[d].labels[position].clone());
        }
        counts.push(cube.counts[flat]);
    }

    debug!(
        rows = row_count,
        dimensions = dim_count,
        measure = %cube.measure,
        "normalized cube"
    );

    let mut columns: Vec<Column> = cube
        .dimensions
        .iter()
        .zip(label_columns)
        .map(|(dim, labels)| Column::new(dim.name.as_str().into(), labels))
        .collect();
    columns.push(Column::new(cube.measure.as_str().into(), counts));

    Ok(DataFrame::new(columns)?)
}
