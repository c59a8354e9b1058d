//! Normalization of backend results into tidy long-format frames.
//!
//! Each submodule is a pure transformation over in-memory frames: cube and
//! export normalizers produce the frames, temporal bucketing and
//! aggregation reshape them, and merge combines a measured frame with a
//! reference frame. No stage mutates its input.

pub mod aggregate;
pub mod cube;
pub mod export;
pub mod merge;
pub mod temporal;

use polars::prelude::BooleanChunked;

/// Build a filter mask from row-wise keep decisions
pub(crate) fn bool_mask<I>(values: I) -> BooleanChunked
where
    I: IntoIterator<Item = bool>,
{
    values.into_iter().map(Some).collect()
}
