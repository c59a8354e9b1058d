//! Category-level aggregation and filtering.
//!
//! Filters operate on whole categories: a category's rows are kept or
//! dropped as a unit based on the sum of its measure across all periods,
//! never row by row.

use crate::error::Result;
use crate::frame::bool_mask;
use polars::prelude::*;
use std::collections::HashSet;
use tracing::debug;

const SUM_COLUMN: &str = "__category_sum";

/// Per-category measure sums, in first-appearance order
fn category_sums(
    df: &DataFrame,
    category_column: &str,
    measure_column: &str,
) -> Result<Vec<(String, i64)>> {
    let grouped = df
        .clone()
        .lazy()
        .group_by_stable([col(category_column)])
        .agg([col(measure_column)
            .cast(DataType::Int64)
            .sum()
            .alias(SUM_COLUMN)])
        .collect()?;

    let categories = grouped.column(category_column)?.str()?;
    let sums = grouped.column(SUM_COLUMN)?.i64()?;

    Ok((0..grouped.height())
        .map(|index| {
            let category = categories.get(index).unwrap_or("").to_string();
            // Null sums only arise from all-null groups, which count as zero
            let sum = sums.get(index).unwrap_or(0);
            (category, sum)
        })
        .collect())
}

/// Retain rows of a frame whose category is in the kept set
fn filter_to_categories(
    df: &DataFrame,
    category_column: &str,
    kept: &HashSet<String>,
) -> Result<DataFrame> {
    let categories = df.column(category_column)?.str()?;
    let mask: Vec<bool> = categories
        .into_iter()
        .map(|value| value.is_some_and(|v| kept.contains(v)))
        .collect();
    Ok(df.filter(&bool_mask(mask))?)
}

/// Keep categories whose summed measure strictly exceeds `limit`
///
/// Sums are computed per distinct `category_column` value across every row
/// of the frame, so a category spread over multiple periods is judged on
/// its grand total. `limit = 0` still drops categories whose total is
/// exactly zero.
pub fn filter_by_minimum_count(
    df: &DataFrame,
    category_column: &str,
    count_column: &str,
    limit: i64,
) -> Result<DataFrame> {
    let sums = category_sums(df, category_column, count_column)?;
    let kept: HashSet<String> = sums
        .into_iter()
        .filter(|(_, sum)| *sum > limit)
        .map(|(category, _)| category)
        .collect();

    debug!(
        limit,
        kept = kept.len(),
        category = category_column,
        "applied minimum-count filter"
    );

    filter_to_categories(df, category_column, &kept)
}

/// Keep rows of the `n` categories with the largest summed measure
///
/// `n = 0` returns the input unchanged. Ties break by first appearance in
/// the frame, which makes the selection deterministic for a given input.
pub fn top_n_by_sum(
    df: &DataFrame,
    category_column: &str,
    measure_column: &str,
    n: usize,
) -> Result<DataFrame> {
    if n == 0 {
        return Ok(df.clone());
    }

    let mut sums = category_sums(df, category_column, measure_column)?;
    sums.sort_by(|a, b| b.1.cmp(&a.1));
    let kept: HashSet<String> = sums
        .into_iter()
        .take(n)
        .map(|(category, _)| category)
        .collect();

    debug!(n, kept = kept.len(), "applied top-n filter");

    filter_to_categories(df, category_column, &kept)
}

/// Drop whole groups whose summed measure is zero
///
/// Null measures (from unmatched merge rows) count as zero.
pub fn retain_active_groups(
    df: &DataFrame,
    group_column: &str,
    measure_column: &str,
) -> Result<DataFrame> {
    filter_by_minimum_count(df, group_column, measure_column, 0)
}

/// Grand total of a measure column; zero totals are a valid "no results"
/// outcome for the caller to render, not an error
pub fn measure_total(df: &DataFrame, measure_column: &str) -> Result<i64> {
    let cast = df.column(measure_column)?.cast(&DataType::Int64)?;
    Ok(cast.i64()?.sum().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                "airline".into(),
                vec!["A", "A", "B", "B", "C", "C"]
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>(),
            ),
            Column::new(
                "date".into(),
                vec!["2019", "2020", "2019", "2020", "2019", "2020"]
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>(),
            ),
            Column::new("routes".into(), vec![7i64, 8, 5, 3, 0, 0]),
        ])
        .unwrap()
    }

    fn categories(df: &DataFrame) -> Vec<String> {
        df.column("airline")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_minimum_count_sums_across_periods() {
        // A sums to 15, B to 8: limit 10 keeps only A, both of its rows
        let filtered = filter_by_minimum_count(&activity_frame(), "airline", "routes", 10).unwrap();
        assert_eq!(categories(&filtered), ["A", "A"]);
    }

    #[test]
    fn test_minimum_count_zero_drops_zero_total_categories() {
        let filtered = filter_by_minimum_count(&activity_frame(), "airline", "routes", 0).unwrap();
        assert_eq!(categories(&filtered), ["A", "A", "B", "B"]);
    }

    #[test]
    fn test_minimum_count_is_idempotent() {
        let once = filter_by_minimum_count(&activity_frame(), "airline", "routes", 4).unwrap();
        let twice = filter_by_minimum_count(&once, "airline", "routes", 4).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_top_n_keeps_largest_sums() {
        let top = top_n_by_sum(&activity_frame(), "airline", "routes", 1).unwrap();
        assert_eq!(categories(&top), ["A", "A"]);
    }

    #[test]
    fn test_top_n_never_exceeds_n_categories() {
        let top = top_n_by_sum(&activity_frame(), "airline", "routes", 2).unwrap();
        let distinct: HashSet<String> = categories(&top).into_iter().collect();
        assert!(distinct.len() <= 2);
        assert!(distinct.contains("A"));
        assert!(distinct.contains("B"));
    }

    #[test]
    fn test_top_n_zero_is_a_no_op() {
        let out = top_n_by_sum(&activity_frame(), "airline", "routes", 0).unwrap();
        assert_eq!(out, activity_frame());
    }

    #[test]
    fn test_top_n_ties_break_by_first_appearance() {
        let df = DataFrame::new(vec![
            Column::new(
                "airline".into(),
                vec!["X", "Y", "Z"]
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>(),
            ),
            Column::new("routes".into(), vec![4i64, 4, 4]),
        ])
        .unwrap();
        let top = top_n_by_sum(&df, "airline", "routes", 2).unwrap();
        assert_eq!(categories(&top), ["X", "Y"]);
    }

    #[test]
    fn test_measure_total() {
        assert_eq!(measure_total(&activity_frame(), "routes").unwrap(), 23);

        let empty = activity_frame().head(Some(0));
        assert_eq!(measure_total(&empty, "routes").unwrap(), 0);
    }
}
