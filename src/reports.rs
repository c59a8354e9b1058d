//! Report frame assembly.
//!
//! Composes the normalizers into the chart-ready frames each report needs.
//! Every function takes already-fetched backend results plus the report's
//! parameters and performs no I/O; callers fetch, this module reshapes.

use crate::constants::{SHOW_ALL_YEARS, columns};
use crate::error::{Result, RouteframeError};
use crate::frame::{aggregate, cube::cube_to_frame, export::export_to_frame, merge, temporal};
use crate::models::{Cube, ExportRows, TemporalGrain, VariableDetails};
use chrono::Datelike;
use polars::prelude::*;
use tracing::debug;

/// Labels of selector categories whose count exceeds `limit`, title-cased
///
/// Expects a one-dimensional cube of counts per category, as returned when
/// populating a report's drop-down options. Order follows the cube.
pub fn selector_labels_with_minimum(cube: &Cube, limit: i64) -> Result<Vec<String>> {
    if cube.dimensions.len() != 1 {
        return Err(RouteframeError::MalformedResponse {
            reason: format!(
                "selector cube must have one dimension, got {}",
                cube.dimensions.len()
            ),
        });
    }

    let df = cube_to_frame(cube)?;
    let category_column = cube.dimensions[0].name.as_str();
    let filtered = aggregate::filter_by_minimum_count(&df, category_column, &cube.measure, limit)?;

    let labels = filtered
        .column(category_column)?
        .str()?
        .into_iter()
        .flatten()
        .map(title_case)
        .collect();
    Ok(labels)
}

/// Time-series frame of route counts per selector category
///
/// The cube's first dimension is the selector, the second the reporting
/// period. With a selected year the period keys are `YYYYMM` and rows are
/// filtered to that year; without one they are `YYYY`. `top` limits the
/// frame to the categories with the most routes overall (`0` keeps all).
pub fn route_activity_frame(
    cube: &Cube,
    selected_year: Option<i32>,
    top: usize,
) -> Result<DataFrame> {
    let df = report_cube_frame(cube)?;

    let grain = match selected_year {
        Some(_) => TemporalGrain::Months,
        None => TemporalGrain::Years,
    };

    let df = temporal::bucket_periods(&df, columns::DATE, grain)?;
    let df = match selected_year {
        Some(year) => temporal::filter_to_year(&df, columns::DATE, grain, year)?,
        None => df,
    };

    let df = aggregate::top_n_by_sum(&df, columns::VAR_NAME, columns::ROUTES, top)?;

    debug!(
        rows = df.height(),
        selected_year,
        top,
        "assembled route activity frame"
    );
    Ok(df)
}

/// Frame for the unique-routes map: the export rows, verbatim
///
/// Coordinate columns stay formatted strings; the chart collaborator
/// consumes them as-is.
pub fn route_map_frame(export: &ExportRows) -> Result<DataFrame> {
    export_to_frame(export)
}

/// Destination-activity frame: cube counts merged onto a destination
/// reference export, pruned to destinations with activity in the window
///
/// With a selected year the period keys are `YYYYMM`, rows are filtered to
/// that year and the period column is relabeled `"Mon YY"` for animation
/// frames. The reference export's first column is the destination key.
pub fn destination_activity_frame(
    cube: &Cube,
    reference: &ExportRows,
    selected_year: Option<i32>,
) -> Result<DataFrame> {
    let df = report_cube_frame(cube)?;

    let df = match selected_year {
        Some(year) => {
            let filtered =
                temporal::filter_to_year(&df, columns::DATE, TemporalGrain::Months, year)?;
            relabel_month_year(filtered)?
        }
        None => temporal::drop_unclassified_periods(&df, columns::DATE)?,
    };

    let destination_key = reference
        .columns
        .first()
        .ok_or_else(|| RouteframeError::MalformedResponse {
            reason: "destination reference export has no columns".to_string(),
        })?
        .clone();
    let reference_df = export_to_frame(reference)?;

    let merged = merge::merge_with_activity(
        &df,
        &reference_df,
        columns::VAR_NAME,
        &destination_key,
        columns::ROUTES,
    )?;

    debug!(
        rows = merged.height(),
        selected_year,
        "assembled destination activity frame"
    );
    Ok(merged)
}

/// Whether a report frame has any measured routes at all
///
/// A `false` here is the caller's cue to render its explicit "no results
/// found" message instead of a chart.
pub fn has_activity(df: &DataFrame) -> Result<bool> {
    Ok(aggregate::measure_total(df, columns::ROUTES)? > 0)
}

/// Reporting-year options: "Show All Years" plus one entry per year
/// covered by the reporting-period variable
pub fn reporting_year_options(details: &VariableDetails) -> Result<Vec<String>> {
    let (first, last) = details
        .min_date
        .zip(details.max_date)
        .ok_or_else(|| RouteframeError::MalformedResponse {
            reason: format!("variable '{}' has no date range", details.code),
        })?;

    let mut options = vec![SHOW_ALL_YEARS.to_string()];
    options.extend((first.year()..=last.year()).map(|year| year.to_string()));
    Ok(options)
}

/// Normalize a two-dimensional report cube and rename to the report's
/// conventional column names
fn report_cube_frame(cube: &Cube) -> Result<DataFrame> {
    if cube.dimensions.len() != 2 {
        return Err(RouteframeError::MalformedResponse {
            reason: format!(
                "report cube must have two dimensions (selector, period), got {}",
                cube.dimensions.len()
            ),
        });
    }

    let mut df = cube_to_frame(cube)?;
    rename_if_needed(&mut df, &cube.dimensions[0].name, columns::VAR_NAME)?;
    rename_if_needed(&mut df, &cube.dimensions[1].name, columns::DATE)?;
    rename_if_needed(&mut df, &cube.measure, columns::ROUTES)?;
    Ok(df)
}

fn rename_if_needed(df: &mut DataFrame, existing: &str, target: &str) -> Result<()> {
    if existing != target {
        df.rename(existing, target.into())?;
    }
    Ok(())
}

/// Replace raw `YYYYMM` keys in the period column with `"Mon YY"` labels
fn relabel_month_year(df: DataFrame) -> Result<DataFrame> {
    let labels = {
        let keys = df.column(columns::DATE)?.str()?;
        let mut labels = Vec::with_capacity(df.height());
        for key in keys {
            let key = key.ok_or_else(|| RouteframeError::PeriodParse {
                key: "<null>".to_string(),
                grain: TemporalGrain::Months.as_str(),
                reason: "null period key".to_string(),
            })?;
            labels.push(temporal::month_year_label(key)?);
        }
        labels
    };

    let mut out = df;
    out.with_column(Column::new(columns::DATE.into(), labels))?;
    Ok(out)
}

/// Title-case a backend label for display, e.g. `LAS PALMAS` -> `Las Palmas`
fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut previous_alphabetic = false;
    for c in label.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            out.push(c);
            previous_alphabetic = false;
        }
    }
    out
}
