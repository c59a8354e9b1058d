//! Backend response adapter.
//!
//! The remote analytics backend returns JSON bodies whose tabular payloads
//! are tab-delimited strings: a cube carries one header line per dimension
//! and one count line per leading-dimension combination, an export carries
//! one description line per record. This module is the only place those
//! wire shapes exist; everything downstream works against the internal
//! [`Cube`] / [`ExportRows`] contract.

use crate::error::{Result, RouteframeError};
use crate::models::{Cube, CubeDimension, ExportRows};
use serde::Deserialize;
use tracing::debug;

/// Raw cube calculation response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CubeResponse {
    pub dimension_results: Vec<DimensionResult>,
    pub measure_results: Vec<MeasureResult>,
}

/// One dimension of a raw cube response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionResult {
    pub id: String,
    /// Tab-delimited category labels, totals pseudo-category included
    pub header_descriptions: String,
}

/// One measure of a raw cube response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureResult {
    pub id: String,
    /// Tab-delimited count strings, one entry per leading-dimension
    /// combination, each holding the counts of the last dimension
    pub rows: Vec<String>,
}

/// Raw export response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub rows: Vec<ExportRowResult>,
}

/// One record of a raw export response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRowResult {
    /// Tab-delimited field values in requested-column order
    pub descriptions: String,
}

impl CubeResponse {
    /// Validate the response grid and convert it into the internal contract
    ///
    /// The first measure becomes the cube's count matrix; its id names the
    /// measure column. Any disagreement between the declared dimensions and
    /// the row grid is a hard error.
    pub fn into_cube(self) -> Result<Cube> {
        let measure = self
            .measure_results
            .into_iter()
            .next()
            .ok_or_else(|| malformed("cube response has no measure results"))?;

        let dimensions = self
            .dimension_results
            .iter()
            .map(|dimension| {
                let labels = split_tab_record(&dimension.header_descriptions)?;
                if labels.is_empty() {
                    return Err(malformed(format!(
                        "dimension '{}' has no header descriptions",
                        dimension.id
                    )));
                }
                Ok(CubeDimension::new(dimension.id.clone(), labels))
            })
            .collect::<Result<Vec<_>>>()?;

        let last_len = match dimensions.last() {
            Some(dimension) => dimension.labels.len(),
            None => return Err(malformed("cube response has no dimension results")),
        };
        let leading: usize = dimensions[..dimensions.len() - 1]
            .iter()
            .map(|d| d.labels.len())
            .product();

        if measure.rows.len() != leading {
            return Err(malformed(format!(
                "measure '{}' has {} rows, expected {}",
                measure.id,
                measure.rows.len(),
                leading
            )));
        }

        let mut counts = Vec::with_capacity(leading * last_len);
        for (index, row) in measure.rows.iter().enumerate() {
            let fields = split_tab_record(row)?;
            if fields.len() != last_len {
                return Err(malformed(format!(
                    "measure row {} has {} values, expected {}",
                    index,
                    fields.len(),
                    last_len
                )));
            }
            for field in fields {
                let count = field.trim().parse::<i64>().map_err(|_| {
                    malformed(format!(
                        "non-numeric count '{}' in measure row {}",
                        field, index
                    ))
                })?;
                counts.push(count);
            }
        }

        debug!(
            dimensions = dimensions.len(),
            cells = counts.len(),
            measure = %measure.id,
            "converted cube response"
        );

        let cube = Cube::new(dimensions, counts, measure.id);
        cube.validate()?;
        Ok(cube)
    }
}

impl ExportResponse {
    /// Convert the raw rows into the internal contract
    ///
    /// `columns` is the ordered column-name list the export was requested
    /// with; every row must match its arity.
    pub fn into_rows(self, columns: Vec<String>) -> Result<ExportRows> {
        let rows = self
            .rows
            .iter()
            .map(|row| split_tab_record(&row.descriptions))
            .collect::<Result<Vec<_>>>()?;

        debug!(rows = rows.len(), columns = columns.len(), "converted export response");

        let export = ExportRows::new(columns, rows);
        export.validate()?;
        Ok(export)
    }
}

/// Parse a cube calculation JSON body into the internal contract
pub fn cube_from_json(payload: &str) -> Result<Cube> {
    serde_json::from_str::<CubeResponse>(payload)?.into_cube()
}

/// Parse an export JSON body into the internal contract
pub fn export_from_json(payload: &str, columns: Vec<String>) -> Result<ExportRows> {
    serde_json::from_str::<ExportResponse>(payload)?.into_rows(columns)
}

/// Split one tab-delimited payload line into its fields
///
/// Field values are kept verbatim, including the fixed-width padding the
/// backend puts on numeric fields.
fn split_tab_record(payload: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(payload.as_bytes());

    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}

fn malformed(reason: impl Into<String>) -> RouteframeError {
    RouteframeError::MalformedResponse {
        reason: reason.into(),
    }
}
