//! Export-to-frame normalization.
//!
//! Turns a flat row export into a frame with the requested column names.
//! Values are copied verbatim; coordinate fields stay as the formatted
//! strings the backend emitted unless a caller parses them downstream.

use crate::error::Result;
use crate::models::ExportRows;
use polars::prelude::*;
use tracing::debug;

/// Convert a row export into a tidy frame, preserving row order
pub fn export_to_frame(export: &ExportRows) -> Result<DataFrame> {
    export.validate()?;

    let columns: Vec<Column> = export
        .columns
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let values: Vec<String> = export.rows.iter().map(|row| row[index].clone()).collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();

    debug!(
        rows = export.rows.len(),
        columns = export.columns.len(),
        "normalized export"
    );

    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinates_export() -> ExportRows {
        ExportRows::new(
            vec!["Origin Dest".into(), "Lat".into(), "Long".into()],
            vec![
                vec!["MALAGA".into(), "   36.674900".into(), "   -4.499110".into()],
                vec!["FARO".into(), "   37.014400".into(), "   -7.965910".into()],
            ],
        )
    }

    #[test]
    fn test_columns_and_order_preserved() {
        let df = export_to_frame(&coordinates_export()).unwrap();
        assert_eq!(df.shape(), (2, 3));

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, ["Origin Dest", "Lat", "Long"]);

        let dests: Vec<&str> = df.column("Origin Dest").unwrap().str().unwrap().into_iter().flatten().collect();
        assert_eq!(dests, ["MALAGA", "FARO"]);
    }

    #[test]
    fn test_values_copied_verbatim() {
        // Coordinate fields keep the backend's fixed-width padding
        let df = export_to_frame(&coordinates_export()).unwrap();
        let lat = df.column("Lat").unwrap().str().unwrap().get(0).unwrap();
        assert_eq!(lat, "   36.674900");
    }

    #[test]
    fn test_empty_export() {
        let export = ExportRows::new(vec!["Origin Dest".into()], vec![]);
        let df = export_to_frame(&export).unwrap();
        assert_eq!(df.shape(), (0, 1));
    }

    #[test]
    fn test_arity_mismatch_is_fatal() {
        let export = ExportRows::new(
            vec!["Origin Dest".into(), "Lat".into()],
            vec![vec!["MALAGA".into()]],
        );
        assert!(export_to_frame(&export).is_err());
    }
}
