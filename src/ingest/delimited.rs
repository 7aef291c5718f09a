//! CSV reader

use csv::ReaderBuilder;
use std::path::Path;

use super::IngestError;
use crate::core::record::Cell;

/// Read every CSV record as a row of text cells
///
/// Headers are not interpreted here; the title-row skip applies to CSV the
/// same way it does to workbooks.
pub(super) fn read_rows(path: &Path) -> Result<Vec<Vec<Cell>>, IngestError> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(rows)
}
