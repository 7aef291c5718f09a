//! Workbook reader (xlsx, xlsm, xls, xlsb, ods)

use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

use super::IngestError;
use crate::core::record::Cell;

/// Read every row of one sheet, indexed from the top of the sheet
///
/// calamine trims leading empty rows and columns from a range; they are
/// padded back so row indices match what the user sees in the spreadsheet.
pub(super) fn read_rows(path: &Path, sheet: Option<&str>) -> Result<Vec<Vec<Cell>>, IngestError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|s| s.as_str() == name)
            .cloned()
            .ok_or_else(|| IngestError::SheetNotFound {
                sheet: name.to_string(),
                available: sheet_names.join(", "),
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| IngestError::NoSheets(path.to_path_buf()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::Sheet {
            sheet: sheet_name.clone(),
            message: e.to_string(),
        })?;

    let (start_row, start_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row];
    for source_row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col];
        cells.extend(source_row.iter().map(to_cell));
        rows.push(cells);
    }

    tracing::debug!(sheet = %sheet_name, rows = rows.len(), "read worksheet");
    Ok(rows)
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
