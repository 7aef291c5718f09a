//! Normalization of raw spreadsheet rows into BOM records

use miette::Diagnostic;
use std::collections::HashMap;
use thiserror::Error;

use crate::core::record::{Cell, Column, RawTable, Record, Table};

/// Columns the rule set reads. `Level` is informational only.
pub const CHECKED_COLUMNS: [Column; 4] = [
    Column::SubjectNumber,
    Column::ManufacturerNumber,
    Column::Number,
    Column::ItemText,
];

/// The source sheet does not carry the columns the checks need
#[derive(Debug, Error, Diagnostic)]
pub enum SchemaError {
    #[error("none of the required columns were found (headers: {found})")]
    #[diagnostic(
        code(bomcheck::schema::no_columns),
        help("check --skip-rows: the header row must contain Level, Subject number, Manufacturer number, Number, Item text")
    )]
    NoRequiredColumns { found: String },

    #[error("required column(s) missing: {}", format_columns(.missing))]
    #[diagnostic(code(bomcheck::schema::missing_columns))]
    MissingColumns { missing: Vec<Column> },
}

fn format_columns(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|c| c.header())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the working table from raw rows
///
/// Keeps the recognized columns, drops rows whose subject number has no
/// digit, and maps blank cells to `None`.
pub fn normalize(raw: &RawTable) -> Result<Table, SchemaError> {
    let header_map = build_header_map(&raw.headers);

    let columns: Vec<Column> = Column::ALL
        .into_iter()
        .filter(|c| header_map.contains_key(c))
        .collect();

    if columns.is_empty() {
        return Err(SchemaError::NoRequiredColumns {
            found: raw.headers.join(", "),
        });
    }

    let missing: Vec<Column> = CHECKED_COLUMNS
        .into_iter()
        .filter(|c| !header_map.contains_key(c))
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns { missing });
    }

    let mut records = Vec::with_capacity(raw.rows.len());
    let mut excluded = 0usize;

    for (row, cells) in &raw.rows {
        let cell = |column: Column| cell_at(cells, &header_map, column);

        let subject_number = match cell(Column::SubjectNumber).as_text() {
            Some(s) if has_digit(&s) => s,
            _ => {
                excluded += 1;
                continue;
            }
        };

        records.push(Record {
            row: *row,
            level: cell(Column::Level).as_text(),
            subject_number,
            manufacturer_number: cell(Column::ManufacturerNumber).as_text(),
            number: cell(Column::Number).as_integer(),
            item_text: cell(Column::ItemText).as_text(),
        });
    }

    tracing::debug!(
        kept = records.len(),
        excluded,
        dropped_columns = raw.headers.len().saturating_sub(columns.len()),
        "normalized table"
    );

    Ok(Table::new(columns, records))
}

/// Map each recognized column to its index in the header row; first match wins
fn build_header_map(headers: &[String]) -> HashMap<Column, usize> {
    let mut map = HashMap::new();
    for (i, header) in headers.iter().enumerate() {
        if let Some(column) = Column::from_header(header) {
            map.entry(column).or_insert(i);
        }
    }
    map
}

static EMPTY: Cell = Cell::Empty;

fn cell_at<'a>(cells: &'a [Cell], header_map: &HashMap<Column, usize>, column: Column) -> &'a Cell {
    header_map
        .get(&column)
        .and_then(|&idx| cells.get(idx))
        .unwrap_or(&EMPTY)
}

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}
