//! Loading BOM spreadsheets into raw tables
//!
//! BOM exports carry a block of title rows above the header row; the first
//! `skip_rows` rows of the sheet are discarded and the next row is taken as
//! the header. Entirely blank rows are dropped.

mod delimited;
mod excel;

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::record::{Cell, RawTable};

/// Leading non-data rows in a standard BOM export
pub const DEFAULT_SKIP_ROWS: usize = 6;

/// How to read the source file
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub skip_rows: usize,
    /// Sheet to read; the first sheet when `None`
    pub sheet: Option<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            skip_rows: DEFAULT_SKIP_ROWS,
            sheet: None,
        }
    }
}

/// Supported source formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// xlsx, xlsm, xls, xlsb, ods
    Workbook,
    Csv,
}

impl SourceFormat {
    /// Pick the reader from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Some(SourceFormat::Workbook),
            "csv" => Some(SourceFormat::Csv),
            _ => None,
        }
    }
}

/// The source file could not be read as a BOM table
#[derive(Debug, Error, Diagnostic)]
pub enum IngestError {
    #[error("file not found: {}", .0.display())]
    #[diagnostic(code(bomcheck::ingest::not_found))]
    NotFound(PathBuf),

    #[error("unsupported file type: {}", .0.display())]
    #[diagnostic(
        code(bomcheck::ingest::unsupported),
        help("supported formats: .xlsx, .xlsm, .xls, .xlsb, .ods, .csv")
    )]
    UnsupportedFormat(PathBuf),

    #[error("failed to open workbook {}: {message}", path.display())]
    #[diagnostic(code(bomcheck::ingest::open))]
    Open { path: PathBuf, message: String },

    #[error("workbook {} contains no sheets", .0.display())]
    #[diagnostic(code(bomcheck::ingest::no_sheets))]
    NoSheets(PathBuf),

    #[error("sheet '{sheet}' not found (available: {available})")]
    #[diagnostic(code(bomcheck::ingest::sheet_not_found))]
    SheetNotFound { sheet: String, available: String },

    #[error("failed to read sheet '{sheet}': {message}")]
    #[diagnostic(code(bomcheck::ingest::sheet))]
    Sheet { sheet: String, message: String },

    #[error("failed to read CSV {}: {source}", path.display())]
    #[diagnostic(code(bomcheck::ingest::csv))]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("no header row found after skipping {skip_rows} row(s)")]
    #[diagnostic(
        code(bomcheck::ingest::missing_header),
        help("adjust --skip-rows to the number of title rows above the header")
    )]
    MissingHeader { skip_rows: usize },
}

/// Read a BOM file into a raw table
pub fn load(path: &Path, options: &LoadOptions) -> Result<RawTable, IngestError> {
    if !path.exists() {
        return Err(IngestError::NotFound(path.to_path_buf()));
    }

    let format = SourceFormat::from_path(path)
        .ok_or_else(|| IngestError::UnsupportedFormat(path.to_path_buf()))?;

    let rows = match format {
        SourceFormat::Workbook => excel::read_rows(path, options.sheet.as_deref())?,
        SourceFormat::Csv => delimited::read_rows(path)?,
    };

    let table = split_header(rows, options.skip_rows)?;
    tracing::debug!(
        path = %path.display(),
        ?format,
        columns = table.headers.len(),
        rows = table.rows.len(),
        "loaded source table"
    );
    Ok(table)
}

/// Skip title rows, take the header, keep non-blank data rows
///
/// `rows` are indexed from the top of the sheet (row 1 is index 0).
fn split_header(rows: Vec<Vec<Cell>>, skip_rows: usize) -> Result<RawTable, IngestError> {
    let mut iter = rows.into_iter().enumerate().skip(skip_rows);

    let (_, header) = iter
        .next()
        .ok_or(IngestError::MissingHeader { skip_rows })?;
    let headers = header
        .iter()
        .map(|c| c.as_text().unwrap_or_default())
        .collect();

    let rows = iter
        .filter(|(_, cells)| !cells.iter().all(Cell::is_empty))
        .map(|(idx, cells)| (idx + 1, cells))
        .collect();

    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_row(cells: &[&str]) -> Vec<Cell> {
        cells
            .iter()
            .map(|s| if s.is_empty() { Cell::Empty } else { Cell::from(*s) })
            .collect()
    }

    #[test]
    fn test_source_format_from_path() {
        assert_eq!(SourceFormat::from_path(Path::new("bom.XLSX")), Some(SourceFormat::Workbook));
        assert_eq!(SourceFormat::from_path(Path::new("bom.xls")), Some(SourceFormat::Workbook));
        assert_eq!(SourceFormat::from_path(Path::new("bom.csv")), Some(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_path(Path::new("bom.txt")), None);
        assert_eq!(SourceFormat::from_path(Path::new("bom")), None);
    }

    #[test]
    fn test_split_header_skips_title_rows() {
        let rows = vec![
            text_row(&["BOM export"]),
            text_row(&[""]),
            text_row(&["Subject number", "Number"]),
            text_row(&["A1", "2"]),
            text_row(&["", ""]),
            text_row(&["A2", "1"]),
        ];

        let table = split_header(rows, 2).unwrap();
        assert_eq!(table.headers, vec!["Subject number", "Number"]);
        let row_numbers: Vec<usize> = table.rows.iter().map(|(n, _)| *n).collect();
        assert_eq!(row_numbers, vec![4, 6]);
    }

    #[test]
    fn test_split_header_missing() {
        let rows = vec![text_row(&["title"])];
        assert!(matches!(
            split_header(rows, 6),
            Err(IngestError::MissingHeader { skip_rows: 6 })
        ));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.txt");
        std::fs::write(&path, "x").unwrap();
        assert!(matches!(
            load(&path, &LoadOptions::default()),
            Err(IngestError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load(Path::new("/nonexistent/bom.xlsx"), &LoadOptions::default()),
            Err(IngestError::NotFound(_))
        ));
    }
}
