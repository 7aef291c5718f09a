//! Workbook export of a [`Report`]
//!
//! The workbook is assembled in memory and only then written to disk, via a
//! sibling temporary file renamed into place. A failure while building any
//! sheet leaves nothing at the target path.

use miette::Diagnostic;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{Report, ReportCell, Section};

/// Failure while exporting the report workbook
#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    #[error("failed to build sheet '{sheet}': {source}")]
    #[diagnostic(code(bomcheck::report::sheet))]
    Sheet {
        sheet: String,
        #[source]
        source: XlsxError,
    },

    #[error("failed to serialize workbook: {0}")]
    #[diagnostic(code(bomcheck::report::xlsx))]
    Xlsx(#[from] XlsxError),

    #[error("failed to write {}: {source}", path.display())]
    #[diagnostic(code(bomcheck::report::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Serialize the report into `.xlsx` bytes, one sheet per section
pub fn to_bytes(report: &Report) -> Result<Vec<u8>, ReportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for section in &report.sections {
        let worksheet = workbook.add_worksheet();
        write_section(worksheet, section, &header_format).map_err(|source| {
            ReportError::Sheet {
                sheet: section.name.clone(),
                source,
            }
        })?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Write the report workbook to `path`
pub fn save(report: &Report, path: &Path) -> Result<(), ReportError> {
    let bytes = to_bytes(report)?;
    let tmp = temp_path(path);

    let written = fs::write(&tmp, &bytes).and_then(|_| fs::rename(&tmp, path));
    if let Err(source) = written {
        let _ = fs::remove_file(&tmp);
        return Err(ReportError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    tracing::debug!(path = %path.display(), sheets = report.sections.len(), bytes = bytes.len(), "report saved");
    Ok(())
}

fn write_section(
    worksheet: &mut Worksheet,
    section: &Section,
    header_format: &Format,
) -> Result<(), XlsxError> {
    worksheet.set_name(&section.name)?;

    for (col, header) in section.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, header_format)?;
    }

    for (r, row) in section.rows.iter().enumerate() {
        let row_num = (r + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col_num = col as u16;
            match cell {
                ReportCell::Empty => {}
                ReportCell::Text(s) => {
                    worksheet.write_string(row_num, col_num, s)?;
                }
                ReportCell::Number(n) => {
                    worksheet.write_number(row_num, col_num, *n)?;
                }
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofit();
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "report.xlsx".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{Column, Record, Table};
    use crate::report::check_table;
    use calamine::{open_workbook_auto, Reader};
    use tempfile::tempdir;

    fn failing_table() -> Table {
        let record = |row: usize, subject: &str, number: i64| Record {
            row,
            level: None,
            subject_number: subject.to_string(),
            manufacturer_number: None,
            number: Some(number),
            item_text: Some("R1".to_string()),
        };
        Table::new(
            Column::ALL.to_vec(),
            vec![record(8, "A1", 1), record(9, "A1", 0)],
        )
    }

    #[test]
    fn test_save_writes_all_sheets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.xlsx");
        let report = check_table(&failing_table());

        save(&report, &path).unwrap();

        let workbook = open_workbook_auto(&path).unwrap();
        assert_eq!(
            workbook.sheet_names(),
            report
                .sheet_names()
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
        assert!(!dir.path().join("results.xlsx.tmp").exists());
    }

    #[test]
    fn test_summary_sheet_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.xlsx");
        save(&check_table(&failing_table()), &path).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let range = workbook.worksheet_range("Summary").unwrap();
        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        assert_eq!(rows[0], vec!["Check", "Result"]);
        assert_eq!(rows[1], vec!["Unique Subject Numbers", "No"]);
        assert_eq!(rows.len(), 6);
    }

    #[test]
    fn test_save_into_missing_directory_fails_cleanly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing/results.xlsx");
        let err = save(&check_table(&failing_table()), &path).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let tmp = temp_path(Path::new("/out/bom.xlsx"));
        assert_eq!(tmp, PathBuf::from("/out/bom.xlsx.tmp"));
    }
}
