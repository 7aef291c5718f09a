//! Aggregation of check results into a reviewable report
//!
//! A [`Report`] is a summary of every check plus one tabular section per
//! failing check. Sections map one-to-one onto sheets of the exported
//! workbook (see [`xlsx`]).

pub mod xlsx;

use serde::Serialize;

use crate::checks::{CheckKind, CheckResult, Offense};
use crate::core::record::{Column, Record, Table};

/// Sheet name of the summary section
pub const SUMMARY_SHEET: &str = "Summary";

/// Sheet name of the optional full-data section
pub const DATA_SHEET: &str = "Data";

/// Failing-check sheets, in workbook order
pub const SECTION_ORDER: [CheckKind; 5] = [
    CheckKind::UniqueSubjects,
    CheckKind::MissingManufacturer,
    CheckKind::NumberZero,
    CheckKind::NumberMismatch,
    CheckKind::DuplicateItems,
];

/// A report cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportCell {
    Empty,
    Text(String),
    Number(f64),
}

impl ReportCell {
    /// Plain-text rendering for terminal tables
    pub fn display(&self) -> String {
        match self {
            ReportCell::Empty => String::new(),
            ReportCell::Text(s) => s.clone(),
            ReportCell::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            ReportCell::Number(n) => n.to_string(),
        }
    }
}

impl From<Option<String>> for ReportCell {
    fn from(value: Option<String>) -> Self {
        value.map_or(ReportCell::Empty, ReportCell::Text)
    }
}

/// One line of the summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub check: String,
    pub passed: bool,
}

impl SummaryRow {
    /// Two-valued result label
    pub fn label(&self) -> &'static str {
        if self.passed {
            "Yes"
        } else {
            "No"
        }
    }
}

/// A named table in the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<ReportCell>>,
}

/// The complete result of one check run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub summary: Vec<SummaryRow>,
    pub sections: Vec<Section>,
}

impl Report {
    pub fn all_passed(&self) -> bool {
        self.summary.iter().all(|row| row.passed)
    }

    pub fn failed_count(&self) -> usize {
        self.summary.iter().filter(|row| !row.passed).count()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Names of all sections, in order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.name.as_str()).collect()
    }

    /// Append the full normalized table as a trailing section
    pub fn with_data(mut self, table: &Table) -> Self {
        self.sections.push(data_section(table));
        self
    }
}

/// The normalized table as a report section
pub fn data_section(table: &Table) -> Section {
    Section {
        name: DATA_SHEET.to_string(),
        headers: record_headers(table.columns()),
        rows: table
            .records()
            .iter()
            .map(|r| record_cells(r, table.columns()))
            .collect(),
    }
}

/// Combine check results into a report
///
/// `columns` are the recognized columns of the checked table and become the
/// headers of record sections. Passing checks get no section.
pub fn aggregate(results: &[CheckResult], columns: &[Column]) -> Report {
    let summary: Vec<SummaryRow> = results
        .iter()
        .map(|r| SummaryRow {
            check: r.kind.name().to_string(),
            passed: r.passed(),
        })
        .collect();

    let mut sections = vec![Section {
        name: SUMMARY_SHEET.to_string(),
        headers: vec!["Check".to_string(), "Result".to_string()],
        rows: summary
            .iter()
            .map(|row| {
                vec![
                    ReportCell::Text(row.check.clone()),
                    ReportCell::Text(row.label().to_string()),
                ]
            })
            .collect(),
    }];

    for kind in SECTION_ORDER {
        let Some(result) = results.iter().find(|r| r.kind == kind) else {
            continue;
        };
        if result.passed() {
            continue;
        }
        sections.push(offense_section(result, columns));
    }

    Report { summary, sections }
}

/// Check a table and build its report in one step
#[cfg(test)]
pub(crate) fn check_table(table: &Table) -> Report {
    let results = crate::checks::run_all(table);
    aggregate(&results, table.columns())
}

fn offense_section(result: &CheckResult, columns: &[Column]) -> Section {
    let mut headers = match result.kind {
        CheckKind::DuplicateItems => vec!["Item".to_string(), Column::SubjectNumber.to_string()],
        _ => record_headers(columns),
    };
    if result.kind == CheckKind::NumberMismatch {
        headers.push("Item count".to_string());
    }

    let rows = result
        .offenses
        .iter()
        .map(|offense| match offense {
            Offense::Record(record) => record_cells(record, columns),
            Offense::CountMismatch { record, item_count } => {
                let mut cells = record_cells(record, columns);
                cells.push(match item_count.as_count() {
                    Some(n) => ReportCell::Number(n as f64),
                    None => ReportCell::Empty,
                });
                cells
            }
            Offense::DuplicateItem {
                item,
                subject_number,
            } => vec![
                ReportCell::Text(item.clone()),
                ReportCell::Text(subject_number.clone()),
            ],
        })
        .collect();

    Section {
        name: result.kind.sheet_name().to_string(),
        headers,
        rows,
    }
}

fn record_headers(columns: &[Column]) -> Vec<String> {
    std::iter::once("Row".to_string())
        .chain(columns.iter().map(|c| c.to_string()))
        .collect()
}

fn record_cells(record: &Record, columns: &[Column]) -> Vec<ReportCell> {
    std::iter::once(ReportCell::Number(record.row as f64))
        .chain(columns.iter().map(|&column| match column {
            Column::Number => record
                .number
                .map_or(ReportCell::Empty, |n| ReportCell::Number(n as f64)),
            _ => ReportCell::from(record.value(column)),
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::run_all;
    use crate::core::record::Record;

    fn record(row: usize, subject: &str, number: Option<i64>, items: Option<&str>, mfr: Option<&str>) -> Record {
        Record {
            row,
            level: Some("1".to_string()),
            subject_number: subject.to_string(),
            manufacturer_number: mfr.map(str::to_string),
            number,
            item_text: items.map(str::to_string),
        }
    }

    fn scenario() -> Table {
        Table::new(
            Column::ALL.to_vec(),
            vec![
                record(8, "A1", Some(2), Some("TOP: X, Y"), Some("M1")),
                record(9, "A1", Some(1), Some("Z"), Some("")),
            ],
        )
    }

    #[test]
    fn test_summary_matches_results() {
        let table = scenario();
        let results = run_all(&table);
        let report = aggregate(&results, table.columns());

        assert_eq!(report.summary.len(), results.len());
        for (row, result) in report.summary.iter().zip(&results) {
            assert_eq!(row.check, result.kind.name());
            assert_eq!(row.passed, result.offenses.is_empty());
        }
    }

    #[test]
    fn test_scenario_sections() {
        let report = check_table(&scenario());

        assert_eq!(
            report.sheet_names(),
            vec!["Summary", "Duplicate Subjects", "Missing Manufacturer"]
        );
        let labels: Vec<&str> = report.summary.iter().map(SummaryRow::label).collect();
        assert_eq!(labels, vec!["No", "Yes", "Yes", "Yes", "No"]);
        assert_eq!(report.failed_count(), 2);
        assert!(!report.all_passed());

        let dup = report.section("Duplicate Subjects").unwrap();
        assert_eq!(
            dup.headers,
            vec!["Row", "Level", "Subject number", "Manufacturer number", "Number", "Item text"]
        );
        assert_eq!(dup.rows.len(), 2);
        assert_eq!(dup.rows[1][0], ReportCell::Number(9.0));
    }

    #[test]
    fn test_summary_snapshot() {
        let report = check_table(&scenario());
        insta::assert_yaml_snapshot!(report.summary, @r"
        - check: Unique Subject Numbers
          passed: false
        - check: Number Equals Zero
          passed: true
        - check: Number Matches Item Count
          passed: true
        - check: Unique Items Across Dataset
          passed: true
        - check: Manufacturer Number Present
          passed: false
        ");
    }

    #[test]
    fn test_summary_section_headers() {
        let report = check_table(&scenario());
        let summary = report.section(SUMMARY_SHEET).unwrap();
        assert_eq!(summary.headers, vec!["Check", "Result"]);
        assert_eq!(
            summary.rows[0],
            vec![
                ReportCell::Text("Unique Subject Numbers".to_string()),
                ReportCell::Text("No".to_string())
            ]
        );
    }

    #[test]
    fn test_mismatch_section_has_item_count() {
        let table = Table::new(
            Column::ALL.to_vec(),
            vec![record(8, "A1", Some(3), Some("R1, R2"), Some("M"))],
        );
        let report = check_table(&table);
        let section = report.section("Number Mismatches").unwrap();
        assert_eq!(section.headers.last().map(String::as_str), Some("Item count"));
        assert_eq!(section.rows[0].last(), Some(&ReportCell::Number(2.0)));
    }

    #[test]
    fn test_duplicate_items_section() {
        let table = Table::new(
            Column::ALL.to_vec(),
            vec![
                record(8, "A1", Some(1), Some("SCREW"), Some("M")),
                record(9, "A2", Some(1), Some("screw"), Some("M")),
            ],
        );
        let report = check_table(&table);
        let section = report.section("Duplicate Items").unwrap();
        assert_eq!(section.headers, vec!["Item", "Subject number"]);
        assert_eq!(section.rows.len(), 2);
        assert_eq!(section.rows[1][1], ReportCell::Text("A2".to_string()));
    }

    #[test]
    fn test_sheet_order_when_all_fail() {
        let table = Table::new(
            Column::ALL.to_vec(),
            vec![
                record(8, "A1", Some(0), Some("R1"), None),
                record(9, "A1", Some(1), Some("R1"), None),
            ],
        );
        let report = check_table(&table);
        assert_eq!(
            report.sheet_names(),
            vec![
                "Summary",
                "Duplicate Subjects",
                "Missing Manufacturer",
                "Number Zero Cases",
                "Number Mismatches",
                "Duplicate Items"
            ]
        );
    }

    #[test]
    fn test_all_pass_only_summary() {
        let table = Table::new(
            Column::ALL.to_vec(),
            vec![record(8, "A1", Some(1), Some("R1"), Some("M"))],
        );
        let report = check_table(&table);
        assert!(report.all_passed());
        assert_eq!(report.sheet_names(), vec!["Summary"]);
    }

    #[test]
    fn test_with_data_appends_last() {
        let table = scenario();
        let report = check_table(&table).with_data(&table);
        let data = report.sections.last().unwrap();
        assert_eq!(data.name, DATA_SHEET);
        assert_eq!(data.rows.len(), 2);
    }

    #[test]
    fn test_report_is_idempotent() {
        let table = scenario();
        assert_eq!(check_table(&table), check_table(&table));
    }
}
