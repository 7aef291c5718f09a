//! BOM check rules
//!
//! Each rule is a pure function over the normalized [`Table`] returning a
//! [`CheckResult`]. Rules never fail: missing or malformed cell data is
//! either exempt or an offense, depending on the rule.

mod items;
mod manufacturer;
mod quantity;
mod subjects;

use serde::Serialize;
use std::fmt;

use crate::core::item_text::ItemCount;
use crate::core::record::{Record, Table};

pub use items::check_unique_items;
pub use manufacturer::check_manufacturer_present;
pub use quantity::{check_number_matches_items, check_number_not_zero};
pub use subjects::check_unique_subjects;

/// The fixed set of checks, in summary order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    UniqueSubjects,
    NumberZero,
    NumberMismatch,
    DuplicateItems,
    MissingManufacturer,
}

/// How a failing check is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl CheckKind {
    pub const ALL: [CheckKind; 5] = [
        CheckKind::UniqueSubjects,
        CheckKind::NumberZero,
        CheckKind::NumberMismatch,
        CheckKind::DuplicateItems,
        CheckKind::MissingManufacturer,
    ];

    /// Name shown in the summary
    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::UniqueSubjects => "Unique Subject Numbers",
            CheckKind::NumberZero => "Number Equals Zero",
            CheckKind::NumberMismatch => "Number Matches Item Count",
            CheckKind::DuplicateItems => "Unique Items Across Dataset",
            CheckKind::MissingManufacturer => "Manufacturer Number Present",
        }
    }

    /// Report sheet holding this check's offenses
    pub fn sheet_name(&self) -> &'static str {
        match self {
            CheckKind::UniqueSubjects => "Duplicate Subjects",
            CheckKind::NumberZero => "Number Zero Cases",
            CheckKind::NumberMismatch => "Number Mismatches",
            CheckKind::DuplicateItems => "Duplicate Items",
            CheckKind::MissingManufacturer => "Missing Manufacturer",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            CheckKind::NumberZero => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// One-line description used for terminal output
    pub fn failure_message(&self) -> &'static str {
        match self {
            CheckKind::UniqueSubjects => "Duplicate subject numbers found",
            CheckKind::NumberZero => "Do not populate (Number = 0)",
            CheckKind::NumberMismatch => "Number does not match item count",
            CheckKind::DuplicateItems => "Duplicate items found in item text",
            CheckKind::MissingManufacturer => "Manufacturer number missing",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            CheckKind::UniqueSubjects => "All subject numbers are unique",
            CheckKind::NumberZero => "No Number = 0 cases",
            CheckKind::NumberMismatch => "Number matches item count for all rows",
            CheckKind::DuplicateItems => "All items in item text are unique",
            CheckKind::MissingManufacturer => "All rows have a manufacturer number",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single violation found by a check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Offense {
    /// A record violating the rule as-is
    Record(Record),
    /// A record whose quantity disagrees with the items listed
    CountMismatch { record: Record, item_count: ItemCount },
    /// An item token listed under a subject, where the token occurs more than once
    DuplicateItem { item: String, subject_number: String },
}

impl Offense {
    pub fn record(&self) -> Option<&Record> {
        match self {
            Offense::Record(record) | Offense::CountMismatch { record, .. } => Some(record),
            Offense::DuplicateItem { .. } => None,
        }
    }

    /// Subject number this offense belongs to
    #[cfg(test)]
    pub(crate) fn subject_number(&self) -> &str {
        match self {
            Offense::Record(record) | Offense::CountMismatch { record, .. } => {
                &record.subject_number
            }
            Offense::DuplicateItem { subject_number, .. } => subject_number,
        }
    }
}

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub kind: CheckKind,
    pub offenses: Vec<Offense>,
}

impl CheckResult {
    pub fn new(kind: CheckKind, offenses: Vec<Offense>) -> Self {
        tracing::debug!(check = kind.name(), offenses = offenses.len(), "check finished");
        Self { kind, offenses }
    }

    pub fn passed(&self) -> bool {
        self.offenses.is_empty()
    }
}

/// Run every check against the table, in summary order
pub fn run_all(table: &Table) -> Vec<CheckResult> {
    CheckKind::ALL
        .into_iter()
        .map(|kind| run(kind, table))
        .collect()
}

/// Run a single check
pub fn run(kind: CheckKind, table: &Table) -> CheckResult {
    match kind {
        CheckKind::UniqueSubjects => check_unique_subjects(table),
        CheckKind::NumberZero => check_number_not_zero(table),
        CheckKind::NumberMismatch => check_number_matches_items(table),
        CheckKind::DuplicateItems => check_unique_items(table),
        CheckKind::MissingManufacturer => check_manufacturer_present(table),
    }
}

/// Offenses for every record matching a predicate, in table order
pub(crate) fn offending_records<F>(table: &Table, predicate: F) -> Vec<Offense>
where
    F: Fn(&Record) -> bool,
{
    table
        .records()
        .iter()
        .filter(|r| predicate(r))
        .cloned()
        .map(Offense::Record)
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::record::{Column, Record, Table};

    pub fn record(subject: &str, number: Option<i64>, item_text: Option<&str>, mfr: Option<&str>) -> Record {
        Record {
            row: 0,
            level: None,
            subject_number: subject.to_string(),
            manufacturer_number: mfr.map(str::to_string),
            number,
            item_text: item_text.map(str::to_string),
        }
    }

    pub fn table(records: Vec<Record>) -> Table {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(i, mut r)| {
                r.row = i + 8;
                r
            })
            .collect();
        Table::new(Column::ALL.to_vec(), records)
    }
}
