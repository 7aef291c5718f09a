//! Subject number uniqueness

use std::collections::HashMap;

use super::{offending_records, CheckKind, CheckResult};
use crate::core::record::Table;

/// Every row sharing its subject number with another row is an offense
pub fn check_unique_subjects(table: &Table) -> CheckResult {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in table.records() {
        *counts.entry(record.subject_number.as_str()).or_default() += 1;
    }

    let offenses = offending_records(table, |r| {
        counts.get(r.subject_number.as_str()).copied().unwrap_or(0) > 1
    });
    CheckResult::new(CheckKind::UniqueSubjects, offenses)
}
