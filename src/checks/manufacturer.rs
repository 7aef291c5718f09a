use super::{offending_records, CheckKind, CheckResult};
use crate::core::record::Table;

/// Every row needs a manufacturer number
pub fn check_manufacturer_present(table: &Table) -> CheckResult {
    let offenses = offending_records(table, |r| {
        r.manufacturer_number
            .as_deref()
            .is_none_or(|m| m.trim().is_empty())
    });
    CheckResult::new(CheckKind::MissingManufacturer, offenses)
}
