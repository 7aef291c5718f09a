//! Quantity checks: zero quantities and quantity vs. listed items

use super::{offending_records, CheckKind, CheckResult, Offense};
use crate::core::item_text::{self, ItemCount};
use crate::core::record::Table;

/// Rows with `Number = 0` should not be populated
pub fn check_number_not_zero(table: &Table) -> CheckResult {
    let offenses = offending_records(table, |r| r.number == Some(0));
    CheckResult::new(CheckKind::NumberZero, offenses)
}

/// The quantity must equal the number of items in the item text
///
/// Rows without item text are exempt. A blank or non-integral quantity never
/// matches a count.
pub fn check_number_matches_items(table: &Table) -> CheckResult {
    let offenses = table
        .records()
        .iter()
        .filter_map(|record| {
            let parsed = item_text::parse(record.item_text.as_deref());
            let count = parsed.count.as_count()?;
            let matches = record
                .number
                .is_some_and(|n| usize::try_from(n).is_ok_and(|n| n == count));
            (!matches).then(|| Offense::CountMismatch {
                record: record.clone(),
                item_count: ItemCount::Count(count),
            })
        })
        .collect();
    CheckResult::new(CheckKind::NumberMismatch, offenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::{record, table};

    #[test]
    fn test_number_zero_flagged() {
        let t = table(vec![
            record("A1", Some(0), Some("R1"), Some("M")),
            record("A2", Some(1), Some("R2"), Some("M")),
            record("A3", None, Some("R3"), Some("M")),
        ]);
        let result = check_number_not_zero(&t);
        assert_eq!(result.offenses.len(), 1);
        assert_eq!(result.offenses[0].subject_number(), "A1");
    }

    #[test]
    fn test_count_matches() {
        let t = table(vec![
            record("A1", Some(2), Some("TOP: X, Y"), Some("M")),
            record("A2", Some(1), Some("Z"), Some("M")),
            record("A3", Some(1), Some("Resistor"), Some("M")),
        ]);
        assert!(check_number_matches_items(&t).passed());
    }

    #[test]
    fn test_count_mismatch_carries_item_count() {
        let t = table(vec![record("A1", Some(3), Some("BS: R1, R2"), Some("M"))]);
        let result = check_number_matches_items(&t);
        assert_eq!(
            result.offenses,
            vec![Offense::CountMismatch {
                record: t.records()[0].clone(),
                item_count: ItemCount::Count(2),
            }]
        );
    }

    #[test]
    fn test_missing_item_text_exempt() {
        let t = table(vec![
            record("A1", Some(0), None, Some("M")),
            record("A2", Some(5), Some("  "), Some("M")),
            record("A3", None, None, Some("M")),
        ]);
        assert!(check_number_matches_items(&t).passed());
    }

    #[test]
    fn test_missing_number_with_items_is_mismatch() {
        let t = table(vec![record("A1", None, Some("R1"), Some("M"))]);
        assert_eq!(check_number_matches_items(&t).offenses.len(), 1);
    }

    #[test]
    fn test_label_only_requires_zero() {
        let t = table(vec![
            record("A1", Some(0), Some("TOP:"), Some("M")),
            record("A2", Some(1), Some("TOP:"), Some("M")),
        ]);
        let result = check_number_matches_items(&t);
        assert_eq!(result.offenses.len(), 1);
        assert_eq!(result.offenses[0].subject_number(), "A2");
    }

    #[test]
    fn test_negative_number_never_matches() {
        let t = table(vec![record("A1", Some(-1), Some("R1"), Some("M"))]);
        assert!(!check_number_matches_items(&t).passed());
    }
}
