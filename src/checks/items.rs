//! Item uniqueness across the whole BOM

use std::collections::HashMap;

use super::{CheckKind, CheckResult, Offense};
use crate::core::item_text;
use crate::core::record::Table;

/// An item token may be listed only once across the dataset
///
/// Every occurrence counts, so a token repeated inside one cell is a
/// duplicate too. Offenses are one `(item, subject)` pair per occurrence of
/// a duplicated token, tokens in first-seen order.
pub fn check_unique_items(table: &Table) -> CheckResult {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut occurrences: Vec<(String, Vec<&str>)> = Vec::new();

    for record in table.records() {
        for token in item_text::parse_unique(record.item_text.as_deref()) {
            let slot = match index.get(&token) {
                Some(&slot) => slot,
                None => {
                    index.insert(token.clone(), occurrences.len());
                    occurrences.push((token, Vec::new()));
                    occurrences.len() - 1
                }
            };
            occurrences[slot].1.push(&record.subject_number);
        }
    }

    let offenses = occurrences
        .into_iter()
        .filter(|(_, subjects)| subjects.len() > 1)
        .flat_map(|(item, subjects)| {
            subjects.into_iter().map(move |subject| Offense::DuplicateItem {
                item: item.clone(),
                subject_number: subject.to_string(),
            })
        })
        .collect();

    CheckResult::new(CheckKind::DuplicateItems, offenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::{record, table};

    fn pairs(result: &CheckResult) -> Vec<(String, String)> {
        result
            .offenses
            .iter()
            .map(|o| match o {
                Offense::DuplicateItem { item, subject_number } => {
                    (item.clone(), subject_number.clone())
                }
                other => panic!("unexpected offense: {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_distinct_items_pass() {
        let t = table(vec![
            record("A1", Some(2), Some("TOP: X, Y"), Some("M")),
            record("A2", Some(1), Some("Z"), Some("M")),
        ]);
        assert!(check_unique_items(&t).passed());
    }

    #[test]
    fn test_shared_token_across_subjects() {
        let t = table(vec![
            record("A1", Some(2), Some("Screw, Washer"), Some("M")),
            record("A2", Some(1), Some("BS: screw"), Some("M")),
        ]);
        let result = check_unique_items(&t);
        assert!(!result.passed());
        assert_eq!(
            pairs(&result),
            vec![
                ("SCREW".to_string(), "A1".to_string()),
                ("SCREW".to_string(), "A2".to_string()),
            ]
        );
    }

    #[test]
    fn test_token_order_is_first_seen() {
        let t = table(vec![
            record("A1", Some(2), Some("R2, R1"), Some("M")),
            record("A2", Some(1), Some("R1"), Some("M")),
            record("A3", Some(1), Some("R2"), Some("M")),
        ]);
        assert_eq!(
            pairs(&check_unique_items(&t)),
            vec![
                ("R2".to_string(), "A1".to_string()),
                ("R2".to_string(), "A3".to_string()),
                ("R1".to_string(), "A1".to_string()),
                ("R1".to_string(), "A2".to_string()),
            ]
        );
    }

    #[test]
    fn test_repeat_within_one_cell() {
        let t = table(vec![record("A1", Some(2), Some("R1; R1"), Some("M"))]);
        assert_eq!(check_unique_items(&t).offenses.len(), 2);
    }

    #[test]
    fn test_labels_stripped_everywhere() {
        let t = table(vec![
            record("A1", Some(2), Some("TOP: C1, BOT: C2"), Some("M")),
            record("A2", Some(1), Some("C2"), Some("M")),
        ]);
        assert_eq!(
            pairs(&check_unique_items(&t)),
            vec![
                ("C2".to_string(), "A1".to_string()),
                ("C2".to_string(), "A2".to_string()),
            ]
        );
    }
}
