//! Item text parsing
//!
//! Item text lists the constituent items of a BOM line, e.g. reference
//! designators, optionally behind a category label:
//!
//! ```text
//! item-text := [label] item ("," item)*
//! label     := letter+ ws* ":" ws*
//! ```
//!
//! Two parses exist. The counting parse feeds the quantity check: it strips
//! only the leading label, splits on commas and preserves case. The
//! uniqueness parse feeds the duplicate-item check: it strips every
//! upper-case label, also splits on semicolons and newlines, and upper-cases
//! each token.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Number of items listed in an item text cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCount {
    /// No item text; the row is exempt from count matching
    NotApplicable,
    Count(usize),
}

impl ItemCount {
    pub fn as_count(&self) -> Option<usize> {
        match self {
            ItemCount::NotApplicable => None,
            ItemCount::Count(n) => Some(*n),
        }
    }
}

impl fmt::Display for ItemCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemCount::NotApplicable => f.write_str("n/a"),
            ItemCount::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Result of the counting parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedItemText {
    pub count: ItemCount,
    pub items: Vec<String>,
}

fn leading_label() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z]+\s*:\s*").expect("valid label regex"))
}

/// Upper-case labels only; a lower-case `note:` stays part of its token
fn any_label() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[A-Z]+\s*:\s*").expect("valid label regex"))
}

fn unique_delimiters() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[,;\n]+").expect("valid delimiter regex"))
}

/// Counting parse of an item text cell
///
/// A bare descriptive label (letters and whitespace only) counts as one item.
/// Text that is nothing but a label (`"TOP:"`) counts as zero items.
pub fn parse(text: Option<&str>) -> ParsedItemText {
    let text = match text.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => {
            return ParsedItemText {
                count: ItemCount::NotApplicable,
                items: Vec::new(),
            }
        }
    };

    if is_descriptive(text) {
        return ParsedItemText {
            count: ItemCount::Count(1),
            items: vec![text.to_string()],
        };
    }

    let body = leading_label().replace(text, "");
    let items: Vec<String> = body
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    ParsedItemText {
        count: ItemCount::Count(items.len()),
        items,
    }
}

/// Uniqueness parse of an item text cell: upper-cased tokens in order
pub fn parse_unique(text: Option<&str>) -> Vec<String> {
    let text = match text.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Vec::new(),
    };

    let body = any_label().replace_all(text, "");
    unique_delimiters()
        .split(&body)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase)
        .collect()
}

fn is_descriptive(text: &str) -> bool {
    text.chars().all(|c| c.is_alphabetic() || c.is_whitespace())
}
