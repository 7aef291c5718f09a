//! Shared helper functions for CLI commands

use tabled::{builder::Builder, settings::Style};

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Keeps long item text cells from blowing up terminal tables.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// "1 row" / "3 rows"
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Render headers and rows as a markdown table
pub fn markdown_table<I, R>(headers: &[String], rows: I) -> String
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut builder = Builder::default();
    builder.push_record(headers.iter().cloned());
    for row in rows {
        builder.push_record(row);
    }
    builder.build().with(Style::markdown()).to_string()
}
