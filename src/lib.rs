//! BOM Check
//!
//! Validates Bill-of-Materials spreadsheets against a fixed set of data
//! quality rules and produces a summary plus a multi-sheet review report.

pub mod checks;
pub mod cli;
pub mod core;
pub mod ingest;
pub mod report;
