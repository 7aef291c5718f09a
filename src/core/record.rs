//! BOM records and the tables that hold them

use serde::Serialize;
use std::fmt;

/// A single cell value as handed over by ingestion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Render the cell as trimmed text, `None` when blank
    ///
    /// Integral numbers render without a fractional part so that a subject
    /// number stored as `1001.0` reads back as `1001`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Cell::Number(n) => Some(format_number(*n)),
        }
    }

    /// Interpret the cell as an integral quantity
    pub fn as_integer(&self) -> Option<i64> {
        let value = match self {
            Cell::Empty => return None,
            Cell::Number(n) => *n,
            Cell::Text(s) => {
                let trimmed = s.trim();
                if let Ok(n) = trimmed.parse::<i64>() {
                    return Some(n);
                }
                trimmed.parse::<f64>().ok()?
            }
        };

        if value.is_finite() && value.fract() == 0.0 {
            Some(value as i64)
        } else {
            None
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// A header row plus data rows, exactly as read from the source file
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    /// Data rows paired with their 1-based row number in the source sheet
    pub rows: Vec<(usize, Vec<Cell>)>,
}

/// The recognized BOM columns, in the fixed order they are reported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Column {
    Level,
    SubjectNumber,
    ManufacturerNumber,
    Number,
    ItemText,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Level,
        Column::SubjectNumber,
        Column::ManufacturerNumber,
        Column::Number,
        Column::ItemText,
    ];

    /// Header text as it appears in the source spreadsheet
    pub fn header(&self) -> &'static str {
        match self {
            Column::Level => "Level",
            Column::SubjectNumber => "Subject number",
            Column::ManufacturerNumber => "Manufacturer number",
            Column::Number => "Number",
            Column::ItemText => "Item text",
        }
    }

    /// Match a source header, ignoring case and surrounding whitespace
    pub fn from_header(header: &str) -> Option<Self> {
        let wanted = header.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.header().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One BOM line item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// 1-based row number in the source sheet
    pub row: usize,
    pub level: Option<String>,
    pub subject_number: String,
    pub manufacturer_number: Option<String>,
    pub number: Option<i64>,
    pub item_text: Option<String>,
}

impl Record {
    /// Value of a column rendered for display, `None` when absent
    pub fn value(&self, column: Column) -> Option<String> {
        match column {
            Column::Level => self.level.clone(),
            Column::SubjectNumber => Some(self.subject_number.clone()),
            Column::ManufacturerNumber => self.manufacturer_number.clone(),
            Column::Number => self.number.map(|n| n.to_string()),
            Column::ItemText => self.item_text.clone(),
        }
    }
}

/// The normalized, filtered set of records a check run operates on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
    records: Vec<Record>,
}

impl Table {
    pub fn new(columns: Vec<Column>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    /// Recognized columns present in the source, in reporting order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
