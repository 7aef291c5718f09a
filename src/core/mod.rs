//! Core module - BOM records, normalization and item text parsing

pub mod config;
pub mod item_text;
pub mod normalize;
pub mod record;

pub use config::Config;
pub use item_text::{parse, parse_unique, ItemCount, ParsedItemText};
pub use normalize::{normalize, SchemaError};
pub use record::{Cell, Column, RawTable, Record, Table};
