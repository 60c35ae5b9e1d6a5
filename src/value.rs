//! Cell values - dynamically typed SQLite results
//!
//! SQLite columns carry no fixed type, so every cell read from an ad-hoc
//! query is one of five storage classes.

use rusqlite::types::ValueRef;
use serde::{Serialize, Serializer};
use std::fmt;

/// A single result cell, tagged by SQLite storage class.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Render the cell as a SQL literal, e.g. `'it''s'` or `X'00ff'`
    pub fn to_literal(&self) -> String {
        match self {
            CellValue::Null => "NULL".to_string(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Real(r) => format_real(*r),
            CellValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
            CellValue::Blob(b) => format!("X'{}'", hex(b)),
        }
    }

    /// Plain rendering without quoting, for table cells
    pub fn to_plain(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Null => String::new(),
            other => other.to_literal(),
        }
    }
}

impl From<ValueRef<'_>> for CellValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => CellValue::Null,
            ValueRef::Integer(i) => CellValue::Integer(i),
            ValueRef::Real(r) => CellValue::Real(r),
            ValueRef::Text(t) => CellValue::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => CellValue::Blob(b.to_vec()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_literal())
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_none(),
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Real(r) => serializer.serialize_f64(*r),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Blob(b) => serializer.serialize_str(&hex(b)),
        }
    }
}

/// Render a row the way `run_query` reports it: `(1, 'text', NULL)`
pub fn render_row(cells: &[CellValue]) -> String {
    let parts: Vec<String> = cells.iter().map(CellValue::to_literal).collect();
    format!("({})", parts.join(", "))
}

// Keep a decimal point so reals stay distinguishable from integers
fn format_real(r: f64) -> String {
    if r.is_finite() && r.fract() == 0.0 && r.abs() < 1e15 {
        format!("{:.1}", r)
    } else {
        r.to_string()
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
