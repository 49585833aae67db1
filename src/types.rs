//! Core data model types for contact ingestion.
//!
//! Parsing produces a schema-less [`RawTable`] of strings; previews are derived from it as
//! [`PreviewSlice`]s.

use serde::Serialize;
use serde_json::{Map, Value};

/// A header row plus string cells, as read from one file.
///
/// Rows are stored as `Vec<Vec<String>>` in the same order as `headers`. Every row has exactly
/// `headers.len()` cells; short rows are padded with empty strings by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawTable {
    /// Headers in file order. Not deduplicated.
    pub headers: Vec<String>,
    /// Row-major cell storage.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a table, padding or truncating each row to the header count.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows.into_iter().map(|row| zip_to_width(row, width)).collect();
        Self { headers, rows }
    }

    /// Number of data rows (the header row is not counted).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the index of the last column named `header`, if present.
    ///
    /// Duplicate headers resolve to the rightmost column, matching [`Self::record`].
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().rposition(|h| h == header)
    }

    /// Row `idx` as an ordered `header -> cell` object.
    ///
    /// Keys keep header order; when a header repeats, the rightmost cell wins.
    pub fn record(&self, idx: usize) -> Option<Map<String, Value>> {
        let row = self.rows.get(idx)?;
        Some(record_from(&self.headers, row))
    }
}

/// The bounded view rendered for confirmation before an import is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewSlice {
    /// Same headers, same order, as the source table.
    pub headers: Vec<String>,
    /// At most the preview window's worth of rows.
    pub rows: Vec<Vec<String>>,
}

impl PreviewSlice {
    /// Number of rows in the preview.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Preview row `idx` as an ordered `header -> cell` object.
    pub fn record(&self, idx: usize) -> Option<Map<String, Value>> {
        let row = self.rows.get(idx)?;
        Some(record_from(&self.headers, row))
    }
}

/// Positional zip rule shared by every parser: extra cells are dropped, missing cells are empty.
pub(crate) fn zip_to_width(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

fn record_from(headers: &[String], row: &[String]) -> Map<String, Value> {
    let mut out = Map::with_capacity(headers.len());
    for (header, cell) in headers.iter().zip(row) {
        out.insert(header.clone(), Value::String(cell.clone()));
    }
    out
}
