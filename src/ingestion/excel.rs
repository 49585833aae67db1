#![cfg(feature = "excel")]

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use tracing::debug;

use crate::error::{ImportError, ImportResult};
use crate::types::RawTable;

/// Parse an Excel document (`.xlsx`, `.xls`) held in memory into a [`RawTable`].
///
/// Behavior:
/// - The workbook format is sniffed from the bytes, not the file name
/// - Only the first sheet is read
/// - Fully empty rows are skipped; the first non-empty row is the header row
/// - Every cell is coerced to a trimmed `String` here; typed values never leave this module
/// - At most `row_cap` data rows are read; `None` reads every row
pub fn parse_excel_bytes(bytes: &[u8], row_cap: Option<usize>) -> ImportResult<RawTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Err(ImportError::EmptyFile),
    };

    let mut rows = range
        .rows()
        .filter(|row| row.iter().any(|c| !cell_to_string(c).is_empty()));

    let headers: Vec<String> = rows
        .next()
        .ok_or(ImportError::EmptyFile)?
        .iter()
        .map(cell_to_string)
        .collect();

    let cap = row_cap.unwrap_or(usize::MAX);
    let data: Vec<Vec<String>> = rows
        .take(cap)
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    debug!(columns = headers.len(), rows = data.len(), "parsed first worksheet");
    Ok(RawTable::new(headers, data))
}

fn cell_to_string(c: &Data) -> String {
    match c {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        // Phone numbers typed into a spreadsheet come back as floats.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(_) => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_render_without_fraction() {
        assert_eq!(cell_to_string(&Data::Float(12125551234.0)), "12125551234");
        assert_eq!(cell_to_string(&Data::Float(1.5)), "1.5");
    }

    #[test]
    fn strings_are_trimmed_and_empty_cells_are_blank() {
        assert_eq!(cell_to_string(&Data::String("  Email ".to_string())), "Email");
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
    }

    #[test]
    fn garbage_bytes_are_an_excel_error() {
        let err = parse_excel_bytes(b"definitely not a workbook", None).unwrap_err();
        assert!(matches!(err, ImportError::Excel(_)));
    }
}
