//! CSV parsing into a schema-less [`RawTable`].

use tracing::debug;

use crate::error::{ImportError, ImportResult};
use crate::types::RawTable;

use super::tokenizer::{tokenize_line, Delimiter};

/// Parse CSV bytes into a [`RawTable`].
///
/// Rules:
///
/// - Bytes are decoded as UTF-8 (a leading BOM is removed, invalid sequences are replaced).
/// - Blank lines are skipped everywhere, including before the header.
/// - The first remaining line is the header row and selects the delimiter
///   (see [`Delimiter::detect`]).
/// - At most `row_cap` data rows are read; `None` reads every row.
pub fn parse_csv_bytes(bytes: &[u8], row_cap: Option<usize>) -> ImportResult<RawTable> {
    let (text, _) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    parse_csv_str(&text, row_cap)
}

/// Parse already-decoded CSV text into a [`RawTable`].
pub fn parse_csv_str(text: &str, row_cap: Option<usize>) -> ImportResult<RawTable> {
    // `str::lines` splits on both `\n` and `\r\n`.
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header_line = lines.next().ok_or(ImportError::EmptyFile)?;
    let delimiter = Delimiter::detect(header_line);
    let headers = tokenize_line(header_line, delimiter);

    let cap = row_cap.unwrap_or(usize::MAX);
    let rows: Vec<Vec<String>> = lines
        .take(cap)
        .map(|line| tokenize_line(line, delimiter))
        .collect();

    debug!(
        ?delimiter,
        columns = headers.len(),
        rows = rows.len(),
        "parsed csv"
    );
    Ok(RawTable::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_and_blank_lines() {
        let text = "\r\nname,phone\r\n\r\nAda,1\r\n   \r\nGrace,2\r\n";
        let table = parse_csv_str(text, None).unwrap();
        assert_eq!(table.headers, vec!["name", "phone"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1], vec!["Grace", "2"]);
    }

    #[test]
    fn semicolon_files_are_split_on_semicolons() {
        let table = parse_csv_str("name;phone\n\"Doe, Jane\";1\n", None).unwrap();
        assert_eq!(table.rows[0], vec!["Doe, Jane", "1"]);
    }

    #[test]
    fn bom_is_removed_from_first_header() {
        let bytes = b"\xEF\xBB\xBFphone,email\n1,a@b.c\n";
        let table = parse_csv_bytes(bytes, None).unwrap();
        assert_eq!(table.headers[0], "phone");
    }

    #[test]
    fn quoted_headers_are_unquoted() {
        let table = parse_csv_str("\"First Name\",\"Phone\"\nAda,1\n", None).unwrap();
        assert_eq!(table.headers, vec!["First Name", "Phone"]);
    }

    #[test]
    fn only_blank_lines_is_empty() {
        let err = parse_csv_str("\n  \n\r\n", None).unwrap_err();
        assert!(matches!(err, ImportError::EmptyFile));
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let table = parse_csv_str("phone,email\n", Some(10)).unwrap();
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn row_cap_zero_reads_only_headers() {
        let table = parse_csv_str("a\n1\n2\n", Some(0)).unwrap();
        assert_eq!(table.headers, vec!["a"]);
        assert_eq!(table.row_count(), 0);
    }
}
