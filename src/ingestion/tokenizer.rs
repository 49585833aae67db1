//! Single-line delimited-text tokenizer.

use crate::error::{ImportError, ImportResult};

/// Field delimiters recognized in delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `,`
    Comma,
    /// `;`
    Semicolon,
}

impl Delimiter {
    /// Pick the delimiter for a file from its first line.
    ///
    /// A semicolon anywhere in the line selects [`Delimiter::Semicolon`]; otherwise the file is
    /// treated as comma-separated.
    pub fn detect(first_line: &str) -> Self {
        if first_line.contains(';') {
            Self::Semicolon
        } else {
            Self::Comma
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Semicolon => ';',
        }
    }

    pub fn as_byte(self) -> u8 {
        self.as_char() as u8
    }
}

/// Split one line into trimmed fields.
///
/// Rules:
///
/// - `"` toggles quoting; `""` inside quotes is a literal `"`.
/// - The delimiter separates fields only outside quotes.
/// - Quote characters that open or close a field never appear in the output.
/// - An unterminated quote runs to the end of the line.
///
/// An empty line yields a single empty field; filtering blank lines is the caller's job.
pub fn tokenize_line(line: &str, delimiter: Delimiter) -> Vec<String> {
    let delim = delimiter.as_char();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        } else if c == delim && !in_quotes {
            fields.push(finish_field(&current));
            current.clear();
        } else {
            current.push(c);
        }
    }
    fields.push(finish_field(&current));
    fields
}

fn finish_field(raw: &str) -> String {
    raw.trim().to_string()
}

/// Write `fields` as one fully quoted delimited line (no line terminator).
///
/// The output tokenizes back to `fields` with [`tokenize_line`] as long as no field carries
/// leading or trailing whitespace.
pub fn encode_line<S: AsRef<str>>(fields: &[S], delimiter: Delimiter) -> ImportResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());
    wtr.write_record(fields.iter().map(|f| f.as_ref()))?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| ImportError::Io(e.into_error()))?;
    let line = String::from_utf8(bytes)
        .map_err(|e| ImportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaped_quote_inside_quoted_field() {
        assert_eq!(
            tokenize_line(r#"a,"b""c",d"#, Delimiter::Comma),
            vec!["a", "b\"c", "d"]
        );
    }

    #[test]
    fn delimiter_inside_quotes_is_content() {
        assert_eq!(
            tokenize_line(r#""Doe, Jane",42"#, Delimiter::Comma),
            vec!["Doe, Jane", "42"]
        );
    }

    #[test]
    fn fields_are_trimmed() {
        assert_eq!(
            tokenize_line("  a ;  b;c  ", Delimiter::Semicolon),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn empty_line_yields_one_empty_field() {
        assert_eq!(tokenize_line("", Delimiter::Comma), vec![""]);
    }

    #[test]
    fn trailing_delimiter_yields_trailing_empty_field() {
        assert_eq!(tokenize_line("a,b,", Delimiter::Comma), vec!["a", "b", ""]);
    }

    #[test]
    fn unterminated_quote_runs_to_end_of_line() {
        assert_eq!(
            tokenize_line(r#"a,"b,c,d"#, Delimiter::Comma),
            vec!["a", "b,c,d"]
        );
    }

    #[test]
    fn detect_prefers_semicolon() {
        assert_eq!(Delimiter::detect("a;b;c"), Delimiter::Semicolon);
        assert_eq!(Delimiter::detect("a,b,c"), Delimiter::Comma);
        assert_eq!(Delimiter::detect("a,b;c"), Delimiter::Semicolon);
        assert_eq!(Delimiter::detect("single"), Delimiter::Comma);
    }

    #[test]
    fn encode_line_quotes_every_field() {
        let line = encode_line(&["a", "b\"c"], Delimiter::Comma).unwrap();
        assert_eq!(line, r#""a","b""c""#);
    }
}
