//! Unified parsing entrypoint.
//!
//! Most callers should use [`parse_table`], which parses a [`SourceFile`] into a
//! [`crate::types::RawTable`].
//!
//! - The parser family is chosen from the file's declared type: its extension first, then its
//!   MIME type.
//! - Anything outside the `{csv, xls, xlsx}` allow-list is rejected with
//!   [`ImportError::UnsupportedFormat`].

use std::fmt;
use std::path::Path;

use tracing::info;

use crate::error::{ImportError, ImportResult};
use crate::types::RawTable;

use super::csv;

/// Supported spreadsheet families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Delimited text (comma or semicolon).
    Csv,
    /// Binary workbook formats (feature-gated behind `excel`).
    Excel,
}

impl FileKind {
    /// Parse a file kind from a file extension (case-insensitive, leading `.` allowed).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Parse a file kind from a MIME type (parameters such as `; charset=utf-8` are ignored).
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "text/csv" | "application/csv" => Some(Self::Csv),
            "application/vnd.ms-excel"
            | "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => {
                Some(Self::Excel)
            }
            _ => None,
        }
    }

    /// Resolve the kind of `file`. The extension wins over the MIME type when both are known.
    pub fn detect(file: &SourceFile) -> ImportResult<Self> {
        let from_ext = Path::new(&file.filename)
            .extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension);
        let from_mime = file.mime.as_deref().and_then(Self::from_mime);

        from_ext
            .or(from_mime)
            .ok_or_else(|| ImportError::UnsupportedFormat {
                declared: file.declared_type(),
            })
    }
}

/// One user-selected file held in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Original file name, used for type detection and sent to the endpoint.
    pub filename: String,
    /// MIME type reported by whoever supplied the file, if any.
    pub mime: Option<String>,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("filename", &self.filename)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl SourceFile {
    /// Create a file from a name and its content.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime: None,
            bytes,
        }
    }

    /// Attach a MIME type.
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Read a file from disk. The file name is taken from the last path component.
    pub async fn from_path(path: impl AsRef<Path>) -> ImportResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(filename, bytes))
    }

    fn declared_type(&self) -> String {
        let ext = Path::new(&self.filename)
            .extension()
            .and_then(|s| s.to_str());
        match (ext, self.mime.as_deref()) {
            (Some(ext), _) => ext.to_string(),
            (None, Some(mime)) => mime.to_string(),
            (None, None) => self.filename.clone(),
        }
    }
}

/// Parse `file` into a [`RawTable`], reading at most `row_cap` data rows.
///
/// Pass `None` to read every row (full imports); pass the preview window for confirmation views.
///
/// # Examples
///
/// ```
/// use contact_import::ingestion::{parse_table, SourceFile};
///
/// # fn main() -> Result<(), contact_import::ImportError> {
/// let file = SourceFile::new("people.csv", b"Phone;Email\n+1555;a@x.com\n".to_vec());
/// let table = parse_table(&file, Some(10))?;
/// assert_eq!(table.headers, vec!["Phone", "Email"]);
/// assert_eq!(table.row_count(), 1);
/// # Ok(())
/// # }
/// ```
pub fn parse_table(file: &SourceFile, row_cap: Option<usize>) -> ImportResult<RawTable> {
    let kind = FileKind::detect(file)?;
    let table = match kind {
        FileKind::Csv => csv::parse_csv_bytes(&file.bytes, row_cap)?,
        FileKind::Excel => parse_excel_dispatch(&file.bytes, row_cap)?,
    };
    info!(
        filename = %file.filename,
        ?kind,
        columns = table.headers.len(),
        rows = table.row_count(),
        "parsed import file"
    );
    Ok(table)
}

fn parse_excel_dispatch(bytes: &[u8], row_cap: Option<usize>) -> ImportResult<RawTable> {
    // Avoid unused warnings when the feature is off.
    let _ = (bytes, row_cap);

    #[cfg(feature = "excel")]
    {
        super::excel::parse_excel_bytes(bytes, row_cap)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(ImportError::UnsupportedFormat {
            declared: "excel (enable cargo feature 'excel')".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_beats_mime() {
        let file =
            SourceFile::new("contacts.CSV", Vec::new()).with_mime("application/vnd.ms-excel");
        assert_eq!(FileKind::detect(&file).unwrap(), FileKind::Csv);
    }

    #[test]
    fn mime_is_used_without_extension() {
        let file = SourceFile::new("upload", Vec::new()).with_mime("text/csv; charset=utf-8");
        assert_eq!(FileKind::detect(&file).unwrap(), FileKind::Csv);
    }

    #[test]
    fn knowledge_base_types_are_rejected() {
        for name in ["notes.pdf", "notes.txt", "notes.docx", "notes.md"] {
            let err = FileKind::detect(&SourceFile::new(name, Vec::new())).unwrap_err();
            assert!(matches!(err, ImportError::UnsupportedFormat { .. }), "{name}");
        }
    }

    #[test]
    fn unsupported_error_names_declared_type() {
        let err = parse_table(&SourceFile::new("a.json", b"{}".to_vec()), None).unwrap_err();
        assert!(err.to_string().contains("'json'"));
    }

    #[test]
    fn debug_hides_bytes() {
        let file = SourceFile::new("a.csv", vec![0; 4096]);
        let dbg = format!("{file:?}");
        assert!(dbg.contains("len: 4096"));
        assert!(!dbg.contains("0, 0"));
    }
}
