//! The two-step mapping wizard: pick a file, review the inferred mapping and preview, submit.

use tracing::debug;

use crate::config::ImportOptions;
use crate::error::ImportResult;
use crate::ingestion::{parse_table, SourceFile};
use crate::mapping::{FieldMapping, MappingTarget};
use crate::preview::project;
use crate::transport::{ImportOutcome, ImportSubmitter};
use crate::types::{PreviewSlice, RawTable};

/// State for one file being imported.
///
/// The table holds only the preview window. Full imports go back to the original bytes, so the
/// window never limits what is imported.
#[derive(Debug, Clone)]
pub struct ImportSession {
    file: SourceFile,
    table: RawTable,
    mapping: FieldMapping,
    preview_rows: usize,
}

impl ImportSession {
    /// Parse the preview window of `file` and infer a mapping for its headers.
    pub fn open(file: SourceFile, options: &ImportOptions) -> ImportResult<Self> {
        let preview_rows = options.preview_rows();
        let table = parse_table(&file, Some(preview_rows))?;
        let mapping = FieldMapping::infer(&table.headers);
        Ok(Self {
            file,
            table,
            mapping,
            preview_rows,
        })
    }

    /// Start over with a different file. The previous table and any manual remaps are dropped.
    ///
    /// On error the session keeps its current file.
    pub fn replace_file(&mut self, file: SourceFile) -> ImportResult<()> {
        let table = parse_table(&file, Some(self.preview_rows))?;
        self.mapping = FieldMapping::infer(&table.headers);
        self.table = table;
        self.file = file;
        Ok(())
    }

    pub fn file(&self) -> &SourceFile {
        &self.file
    }

    pub fn headers(&self) -> &[String] {
        &self.table.headers
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// Point `header` at `target`. Returns `false` (and changes nothing) for unknown headers.
    pub fn remap(&mut self, header: &str, target: MappingTarget) -> bool {
        if self.mapping.get(header).is_none() {
            return false;
        }
        debug!(header, %target, "remapped column");
        self.mapping.set(header, target);
        true
    }

    /// The rows to show for confirmation.
    pub fn preview(&self) -> PreviewSlice {
        project(&self.table, self.preview_rows)
    }

    /// Each header with its current target, in file order.
    pub fn column_targets(&self) -> Vec<(&str, MappingTarget)> {
        self.table
            .headers
            .iter()
            .map(|h| {
                let target = self.mapping.get(h).unwrap_or(MappingTarget::Unmapped);
                (h.as_str(), target)
            })
            .collect()
    }

    /// Server-parsed import of the whole file with the current mapping.
    pub async fn submit_file(
        &self,
        submitter: &ImportSubmitter,
        folder_id: &str,
    ) -> ImportResult<ImportOutcome> {
        submitter.submit_file(folder_id, &self.file, &self.mapping).await
    }

    /// Client-parsed import: re-parse every row of the file and send them as contacts.
    pub async fn submit_contacts(
        &self,
        submitter: &ImportSubmitter,
        folder_id: &str,
    ) -> ImportResult<ImportOutcome> {
        submitter
            .submit_file_as_contacts(folder_id, &self.file, &self.mapping)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::StandardField;

    fn csv_file(rows: usize) -> SourceFile {
        let mut text = String::from("Full Name,Mobile,Email\n");
        for i in 0..rows {
            text.push_str(&format!("Person {i},+1555000{i:04},p{i}@x.com\n"));
        }
        SourceFile::new("contacts.csv", text.into_bytes())
    }

    #[test]
    fn open_caps_table_at_preview_window() {
        let session = ImportSession::open(csv_file(100), &ImportOptions::default()).unwrap();
        assert_eq!(session.preview().row_count(), 10);
    }

    #[test]
    fn remap_known_and_unknown_headers() {
        let mut session = ImportSession::open(csv_file(1), &ImportOptions::default()).unwrap();
        let last = MappingTarget::Field(StandardField::LastName);
        assert!(session.remap("Full Name", last));
        assert!(!session.remap("Nope", last));
        assert_eq!(session.column_targets()[0], ("Full Name", last));
    }

    #[test]
    fn replace_file_resets_mapping() {
        let mut session = ImportSession::open(csv_file(1), &ImportOptions::default()).unwrap();
        session.remap("Mobile", MappingTarget::Unmapped);

        session
            .replace_file(SourceFile::new("b.csv", b"Phone\n1\n".to_vec()))
            .unwrap();
        assert_eq!(session.headers(), ["Phone".to_string()]);
        assert_eq!(
            session.mapping().get("Phone"),
            Some(MappingTarget::Field(StandardField::PhoneNumber))
        );
    }

    #[test]
    fn failed_replace_keeps_previous_file() {
        let mut session = ImportSession::open(csv_file(1), &ImportOptions::default()).unwrap();
        assert!(session.replace_file(SourceFile::new("b.pdf", Vec::new())).is_err());
        assert_eq!(session.file().filename, "contacts.csv");
    }
}
