//! `contact-import` turns user-supplied spreadsheets into contact imports for a voice-calling
//! platform's backend.
//!
//! The pipeline has no schema to work from. It reads whatever headers the file has, guesses which
//! standard contact field each column holds, shows a small preview for confirmation, and then
//! sends either the whole file (base64, with a header mapping) or locally parsed contact rows to
//! the import endpoint.
//!
//! ## What you can import
//!
//! **File formats (detected by extension, then MIME type):**
//!
//! - **CSV**: `.csv`, comma- or semicolon-separated (a semicolon in the header line wins)
//! - **Excel** (Cargo feature `excel`, on by default): `.xlsx`, `.xls`; first sheet only
//!
//! Every cell comes out as a trimmed `String`; short rows are padded with empty strings.
//!
//! ## Quick example: parse, map, preview
//!
//! ```
//! use contact_import::ingestion::{parse_table, SourceFile};
//! use contact_import::mapping::{FieldMapping, MappingTarget, StandardField};
//! use contact_import::preview::project;
//!
//! # fn main() -> Result<(), contact_import::ImportError> {
//! let file = SourceFile::new(
//!     "contacts.csv",
//!     b"Full Name,Mobile,Email\nJane Doe,+12125551234,jane@x.com\n".to_vec(),
//! );
//! let table = parse_table(&file, Some(10))?;
//! let mapping = FieldMapping::infer(&table.headers);
//! assert_eq!(
//!     mapping.get("Mobile"),
//!     Some(MappingTarget::Field(StandardField::PhoneNumber))
//! );
//! assert_eq!(mapping.get("Full Name"), Some(MappingTarget::Unmapped));
//!
//! let preview = project(&table, 10);
//! assert_eq!(preview.rows[0][0], "Jane Doe");
//! # Ok(())
//! # }
//! ```
//!
//! ## Submitting
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use contact_import::config::ImportOptions;
//! use contact_import::ingestion::SourceFile;
//! use contact_import::observability::TracingObserver;
//! use contact_import::session::ImportSession;
//! use contact_import::transport::{HttpImportEndpoint, ImportSubmitter};
//!
//! # async fn run() -> Result<(), contact_import::ImportError> {
//! let options = ImportOptions::from_toml_file("contact_import.toml")?;
//! let endpoint = Arc::new(HttpImportEndpoint::new(&options)?);
//! let submitter =
//!     ImportSubmitter::new(endpoint, &options).with_observer(Arc::new(TracingObserver));
//!
//! let session = ImportSession::open(SourceFile::from_path("leads.xlsx").await?, &options)?;
//! let outcome = session.submit_file(&submitter, "folder-42").await?;
//! println!("{}", outcome.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: tokenizer, CSV/Excel parsers and the unified [`ingestion::parse_table`]
//! - [`mapping`]: standard fields and header reconciliation
//! - [`preview`]: bounded previews
//! - [`transport`]: chunked encoding, payloads, the endpoint seam and the submitter
//! - [`session`]: the two-step mapping wizard
//! - [`config`]: [`config::ImportOptions`]
//! - [`observability`]: observer hooks and severities
//! - [`types`]: [`types::RawTable`] and [`types::PreviewSlice`]
//! - [`error`]: the crate-wide error type

pub mod config;
pub mod error;
pub mod ingestion;
pub mod mapping;
pub mod observability;
pub mod preview;
pub mod session;
pub mod transport;
pub mod types;

pub use error::{ImportError, ImportResult};
