//! Parsing entrypoints and implementations.
//!
//! Most callers should use [`parse_table`] (from [`unified`]) which:
//!
//! - detects the file family from its extension or MIME type
//! - parses it into a schema-less [`crate::types::RawTable`]
//! - optionally caps the number of data rows read
//!
//! Format-specific functions are also available under:
//! - [`tokenizer`]
//! - [`csv`]
//! - `excel` (feature `excel`)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod tokenizer;
pub mod unified;

pub use tokenizer::{encode_line, tokenize_line, Delimiter};
pub use unified::{parse_table, FileKind, SourceFile};
