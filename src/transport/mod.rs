//! Getting a confirmed import to the backend.
//!
//! - [`encoder`]: chunked base64 of the original file
//! - [`payload`]: request bodies, contact extraction and response interpretation
//! - [`endpoint`]: the [`ImportEndpoint`] seam and its HTTP implementation
//! - [`submit`]: [`ImportSubmitter`], which ties them together under a timeout

pub mod encoder;
pub mod endpoint;
pub mod payload;
pub mod submit;

pub use encoder::{encode_chunked, EncodedPayload, DEFAULT_CHUNK_SIZE};
pub use endpoint::{HttpImportEndpoint, ImportEndpoint};
pub use payload::{
    extract_contacts, parse_outcome, ContactBatch, ContactRecord, ContactsImportRequest,
    FileImportRequest, ImportOutcome, RowError,
};
pub use submit::ImportSubmitter;
