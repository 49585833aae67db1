use std::io::Write;
use std::num::NonZeroUsize;

use base64::prelude::BASE64_STANDARD;
use base64::write::EncoderStringWriter;
use tracing::debug;

use crate::error::ImportResult;

/// Default number of bytes fed to the encoder per step.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// A file's bytes as standard, padded base64 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload(String);

impl EncodedPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Base64-encode `bytes`, feeding the encoder `chunk_size` bytes at a time.
///
/// The streaming writer carries partial 3-byte groups across chunk boundaries, so the output is
/// identical to encoding the whole buffer in one call regardless of `chunk_size`.
pub fn encode_chunked(bytes: &[u8], chunk_size: NonZeroUsize) -> ImportResult<EncodedPayload> {
    let mut enc = EncoderStringWriter::new(&BASE64_STANDARD);
    let mut chunks = 0usize;
    for chunk in bytes.chunks(chunk_size.get()) {
        enc.write_all(chunk)?;
        chunks += 1;
    }
    let out = enc.into_inner();
    debug!(bytes = bytes.len(), chunks, encoded = out.len(), "encoded file payload");
    Ok(EncodedPayload(out))
}
