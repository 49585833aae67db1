//! Importer configuration.
//!
//! [`ImportOptions`] has usable defaults for everything except the endpoint base URL. Options
//! can be layered from a TOML file with [`ImportOptions::from_toml_file`].

use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{ImportError, ImportResult};
use crate::observability::ImportSeverity;
use crate::transport::encoder::DEFAULT_CHUNK_SIZE;

/// Smallest and largest preview window a caller may configure.
pub const PREVIEW_ROWS_RANGE: (usize, usize) = (5, 20);

/// Options controlling parsing, encoding and submission.
///
/// Use [`Default`] for common cases and set `endpoint_base_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Base URL of the backend, e.g. `https://api.example.com/v1`.
    pub endpoint_base_url: String,
    /// Path of the server-parsed (file upload) import.
    pub file_import_path: String,
    /// Path of the client-parsed (contact rows) import.
    pub contacts_import_path: String,
    /// Upper bound on one import request.
    pub request_timeout_secs: u64,
    /// Bytes fed to the base64 encoder per step.
    pub chunk_size: usize,
    /// Rows shown in previews. Clamped to [`PREVIEW_ROWS_RANGE`].
    pub preview_rows: usize,
    /// Severity threshold at which observers receive `on_alert`.
    pub alert_at_or_above: ImportSeverity,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            endpoint_base_url: String::new(),
            file_import_path: "/contacts/import/file".to_string(),
            contacts_import_path: "/contacts/import".to_string(),
            request_timeout_secs: 60,
            chunk_size: DEFAULT_CHUNK_SIZE,
            preview_rows: 10,
            alert_at_or_above: ImportSeverity::Critical,
        }
    }
}

impl ImportOptions {
    /// Defaults overlaid with the keys present in the TOML file at `path`.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ImportResult<Self> {
        let options: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .extract()?;
        options.validate()?;
        Ok(options)
    }

    /// Defaults overlaid with TOML text.
    pub fn from_toml_str(toml: &str) -> ImportResult<Self> {
        let options: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml))
            .extract()?;
        options.validate()?;
        Ok(options)
    }

    /// Reject settings that cannot work.
    pub fn validate(&self) -> ImportResult<()> {
        if self.endpoint_base_url.trim().is_empty() {
            return Err(ImportError::Config("endpoint_base_url is empty".to_string()));
        }
        if self.chunk_size == 0 {
            return Err(ImportError::Config("chunk_size must be > 0".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ImportError::Config(
                "request_timeout_secs must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Chunk size as a non-zero count; `0` falls back to the default.
    pub fn chunk_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.chunk_size)
            .or(NonZeroUsize::new(DEFAULT_CHUNK_SIZE))
            .unwrap_or(NonZeroUsize::MIN)
    }

    pub fn preview_rows(&self) -> usize {
        let (lo, hi) = PREVIEW_ROWS_RANGE;
        self.preview_rows.clamp(lo, hi)
    }

    /// Join the base URL and `path` with exactly one `/`.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_overrides_defaults() {
        let opts = ImportOptions::from_toml_str(
            r#"
            endpoint_base_url = "https://api.example.com/v1/"
            chunk_size = 4096
            preview_rows = 50
            "#,
        )
        .unwrap();
        assert_eq!(opts.chunk_size().get(), 4096);
        assert_eq!(opts.preview_rows(), 20);
        assert_eq!(opts.request_timeout(), Duration::from_secs(60));
        assert_eq!(
            opts.url_for(&opts.file_import_path),
            "https://api.example.com/v1/contacts/import/file"
        );
    }

    #[test]
    fn validation_rejects_unusable_settings() {
        assert!(matches!(
            ImportOptions::from_toml_str("chunk_size = 1"),
            Err(ImportError::Config(_))
        ));
        let err = ImportOptions::from_toml_str(
            "endpoint_base_url = \"http://x\"\nchunk_size = 0",
        )
        .unwrap_err();
        assert!(err.to_string().contains("chunk_size"));
    }

    #[test]
    fn wrong_types_are_config_errors() {
        let toml = "endpoint_base_url = \"http://x\"\nchunk_size = \"big\"";
        let err = ImportOptions::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, ImportError::Config(_)));
    }

    #[test]
    fn alert_threshold_reads_lowercase() {
        let opts = ImportOptions::from_toml_str(
            "endpoint_base_url = \"http://x\"\nalert_at_or_above = \"error\"",
        )
        .unwrap();
        assert_eq!(opts.alert_at_or_above, ImportSeverity::Error);
    }
}
