use std::time::Duration;

use thiserror::Error;

/// Convenience result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Error type returned by the import pipeline.
///
/// This is a single error enum shared by parsing (CSV and optional Excel), mapping, encoding and
/// submission.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file yielded no header or row content.
    #[error("empty file: no header row found")]
    EmptyFile,

    /// The declared file type is outside the `{csv, xls, xlsx}` allow-list.
    #[error("unsupported format: '{declared}' (expected csv, xls or xlsx)")]
    UnsupportedFormat { declared: String },

    /// No header maps to a field the client-parsed import requires.
    #[error("missing required column '{field}'. headers={headers:?}")]
    MissingRequiredColumn { field: String, headers: Vec<String> },

    /// The import endpoint answered with a body matching neither known result shape.
    #[error("malformed import response: {message}")]
    MalformedResponse { message: String },

    /// Underlying network failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The import endpoint answered with a non-success status.
    #[error("import endpoint returned {status}: {body}")]
    Http { status: u16, body: String },

    /// The import request did not complete within the configured timeout.
    #[error("import request timed out after {0:?}")]
    Timeout(Duration),

    /// The caller abandoned the import before the endpoint answered.
    #[error("import cancelled")]
    Cancelled,

    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Spreadsheet decoding error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV writer error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl From<figment::Error> for ImportError {
    fn from(err: figment::Error) -> Self {
        ImportError::Config(err.to_string())
    }
}

impl ImportError {
    /// A single sentence suitable for showing to the person running the import.
    pub fn user_message(&self) -> String {
        match self {
            ImportError::EmptyFile => "The selected file has no rows to import.".to_string(),
            ImportError::UnsupportedFormat { .. } => {
                "Unsupported file type. Please upload a CSV, XLS or XLSX file.".to_string()
            }
            ImportError::MissingRequiredColumn { field, .. } => {
                format!("No column could be matched to '{field}'. Please map one before importing.")
            }
            ImportError::MalformedResponse { .. } => {
                "The import service returned an unexpected response.".to_string()
            }
            ImportError::Transport(_) | ImportError::Http { .. } => {
                "Could not reach the import service. Please try again.".to_string()
            }
            ImportError::Timeout(_) => "The import service took too long to respond.".to_string(),
            ImportError::Cancelled => "The import was cancelled.".to_string(),
            ImportError::Io(_) => "The selected file could not be read.".to_string(),
            #[cfg(feature = "excel")]
            ImportError::Excel(_) => "The spreadsheet could not be read.".to_string(),
            ImportError::Csv(_) => "The rows could not be written as CSV.".to_string(),
            ImportError::Config(_) => "The importer is misconfigured.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_message_names_the_field() {
        let err = ImportError::MissingRequiredColumn {
            field: "phone_number".to_string(),
            headers: vec!["name".to_string(), "note".to_string()],
        };
        assert!(err.to_string().contains("missing required column 'phone_number'"));
        assert!(err.user_message().contains("phone_number"));
    }

    #[test]
    fn figment_errors_become_config_errors() {
        let err: ImportError = figment::Error::from("bad value".to_string()).into();
        assert!(matches!(err, ImportError::Config(msg) if msg.contains("bad value")));
    }
}
