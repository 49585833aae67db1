//! Observer hooks for import outcomes.
//!
//! The submitter reports every attempt to an optional [`ImportObserver`]. [`TracingObserver`]
//! forwards events to `tracing`; [`CompositeObserver`] fans out to several observers.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::ImportError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (network, I/O or endpoint contract failures).
    Critical,
}

impl ImportSeverity {
    /// Severity of a failed import attempt.
    ///
    /// Problems with the user's file are `Error`; anything that points at the service or the
    /// host is `Critical`.
    pub fn for_error(e: &ImportError) -> Self {
        match e {
            ImportError::EmptyFile
            | ImportError::UnsupportedFormat { .. }
            | ImportError::MissingRequiredColumn { .. }
            | ImportError::Csv(_) => ImportSeverity::Error,
            #[cfg(feature = "excel")]
            ImportError::Excel(_) => ImportSeverity::Error,
            ImportError::Cancelled => ImportSeverity::Info,
            ImportError::Timeout(_) => ImportSeverity::Warning,
            ImportError::MalformedResponse { .. }
            | ImportError::Transport(_)
            | ImportError::Http { .. }
            | ImportError::Io(_)
            | ImportError::Config(_) => ImportSeverity::Critical,
        }
    }
}

/// Which payload shape an import used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportVariant {
    /// The file itself is sent, base64-encoded, with a header mapping.
    ServerParsed,
    /// Rows are parsed locally and sent as contact records.
    ClientParsed,
}

/// Context about an import attempt.
#[derive(Debug, Clone)]
pub struct ImportContext {
    /// Name of the file being imported.
    pub filename: String,
    /// Target folder on the backend.
    pub folder_id: String,
    /// Payload shape used.
    pub variant: ImportVariant,
}

/// Stats reported on a completed import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    /// Rows the endpoint accepted.
    pub successful: u64,
    /// Rows the endpoint rejected.
    pub failed: u64,
    /// Rows dropped locally before sending (client-parsed only).
    pub skipped: usize,
}

/// Observer interface for import outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait ImportObserver: Send + Sync {
    /// Called when the endpoint answered with a result (possibly with per-row failures).
    fn on_success(&self, _ctx: &ImportContext, _stats: ImportStats) {}

    /// Called when the import failed as a whole.
    fn on_failure(&self, _ctx: &ImportContext, _severity: ImportSeverity, _error: &ImportError) {}

    /// Called when an import failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ImportObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ImportObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ImportObserver for CompositeObserver {
    fn on_success(&self, ctx: &ImportContext, stats: ImportStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Emits import events as `tracing` events.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl ImportObserver for TracingObserver {
    fn on_success(&self, ctx: &ImportContext, stats: ImportStats) {
        info!(
            filename = %ctx.filename,
            folder_id = %ctx.folder_id,
            variant = ?ctx.variant,
            successful = stats.successful,
            failed = stats.failed,
            skipped = stats.skipped,
            "import finished"
        );
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        warn!(
            filename = %ctx.filename,
            folder_id = %ctx.folder_id,
            variant = ?ctx.variant,
            ?severity,
            %error,
            "import failed"
        );
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        error!(
            filename = %ctx.filename,
            folder_id = %ctx.folder_id,
            variant = ?ctx.variant,
            ?severity,
            %error,
            "import alert"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_problems_are_not_critical() {
        assert_eq!(ImportSeverity::for_error(&ImportError::EmptyFile), ImportSeverity::Error);
        assert_eq!(
            ImportSeverity::for_error(&ImportError::MalformedResponse {
                message: "x".to_string()
            }),
            ImportSeverity::Critical
        );
        assert!(ImportSeverity::Warning < ImportSeverity::Critical);
    }
}
