use std::fmt;
use std::future::{self, Future};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{info, instrument};

use crate::config::ImportOptions;
use crate::error::{ImportError, ImportResult};
use crate::ingestion::{parse_table, FileKind, SourceFile};
use crate::mapping::FieldMapping;
use crate::observability::{
    ImportContext, ImportObserver, ImportSeverity, ImportStats, ImportVariant,
};
use crate::types::RawTable;

use super::encoder::encode_chunked;
use super::endpoint::ImportEndpoint;
use super::payload::{
    extract_contacts, parse_outcome, ContactsImportRequest, FileImportRequest, ImportOutcome,
};

/// Builds import payloads and sends them to an [`ImportEndpoint`].
///
/// Every request is bounded by the configured timeout and may be abandoned through a cancellation
/// future. Nothing is changed locally; on success the caller should refresh its contact listing.
pub struct ImportSubmitter {
    endpoint: Arc<dyn ImportEndpoint>,
    timeout: Duration,
    chunk_size: NonZeroUsize,
    observer: Option<Arc<dyn ImportObserver>>,
    alert_at_or_above: ImportSeverity,
}

impl fmt::Debug for ImportSubmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportSubmitter")
            .field("timeout", &self.timeout)
            .field("chunk_size", &self.chunk_size)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl ImportSubmitter {
    pub fn new(endpoint: Arc<dyn ImportEndpoint>, options: &ImportOptions) -> Self {
        Self {
            endpoint,
            timeout: options.request_timeout(),
            chunk_size: options.chunk_size(),
            observer: None,
            alert_at_or_above: options.alert_at_or_above,
        }
    }

    /// Attach an observer for import outcomes.
    pub fn with_observer(mut self, observer: Arc<dyn ImportObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Server-parsed import: send `file` base64-encoded together with `mapping`.
    pub async fn submit_file(
        &self,
        folder_id: &str,
        file: &SourceFile,
        mapping: &FieldMapping,
    ) -> ImportResult<ImportOutcome> {
        self.submit_file_with_cancel(folder_id, file, mapping, future::pending())
            .await
    }

    /// Like [`Self::submit_file`]; resolves to [`ImportError::Cancelled`] if `cancel` completes
    /// first.
    #[instrument(skip_all, fields(folder_id = %folder_id, filename = %file.filename))]
    pub async fn submit_file_with_cancel(
        &self,
        folder_id: &str,
        file: &SourceFile,
        mapping: &FieldMapping,
        cancel: impl Future<Output = ()> + Send,
    ) -> ImportResult<ImportOutcome> {
        let ctx = ImportContext {
            filename: file.filename.clone(),
            folder_id: folder_id.to_string(),
            variant: ImportVariant::ServerParsed,
        };

        let result = async {
            FileKind::detect(file)?;
            let encoded = encode_chunked(&file.bytes, self.chunk_size)?;
            let request = FileImportRequest {
                folder_id: folder_id.to_string(),
                base64_file: encoded.into_string(),
                filename: file.filename.clone(),
                mapping_config: mapping.to_wire_map(),
            };
            let body = self
                .bounded(self.endpoint.import_file(&request), cancel)
                .await?;
            parse_outcome(body)
        }
        .await;

        self.report(&ctx, &result, 0);
        result
    }

    /// Client-parsed import: send every row of `table` as a contact record.
    ///
    /// `table` should be parsed without a row cap; the preview window must not limit what gets
    /// imported.
    pub async fn submit_contacts(
        &self,
        folder_id: &str,
        filename: &str,
        table: &RawTable,
        mapping: &FieldMapping,
    ) -> ImportResult<ImportOutcome> {
        self.submit_contacts_with_cancel(folder_id, filename, table, mapping, future::pending())
            .await
    }

    /// Like [`Self::submit_contacts`]; resolves to [`ImportError::Cancelled`] if `cancel`
    /// completes first.
    ///
    /// Fails with [`ImportError::MissingRequiredColumn`] before any request is made when no
    /// column maps to the phone number.
    #[instrument(skip_all, fields(folder_id = %folder_id, filename = %filename))]
    pub async fn submit_contacts_with_cancel(
        &self,
        folder_id: &str,
        filename: &str,
        table: &RawTable,
        mapping: &FieldMapping,
        cancel: impl Future<Output = ()> + Send,
    ) -> ImportResult<ImportOutcome> {
        let ctx = ImportContext {
            filename: filename.to_string(),
            folder_id: folder_id.to_string(),
            variant: ImportVariant::ClientParsed,
        };

        let mut skipped = 0;
        let result = self
            .send_contacts(folder_id, table, mapping, cancel, &mut skipped)
            .await;

        self.report(&ctx, &result, skipped);
        result
    }

    /// Client-parsed import of a whole file: parse every row of `file`, then send them as
    /// contacts. A file that fails to parse is reported like any other failed import.
    pub async fn submit_file_as_contacts(
        &self,
        folder_id: &str,
        file: &SourceFile,
        mapping: &FieldMapping,
    ) -> ImportResult<ImportOutcome> {
        self.submit_file_as_contacts_with_cancel(folder_id, file, mapping, future::pending())
            .await
    }

    /// Like [`Self::submit_file_as_contacts`]; resolves to [`ImportError::Cancelled`] if
    /// `cancel` completes first.
    #[instrument(skip_all, fields(folder_id = %folder_id, filename = %file.filename))]
    pub async fn submit_file_as_contacts_with_cancel(
        &self,
        folder_id: &str,
        file: &SourceFile,
        mapping: &FieldMapping,
        cancel: impl Future<Output = ()> + Send,
    ) -> ImportResult<ImportOutcome> {
        let ctx = ImportContext {
            filename: file.filename.clone(),
            folder_id: folder_id.to_string(),
            variant: ImportVariant::ClientParsed,
        };

        let mut skipped = 0;
        let result = async {
            let table = parse_table(file, None)?;
            self.send_contacts(folder_id, &table, mapping, cancel, &mut skipped)
                .await
        }
        .await;

        self.report(&ctx, &result, skipped);
        result
    }

    async fn send_contacts(
        &self,
        folder_id: &str,
        table: &RawTable,
        mapping: &FieldMapping,
        cancel: impl Future<Output = ()>,
        skipped: &mut usize,
    ) -> ImportResult<ImportOutcome> {
        let batch = extract_contacts(table, mapping)?;
        *skipped = batch.skipped;
        let request = ContactsImportRequest {
            folder_id: folder_id.to_string(),
            contacts: batch.contacts,
        };
        let body = self
            .bounded(self.endpoint.import_contacts(&request), cancel)
            .await?;
        parse_outcome(body)
    }

    async fn bounded(
        &self,
        request: impl Future<Output = ImportResult<Value>>,
        cancel: impl Future<Output = ()>,
    ) -> ImportResult<Value> {
        tokio::select! {
            biased;
            _ = cancel => Err(ImportError::Cancelled),
            res = tokio::time::timeout(self.timeout, request) => match res {
                Ok(body) => body,
                Err(_) => Err(ImportError::Timeout(self.timeout)),
            },
        }
    }

    fn report(&self, ctx: &ImportContext, result: &ImportResult<ImportOutcome>, skipped: usize) {
        if let Ok(outcome) = result {
            info!(summary = %outcome.summary(), skipped, "import endpoint answered");
        }

        let Some(obs) = self.observer.as_ref() else {
            return;
        };
        match result {
            Ok(outcome) => obs.on_success(
                ctx,
                ImportStats {
                    successful: outcome.successful,
                    failed: outcome.failed,
                    skipped,
                },
            ),
            Err(e) => {
                let sev = ImportSeverity::for_error(e);
                obs.on_failure(ctx, sev, e);
                if sev >= self.alert_at_or_above {
                    obs.on_alert(ctx, sev, e);
                }
            }
        }
    }
}
