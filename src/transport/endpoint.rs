use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ImportOptions;
use crate::error::{ImportError, ImportResult};

use super::payload::{ContactsImportRequest, FileImportRequest};

/// The backend import API.
///
/// Implementations return the raw JSON body; interpreting it is the submitter's job.
#[async_trait]
pub trait ImportEndpoint: Send + Sync {
    /// Upload a whole file with a header mapping.
    async fn import_file(&self, request: &FileImportRequest) -> ImportResult<Value>;
    /// Send locally parsed contact rows.
    async fn import_contacts(&self, request: &ContactsImportRequest) -> ImportResult<Value>;
}

/// [`ImportEndpoint`] over HTTP: JSON `POST` to `base_url + path`.
pub struct HttpImportEndpoint {
    client: reqwest::Client,
    file_url: String,
    contacts_url: String,
}

impl HttpImportEndpoint {
    pub fn new(options: &ImportOptions) -> ImportResult<Self> {
        options.validate()?;
        let client = reqwest::Client::builder()
            .timeout(options.request_timeout())
            .build()?;
        Ok(Self::with_client(client, options))
    }

    /// Use a preconfigured client (auth headers, proxies, ...).
    pub fn with_client(client: reqwest::Client, options: &ImportOptions) -> Self {
        Self {
            client,
            file_url: options.url_for(&options.file_import_path),
            contacts_url: options.url_for(&options.contacts_import_path),
        }
    }

    async fn post_json<T: Serialize + Sync>(&self, url: &str, body: &T) -> ImportResult<Value> {
        debug!(%url, "posting import request");
        let response = self.client.post(url).json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ImportError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ImportError::MalformedResponse {
            message: format!("body is not JSON: {e}"),
        })
    }
}

#[async_trait]
impl ImportEndpoint for HttpImportEndpoint {
    async fn import_file(&self, request: &FileImportRequest) -> ImportResult<Value> {
        self.post_json(&self.file_url, request).await
    }

    async fn import_contacts(&self, request: &ContactsImportRequest) -> ImportResult<Value> {
        self.post_json(&self.contacts_url, request).await
    }
}
