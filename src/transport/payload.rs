//! Request and response bodies of the import endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ImportError, ImportResult};
use crate::mapping::{FieldMapping, MappingTarget, StandardField};
use crate::types::RawTable;

/// Server-parsed import: the file travels whole and the backend applies the mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileImportRequest {
    pub folder_id: String,
    pub base64_file: String,
    pub filename: String,
    /// Raw header to standard field wire name, or `""` for metadata.
    pub mapping_config: Map<String, Value>,
}

/// One contact in a client-parsed import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Client-parsed import: rows were parsed locally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactsImportRequest {
    pub folder_id: String,
    pub contacts: Vec<ContactRecord>,
}

/// Contacts extracted from a table, plus how many rows were dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactBatch {
    pub contacts: Vec<ContactRecord>,
    /// Rows without a phone number.
    pub skipped: usize,
}

/// Build contact records from `table` using `mapping`.
///
/// Fails with [`ImportError::MissingRequiredColumn`] when no header maps to the phone number.
/// Rows whose phone cell is blank are skipped. When several columns map to the same field, the
/// rightmost column wins, even if its cell is blank.
pub fn extract_contacts(table: &RawTable, mapping: &FieldMapping) -> ImportResult<ContactBatch> {
    let targets: Vec<MappingTarget> = table
        .headers
        .iter()
        .map(|h| mapping.get(h).unwrap_or(MappingTarget::Unmapped))
        .collect();

    if !targets.contains(&MappingTarget::Field(StandardField::PhoneNumber)) {
        return Err(ImportError::MissingRequiredColumn {
            field: StandardField::PhoneNumber.wire_name().to_string(),
            headers: table.headers.clone(),
        });
    }

    let mut contacts = Vec::with_capacity(table.row_count());
    let mut skipped = 0;
    for row in &table.rows {
        let mut phone = "";
        let mut first = "";
        let mut last = "";
        let mut email = "";
        for (target, cell) in targets.iter().zip(row) {
            let slot = match target {
                MappingTarget::Field(StandardField::PhoneNumber) => &mut phone,
                MappingTarget::Field(StandardField::FirstName) => &mut first,
                MappingTarget::Field(StandardField::LastName) => &mut last,
                MappingTarget::Field(StandardField::Email) => &mut email,
                _ => continue,
            };
            *slot = cell.trim();
        }

        if phone.is_empty() {
            skipped += 1;
            continue;
        }
        contacts.push(ContactRecord {
            phone_number: phone.to_string(),
            first_name: non_empty(first),
            last_name: non_empty(last),
            email: non_empty(email),
        });
    }

    debug!(contacts = contacts.len(), skipped, "extracted contacts");
    Ok(ContactBatch { contacts, skipped })
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// A per-row failure reported by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// `None` when the entry carried no usable row number.
    pub row: Option<u64>,
    pub error: String,
}

impl RowError {
    /// Best-effort reading of one `errors` entry. Never fails: entries of an unexpected
    /// shape keep their JSON text as the message.
    fn from_entry(entry: &Value) -> Self {
        match entry {
            Value::String(text) => Self {
                row: None,
                error: text.clone(),
            },
            Value::Object(fields) => {
                let row = ["row", "row_index", "line"]
                    .iter()
                    .filter_map(|key| fields.get(*key))
                    .find_map(row_number);
                let error = ["error", "message", "reason"]
                    .iter()
                    .filter_map(|key| fields.get(*key))
                    .find_map(|v| v.as_str().map(str::to_string))
                    .unwrap_or_else(|| entry.to_string());
                Self { row, error }
            }
            other => Self {
                row: None,
                error: other.to_string(),
            },
        }
    }
}

fn row_number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// What the endpoint reports for one import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub successful: u64,
    pub failed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<RowError>>,
}

impl ImportOutcome {
    /// `"N succeeded, M failed"`.
    pub fn summary(&self) -> String {
        format!("{} succeeded, {} failed", self.successful, self.failed)
    }

    /// Nothing was imported and something was rejected.
    pub fn is_total_failure(&self) -> bool {
        self.successful == 0 && self.failed > 0
    }

    pub fn row_errors(&self) -> &[RowError] {
        self.errors.as_deref().unwrap_or_default()
    }
}

// Only the counts decide whether a shape matches; `errors` is accepted as any JSON and
// read afterwards.
#[derive(Deserialize)]
struct Counts {
    successful: u64,
    failed: u64,
    #[serde(default)]
    errors: Option<Value>,
}

impl From<Counts> for ImportOutcome {
    fn from(counts: Counts) -> Self {
        let errors = counts.errors.and_then(|errors| match errors {
            Value::Null => None,
            Value::Array(entries) => Some(entries.iter().map(RowError::from_entry).collect()),
            other => Some(vec![RowError::from_entry(&other)]),
        });
        Self {
            successful: counts.successful,
            failed: counts.failed,
            errors,
        }
    }
}

// The endpoint answers either with the counts at the top level or wrapped under `data`.
// Variants are tried in order, so a flat body wins when both are present.
#[derive(Deserialize)]
#[serde(untagged)]
enum ResponseShape {
    Flat(Counts),
    Nested { data: Counts },
}

/// Interpret an import endpoint response body.
///
/// Fails only when neither the top level nor `data` carries numeric `successful` and
/// `failed` counts. Per-row `errors` never reject a response.
pub fn parse_outcome(body: Value) -> ImportResult<ImportOutcome> {
    // serde would otherwise accept `[successful, failed]` as a struct.
    if !body.is_object() {
        return Err(ImportError::MalformedResponse {
            message: format!("expected a JSON object, got {body}"),
        });
    }
    match serde_json::from_value::<ResponseShape>(body) {
        Ok(ResponseShape::Flat(counts)) => Ok(counts.into()),
        Ok(ResponseShape::Nested { data }) => {
            debug!("import result found under `data`");
            Ok(data.into())
        }
        Err(_) => Err(ImportError::MalformedResponse {
            message: "expected numeric `successful` and `failed` at the top level or under `data`"
                .to_string(),
        }),
    }
}
