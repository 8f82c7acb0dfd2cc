//! Firestore REST reader.
//!
//! # Responsibility
//! - Run one read-only `runQuery` against a Firestore collection.
//! - Convert Firestore typed values into plain JSON documents.
//!
//! # Invariants
//! - One blocking request per fetch; no paging cursor is followed.
//! - Unknown value types decode to `null` with a warning instead of failing
//!   the whole load.

use super::{CollectionQuery, Direction, Document, DocumentStore, StoreError, StoreResult};
use crate::logging::sanitize_message;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{json, Map, Number, Value};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_DATABASE: &str = "(default)";
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Connection settings for one Firestore database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirestoreSettings {
    /// API root, overridable for the local emulator.
    pub base_url: String,
    pub project_id: String,
    pub database: String,
    /// Web API key appended as `?key=` when set.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl FirestoreSettings {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            project_id: project_id.into(),
            database: DEFAULT_DATABASE.to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }

    fn run_query_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents:runQuery",
            self.base_url.trim_end_matches('/'),
            self.project_id,
            self.database
        )
    }
}

/// Blocking Firestore client for whole-collection reads.
pub struct FirestoreStore {
    settings: FirestoreSettings,
    agent: ureq::Agent,
}

impl FirestoreStore {
    pub fn new(settings: FirestoreSettings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(settings.timeout)
            .build();
        Self { settings, agent }
    }
}

impl DocumentStore for FirestoreStore {
    fn fetch_ordered(&self, query: &CollectionQuery) -> StoreResult<Vec<Document>> {
        let url = self.settings.run_query_url();
        debug!(
            "event=store_query module=store status=start backend=firestore collection={}",
            query.collection
        );

        let mut request = self.agent.post(&url);
        if let Some(key) = self.settings.api_key.as_deref() {
            request = request.query("key", key);
        }

        match request.send_json(structured_query(query)) {
            Ok(response) => {
                let body = response
                    .into_string()
                    .map_err(|err| StoreError::Transport(format!("failed to read body: {err}")))?;
                parse_run_query_response(&body)
            }
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(StoreError::Http {
                    status,
                    body: sanitize_message(&body, MAX_ERROR_BODY_CHARS),
                })
            }
            Err(ureq::Error::Transport(transport)) => {
                Err(StoreError::Transport(transport.to_string()))
            }
        }
    }
}

fn structured_query(query: &CollectionQuery) -> Value {
    let direction = match query.direction {
        Direction::Ascending => "ASCENDING",
        Direction::Descending => "DESCENDING",
    };
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": query.collection }],
            "orderBy": [{
                "field": { "fieldPath": query.order_by },
                "direction": direction,
            }],
        }
    })
}

#[derive(Debug, Deserialize)]
struct RunQueryItem {
    document: Option<FirestoreDocument>,
}

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

/// Parses a `runQuery` response body into documents.
///
/// Entries without a `document` (read-time markers) are skipped.
pub(crate) fn parse_run_query_response(body: &str) -> StoreResult<Vec<Document>> {
    let items: Vec<RunQueryItem> = serde_json::from_str(body)?;

    items
        .into_iter()
        .filter_map(|item| item.document)
        .map(|document| {
            let id = document_id(&document.name)?;
            let fields = document
                .fields
                .iter()
                .map(|(name, value)| (name.clone(), decode_value(value)))
                .collect();
            Ok(Document::new(id, fields))
        })
        .collect()
}

fn document_id(name: &str) -> StoreResult<String> {
    name.rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| StoreError::InvalidData(format!("document name `{name}` has no id")))
}

/// Converts one Firestore typed value into plain JSON.
pub(crate) fn decode_value(value: &Value) -> Value {
    let Some((kind, inner)) = value.as_object().and_then(|typed| typed.iter().next()) else {
        warn!("event=value_decode module=store status=fallback reason=untyped_value");
        return Value::Null;
    };

    match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => inner.as_bool().map_or(Value::Null, Value::Bool),
        "integerValue" => decode_integer(inner),
        "doubleValue" => inner
            .as_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "geoPointValue" => inner.clone(),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .and_then(Value::as_object)
                .map(|fields| {
                    fields
                        .iter()
                        .map(|(name, value)| (name.clone(), decode_value(value)))
                        .collect()
                })
                .unwrap_or_default(),
        ),
        other => {
            warn!("event=value_decode module=store status=fallback reason=unknown_type type={other}");
            Value::Null
        }
    }
}

// Firestore sends int64 values as JSON strings.
fn decode_integer(inner: &Value) -> Value {
    match inner {
        Value::String(text) => text
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| inner.clone()),
        Value::Number(_) => inner.clone(),
        _ => Value::Null,
    }
}
