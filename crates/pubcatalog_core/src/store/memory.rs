//! In-memory document store and JSON fixture loading.
//!
//! # Responsibility
//! - Serve collections held in memory with the shared store ordering.
//! - Read JSON fixture files (an array of objects) into documents.
//!
//! # Invariants
//! - Fixture objects without an `id` key get a generated UUID v4 id.
//! - The `id` key is removed from stored fields.

use super::{
    sort_documents, CollectionQuery, Document, DocumentStore, OrderKey, StoreError, StoreResult,
};
use log::info;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use uuid::Uuid;

const FIXTURE_ID_KEY: &str = "id";

/// Collections kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    collections: HashMap<String, Vec<Document>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding one collection.
    pub fn with_collection(collection: impl Into<String>, documents: Vec<Document>) -> Self {
        let mut store = Self::new();
        store.collections.insert(collection.into(), documents);
        store
    }

    /// Creates a store holding one collection read from a JSON fixture file.
    pub fn from_json_file(collection: impl Into<String>, path: impl AsRef<Path>) -> StoreResult<Self> {
        let collection = collection.into();
        let mut store = Self::new();
        for document in load_json_documents(path)? {
            store.insert(collection.as_str(), document);
        }
        Ok(store)
    }

    /// Appends one document to `collection`.
    pub fn insert(&mut self, collection: impl Into<String>, document: Document) {
        self.collections
            .entry(collection.into())
            .or_default()
            .push(document);
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn fetch_ordered(&self, query: &CollectionQuery) -> StoreResult<Vec<Document>> {
        let Some(documents) = self.collections.get(&query.collection) else {
            return Ok(Vec::new());
        };

        let mut entries = documents
            .iter()
            .filter_map(|document| {
                OrderKey::from_field(document.fields.get(&query.order_by))
                    .map(|key| (key, document.clone()))
            })
            .collect::<Vec<_>>();
        sort_documents(&mut entries, query.direction);

        Ok(entries.into_iter().map(|(_, document)| document).collect())
    }
}

/// Reads a JSON fixture file holding an array of document objects.
///
/// # Errors
/// - Returns `Io` when the file cannot be read.
/// - Returns `Json` when the file is not valid JSON.
/// - Returns `InvalidData` when the top level is not an array of objects or
///   an `id` is not a string.
pub fn load_json_documents(path: impl AsRef<Path>) -> StoreResult<Vec<Document>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(items) = serde_json::from_str::<Value>(&raw)? else {
        return Err(StoreError::InvalidData(format!(
            "fixture `{}` must contain a JSON array",
            path.display()
        )));
    };

    let documents = items
        .into_iter()
        .map(fixture_document)
        .collect::<StoreResult<Vec<_>>>()?;

    info!(
        "event=fixture_read module=store status=ok path={} count={}",
        path.display(),
        documents.len()
    );
    Ok(documents)
}

fn fixture_document(item: Value) -> StoreResult<Document> {
    let Value::Object(mut fields) = item else {
        return Err(StoreError::InvalidData(
            "fixture entries must be JSON objects".to_string(),
        ));
    };

    let id = match fields.remove(FIXTURE_ID_KEY) {
        None | Some(Value::Null) => Uuid::new_v4().to_string(),
        Some(Value::String(id)) if !id.trim().is_empty() => id,
        Some(other) => {
            return Err(StoreError::InvalidData(format!(
                "fixture id must be a non-empty string, got {other}"
            )))
        }
    };

    Ok(Document::new(id, fields))
}
