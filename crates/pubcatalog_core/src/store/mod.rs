//! Read access to the remote document collection and its local stand-ins.
//!
//! # Responsibility
//! - Define the `DocumentStore` contract the loader depends on.
//! - Keep transport details (HTTP, SQLite, files) behind that contract.
//!
//! # Invariants
//! - Stores never interpret document fields beyond the order-by field.
//! - All stores share one ordering: documents without the order field are
//!   excluded, numbers sort before text, and ties break by id ascending.

use crate::db::DbError;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod firestore;
pub mod memory;
pub mod sqlite;

pub use firestore::{FirestoreSettings, FirestoreStore};
pub use memory::{load_json_documents, MemoryDocumentStore};
pub use sqlite::{open_snapshot, SqliteDocumentStore};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error for every backend.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Remote store answered with a non-success status.
    Http {
        status: u16,
        body: String,
    },
    /// Remote store could not be reached.
    Transport(String),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Http { status, body } => write!(f, "store returned HTTP {status}: {body}"),
            Self::Transport(message) => write!(f, "store unreachable: {message}"),
            Self::Io { path, source } => write!(f, "failed to read `{}`: {source}", path.display()),
            Self::Json(err) => write!(f, "invalid JSON from store: {err}"),
            Self::InvalidData(message) => write!(f, "invalid document data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::Http { .. } | Self::Transport(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// One stored document: identifier plus raw fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Builds a document from a JSON object.
    ///
    /// # Errors
    /// - Returns `InvalidData` when `fields` is not an object.
    pub fn from_value(id: impl Into<String>, fields: Value) -> StoreResult<Self> {
        let id = id.into();
        match fields {
            Value::Object(map) => Ok(Self::new(id, map)),
            other => Err(StoreError::InvalidData(format!(
                "document `{id}` must be an object, got {other}"
            ))),
        }
    }
}

/// Sort direction for the order-by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Whole-collection read request. There is no cursor: every matching
/// document is returned in one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionQuery {
    pub collection: String,
    pub order_by: String,
    pub direction: Direction,
}

impl CollectionQuery {
    /// Newest-first read ordered by `order_by`.
    pub fn newest_first(collection: impl Into<String>, order_by: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            order_by: order_by.into(),
            direction: Direction::Descending,
        }
    }
}

/// Read-only document source.
pub trait DocumentStore {
    fn fetch_ordered(&self, query: &CollectionQuery) -> StoreResult<Vec<Document>>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn fetch_ordered(&self, query: &CollectionQuery) -> StoreResult<Vec<Document>> {
        (**self).fetch_ordered(query)
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for Box<S> {
    fn fetch_ordered(&self, query: &CollectionQuery) -> StoreResult<Vec<Document>> {
        (**self).fetch_ordered(query)
    }
}

/// Comparable projection of an order-by value.
///
/// Variant order matters: numbers sort before text.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub(crate) enum OrderKey {
    Number(f64),
    Text(String),
}

impl OrderKey {
    /// Returns `None` for missing and `null` values, which are excluded.
    pub(crate) fn from_field(value: Option<&Value>) -> Option<Self> {
        match value? {
            Value::Null => None,
            Value::Bool(flag) => Some(Self::Number(if *flag { 1.0 } else { 0.0 })),
            Value::Number(number) => number.as_f64().map(Self::Number),
            Value::String(text) => Some(Self::Text(text.clone())),
            other => Some(Self::Text(other.to_string())),
        }
    }
}

/// Sorts `(key, document)` pairs using the shared store ordering.
pub(crate) fn sort_documents(entries: &mut [(OrderKey, Document)], direction: Direction) {
    entries.sort_by(|(left_key, left), (right_key, right)| {
        let by_key = left_key.partial_cmp(right_key).unwrap_or(Ordering::Equal);
        let by_key = match direction {
            Direction::Ascending => by_key,
            Direction::Descending => by_key.reverse(),
        };
        by_key.then_with(|| left.id.cmp(&right.id))
    });
}
