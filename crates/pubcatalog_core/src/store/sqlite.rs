//! SQLite-backed snapshot of document collections.
//!
//! # Responsibility
//! - Serve a locally imported copy of a remote collection.
//! - Import documents, assigning ids when the source has none.
//!
//! # Invariants
//! - Documents are stored as JSON objects keyed by `(collection, doc_id)`.
//! - Reads require a connection migrated by [`crate::db::open_db`].

use super::{CollectionQuery, Direction, Document, DocumentStore, StoreError, StoreResult};
use crate::db::migrations::ensure_current;
use crate::db::open_existing_db;
use log::{info, warn};
use rusqlite::{params, Connection};
use serde_json::Value;
use std::io;
use std::path::Path;
use uuid::Uuid;

/// Opens a snapshot file for reading.
///
/// # Errors
/// - Returns `Io` with `NotFound` when `path` does not exist; no file is
///   created.
/// - Returns `Db` when the file cannot be opened or migrated.
pub fn open_snapshot(path: impl AsRef<Path>) -> StoreResult<Connection> {
    let path = path.as_ref();
    if !path.is_file() {
        warn!(
            "event=snapshot_open module=store status=error reason=missing path={}",
            path.display()
        );
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "snapshot file does not exist"),
        });
    }
    Ok(open_existing_db(path)?)
}

/// Read/import access to snapshot documents.
pub struct SqliteDocumentStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentStore<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - Returns `Db` when the schema version is not the current one.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_current(conn)?;
        Ok(Self { conn })
    }

    /// Inserts one document and returns its id.
    ///
    /// A UUID v4 id is generated when `id` is `None`.
    ///
    /// # Errors
    /// - Returns `Db` when the id already exists in `collection`.
    pub fn insert_document(
        &self,
        collection: &str,
        id: Option<&str>,
        fields: &serde_json::Map<String, Value>,
    ) -> StoreResult<String> {
        let doc_id = id.map_or_else(|| Uuid::new_v4().to_string(), str::to_string);
        let data = serde_json::to_string(fields)?;
        self.conn.execute(
            "INSERT INTO documents (collection, doc_id, data) VALUES (?1, ?2, ?3);",
            params![collection, doc_id, data],
        )?;
        Ok(doc_id)
    }

    /// Imports documents in one transaction, replacing rows with equal ids.
    pub fn import_documents(&self, collection: &str, documents: &[Document]) -> StoreResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO documents (collection, doc_id, data) VALUES (?1, ?2, ?3)
                 ON CONFLICT (collection, doc_id) DO UPDATE SET data = excluded.data;",
            )?;
            for document in documents {
                let data = serde_json::to_string(&document.fields)?;
                stmt.execute(params![collection, document.id, data])?;
            }
        }
        tx.commit()?;

        info!(
            "event=snapshot_import module=store status=ok collection={} count={}",
            collection,
            documents.len()
        );
        Ok(documents.len())
    }
}

impl DocumentStore for SqliteDocumentStore<'_> {
    fn fetch_ordered(&self, query: &CollectionQuery) -> StoreResult<Vec<Document>> {
        let path = json_path(&query.order_by)?;
        let direction = match query.direction {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        };
        let sql = format!(
            "SELECT doc_id, data, json_extract(data, ?2) AS order_key
             FROM documents
             WHERE collection = ?1 AND json_extract(data, ?2) IS NOT NULL
             ORDER BY order_key {direction}, doc_id ASC;"
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![query.collection, path])?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next()? {
            let id: String = row.get("doc_id")?;
            let data: String = row.get("data")?;
            documents.push(Document::from_value(id, serde_json::from_str(&data)?)?);
        }
        Ok(documents)
    }
}

fn json_path(field: &str) -> StoreResult<String> {
    if field.is_empty() || field.contains('"') {
        return Err(StoreError::InvalidData(format!(
            "unsupported order-by field `{field}`"
        )));
    }
    Ok(format!("$.\"{field}\""))
}
