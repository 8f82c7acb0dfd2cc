//! Publication loader.
//!
//! # Responsibility
//! - Read the whole publication collection once, newest first.
//! - Normalize stored documents into `Publication` records.
//!
//! # Invariants
//! - Returned identifiers are unique; later duplicates are dropped.
//! - Store order is preserved.

use crate::config::CatalogSection;
use crate::model::publication::Publication;
use crate::store::{CollectionQuery, DocumentStore, StoreError};
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Message shown to users when the catalog cannot be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Error loading publications. Please try again later.";

/// Failure to read the collection from its store.
#[derive(Debug)]
pub struct LoadError {
    pub collection: String,
    pub source: StoreError,
}

impl LoadError {
    /// Text safe to show in place of the results.
    pub fn user_message(&self) -> &'static str {
        LOAD_ERROR_MESSAGE
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to load collection `{}`: {}",
            self.collection, self.source
        )
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Loads every publication in `catalog.collection`, newest first.
///
/// # Errors
/// - Returns `LoadError` when the store cannot be read. No partial result is
///   returned.
pub fn load_publications<S: DocumentStore>(
    store: &S,
    catalog: &CatalogSection,
) -> Result<Vec<Publication>, LoadError> {
    let started_at = Instant::now();
    let query = CollectionQuery::newest_first(&catalog.collection, &catalog.order_by);

    let documents = store.fetch_ordered(&query).map_err(|source| {
        error!(
            "event=catalog_load module=loader status=error collection={} duration_ms={} error={}",
            catalog.collection,
            started_at.elapsed().as_millis(),
            source
        );
        LoadError {
            collection: catalog.collection.clone(),
            source,
        }
    })?;

    let mut seen = HashSet::with_capacity(documents.len());
    let mut publications = Vec::with_capacity(documents.len());
    for document in documents {
        if !seen.insert(document.id.clone()) {
            warn!(
                "event=catalog_load module=loader status=fallback reason=duplicate_id record_id={}",
                document.id
            );
            continue;
        }
        publications.push(Publication::from_document(document));
    }

    info!(
        "event=catalog_load module=loader status=ok collection={} count={} duration_ms={}",
        catalog.collection,
        publications.len(),
        started_at.elapsed().as_millis()
    );
    Ok(publications)
}
