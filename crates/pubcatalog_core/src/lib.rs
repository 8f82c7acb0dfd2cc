//! Core logic for the publication catalog browser.
//! Loads a publication collection once, then answers search, filter,
//! facet and pagination queries entirely in memory.

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod present;
pub mod query;
pub mod service;
pub mod store;

pub use app::{Action, CatalogState, CatalogView, FilterSelection, LoadStatus, QueryMode};
pub use config::{load_config, CatalogConfig, CatalogSection, ConfigError, SourceConfig};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status, LogSink};
pub use model::encoded::{decode_list, DecodeError, EncodedList};
pub use model::publication::{Publication, PublicationId};
pub use present::paginate::{paginate, Page, PagerState, DEFAULT_PAGE_SIZE};
pub use present::render::{display_tag, render_card_html, render_page, RenderFormat, RenderOptions};
pub use query::facets::{facets, stats, CatalogStats, Facets};
pub use query::filter::{filter, FilterCriteria};
pub use query::search::{search, SearchTerm};
pub use service::loader::{load_publications, LoadError};
pub use store::{
    CollectionQuery, Document, DocumentStore, FirestoreSettings, FirestoreStore,
    MemoryDocumentStore, SqliteDocumentStore, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
