//! Config resolution, logging start-up and catalog loading.

use crate::error::CliError;
use crate::Cli;
use pubcatalog_core::config::{normalize, validate};
use pubcatalog_core::store::open_snapshot;
use pubcatalog_core::{
    init_logging, init_stderr_logging, load_config, load_publications, CatalogConfig,
    FirestoreStore, LoadError, MemoryDocumentStore, Publication, SourceConfig,
    SqliteDocumentStore, StoreError,
};

const STDERR_DEFAULT_LEVEL: &str = "warn";

/// Loads the config file (or defaults) and applies command-line overrides.
pub fn resolve_config(cli: &Cli) -> Result<CatalogConfig, CliError> {
    let mut config = match cli.config.as_deref() {
        Some(path) => load_config(path)?,
        None => CatalogConfig::default(),
    };

    if let Some(path) = cli.fixture.clone() {
        config.source = SourceConfig::JsonFile { path };
    }
    if let Some(path) = cli.sqlite.clone() {
        config.source = SourceConfig::Sqlite { path };
    }
    if let Some(dir) = cli.log_dir.clone() {
        config.logging.dir = Some(dir);
    }
    if let Some(level) = cli.log_level.clone() {
        config.logging.level = level;
    }

    normalize(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Starts file logging when a directory is configured, stderr otherwise.
///
/// Stderr logging stays at `warn` unless a level was passed explicitly, so
/// debug builds do not flood the terminal.
pub fn start_logging(cli: &Cli, config: &CatalogConfig) -> Result<(), CliError> {
    let result = match config.logging.dir.as_deref() {
        Some(dir) => init_logging(&config.logging.level, dir),
        None => {
            let level = if cli.log_level.is_some() {
                config.logging.level.as_str()
            } else {
                STDERR_DEFAULT_LEVEL
            };
            init_stderr_logging(level)
        }
    };
    result.map_err(CliError::Logging)
}

/// Reads the whole collection from the configured source.
pub fn load_catalog(config: &CatalogConfig) -> Result<Vec<Publication>, LoadError> {
    let catalog = &config.catalog;
    let unavailable = |source: StoreError| LoadError {
        collection: catalog.collection.clone(),
        source,
    };

    match &config.source {
        SourceConfig::JsonFile { path } => {
            let store = MemoryDocumentStore::from_json_file(&catalog.collection, path)
                .map_err(unavailable)?;
            load_publications(&store, catalog)
        }
        SourceConfig::Sqlite { path } => {
            let conn = open_snapshot(path).map_err(unavailable)?;
            let store = SqliteDocumentStore::try_new(&conn).map_err(unavailable)?;
            load_publications(&store, catalog)
        }
        SourceConfig::Firestore { .. } => {
            let settings = config.source.firestore_settings().ok_or_else(|| {
                unavailable(StoreError::InvalidData(
                    "firestore source without settings".to_string(),
                ))
            })?;
            load_publications(&FirestoreStore::new(settings), catalog)
        }
    }
}
