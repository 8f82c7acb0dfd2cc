//! TOML configuration.
//!
//! # Responsibility
//! - Parse, normalize and validate catalog configuration.
//! - Provide defaults so an empty file is a usable configuration.
//!
//! # Invariants
//! - A validated config always yields a non-zero page size and preview length.

use crate::app::QueryMode;
use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use crate::present::paginate::DEFAULT_PAGE_SIZE;
use crate::present::render::{RenderOptions, DEFAULT_PREVIEW_CHARS};
use crate::store::firestore::{FirestoreSettings, DEFAULT_BASE_URL, DEFAULT_DATABASE};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    Validation(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::Validation(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Validation(_) => None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub source: SourceConfig,
    pub catalog: CatalogSection,
    pub presenter: PresenterSection,
    pub query: QuerySection,
    pub logging: LoggingSection,
}

/// Where publication documents come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// JSON array fixture read into memory.
    JsonFile { path: PathBuf },
    /// Local SQLite snapshot.
    Sqlite { path: PathBuf },
    /// Remote Firestore database.
    Firestore {
        project_id: String,
        #[serde(default = "default_database")]
        database: String,
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default = "default_base_url")]
        base_url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::JsonFile {
            path: PathBuf::from("publications.json"),
        }
    }
}

impl SourceConfig {
    /// Firestore client settings, when this source is remote.
    pub fn firestore_settings(&self) -> Option<FirestoreSettings> {
        match self {
            Self::Firestore {
                project_id,
                database,
                api_key,
                base_url,
                timeout_secs,
            } => Some(FirestoreSettings {
                base_url: base_url.clone(),
                project_id: project_id.clone(),
                database: database.clone(),
                api_key: api_key.clone(),
                timeout: Duration::from_secs(*timeout_secs),
            }),
            Self::JsonFile { .. } | Self::Sqlite { .. } => None,
        }
    }
}

/// Collection addressing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    pub collection: String,
    /// Creation timestamp field used for newest-first ordering.
    pub order_by: String,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            collection: "publications".to_string(),
            order_by: "created_at".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterSection {
    pub page_size: usize,
    pub preview_chars: usize,
}

impl Default for PresenterSection {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE.get(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl PresenterSection {
    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_size).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            preview_chars: self.preview_chars,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySection {
    pub mode: QueryMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    /// Absolute directory for rolling log files; stderr when unset.
    pub dir: Option<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Reads, normalizes and validates a config file.
pub fn load_config(path: &Path) -> ConfigResult<CatalogConfig> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: CatalogConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    normalize(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Trims free-text settings in place.
pub fn normalize(config: &mut CatalogConfig) {
    config.catalog.collection = config.catalog.collection.trim().to_string();
    config.catalog.order_by = config.catalog.order_by.trim().to_string();
    config.logging.level = config.logging.level.trim().to_ascii_lowercase();
    if let Some(dir) = config.logging.dir.take() {
        let dir = dir.trim().to_string();
        config.logging.dir = (!dir.is_empty()).then_some(dir);
    }
    if let SourceConfig::Firestore {
        project_id,
        api_key,
        ..
    } = &mut config.source
    {
        *project_id = project_id.trim().to_string();
        *api_key = api_key
            .take()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
    }
}

/// Checks cross-field constraints.
pub fn validate(config: &CatalogConfig) -> ConfigResult<()> {
    let invalid =
        |message: &str| -> ConfigResult<()> { Err(ConfigError::Validation(message.to_string())) };

    if config.catalog.collection.is_empty() {
        return invalid("catalog.collection must be non-empty.");
    }
    if config.catalog.order_by.is_empty() {
        return invalid("catalog.order_by must be non-empty.");
    }
    if config.presenter.page_size == 0 {
        return invalid("presenter.page_size must be greater than zero.");
    }
    if config.presenter.preview_chars == 0 {
        return invalid("presenter.preview_chars must be greater than zero.");
    }

    match &config.source {
        SourceConfig::JsonFile { path } | SourceConfig::Sqlite { path } => {
            if path.as_os_str().is_empty() {
                return invalid("source.path must be non-empty.");
            }
        }
        SourceConfig::Firestore {
            project_id,
            timeout_secs,
            base_url,
            ..
        } => {
            if project_id.is_empty() {
                return invalid("source.project_id must be non-empty.");
            }
            if *timeout_secs == 0 {
                return invalid("source.timeout_secs must be greater than zero.");
            }
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return invalid("source.base_url must start with http:// or https://.");
            }
        }
    }

    normalize_level(&config.logging.level).map_err(ConfigError::Validation)?;
    if let Some(dir) = config.logging.dir.as_deref() {
        normalize_log_dir(dir).map_err(ConfigError::Validation)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{normalize, validate, CatalogConfig, ConfigError, SourceConfig};
    use crate::app::QueryMode;

    fn parse(raw: &str) -> CatalogConfig {
        let mut config: CatalogConfig = toml::from_str(raw).unwrap();
        normalize(&mut config);
        config
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse("");
        assert_eq!(config.catalog.collection, "publications");
        assert_eq!(config.catalog.order_by, "created_at");
        assert_eq!(config.presenter.page_size, 10);
        assert_eq!(config.presenter.preview_chars, 300);
        assert_eq!(config.query.mode, QueryMode::Independent);
        validate(&config).unwrap();
    }

    #[test]
    fn firestore_source_fills_optional_settings() {
        let config = parse(
            r#"
            [source]
            kind = "firestore"
            project_id = " space-bio "
            api_key = "  "

            [query]
            mode = "compose"
            "#,
        );
        validate(&config).unwrap();
        assert_eq!(config.query.mode, QueryMode::Compose);

        let settings = config.source.firestore_settings().unwrap();
        assert_eq!(settings.project_id, "space-bio");
        assert_eq!(settings.database, "(default)");
        assert_eq!(settings.api_key, None);
        assert_eq!(settings.timeout.as_secs(), 10);
    }

    #[test]
    fn validation_rejects_zero_page_size() {
        let config = parse("[presenter]\npage_size = 0\n");
        let error = validate(&config).unwrap_err();
        assert!(matches!(error, ConfigError::Validation(message) if message.contains("page_size")));
    }

    #[test]
    fn validation_rejects_relative_log_dir() {
        let config = parse("[logging]\nlevel = \"info\"\ndir = \"logs\"\n");
        assert!(validate(&config).is_err());
    }

    #[test]
    fn sqlite_source_parses_path() {
        let config = parse("[source]\nkind = \"sqlite\"\npath = \"/tmp/catalog.sqlite3\"\n");
        assert!(matches!(config.source, SourceConfig::Sqlite { .. }));
        assert!(config.source.firestore_settings().is_none());
    }
}
