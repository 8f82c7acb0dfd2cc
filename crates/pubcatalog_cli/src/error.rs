use pubcatalog_core::{ConfigError, LoadError, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Top-level CLI failure; `Display` is what the user sees.
#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Logging(String),
    /// Load failed; the user-facing message was already printed.
    Load(LoadError),
    Store(StoreError),
    Io(std::io::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(message) => write!(f, "failed to start logging: {message}"),
            Self::Load(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Load(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Logging(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LoadError> for CliError {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
