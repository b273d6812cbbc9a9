use std::path::PathBuf;

use fnreview_model::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize configuration: {source}")]
    Serialize {
        #[source]
        source: toml::ser::Error,
    },

    #[error(transparent)]
    Alias(#[from] ConfigError),

    #[error("unknown {section} key '{key}'")]
    UnknownField { section: String, key: String },

    #[error("unknown extraction strategy '{name}'")]
    UnknownStrategy { name: String },

    #[error("unknown extraction mode '{name}'")]
    UnknownMode { name: String },

    #[error("extraction order is empty")]
    EmptyOrder,

    #[error("empty {what} in {section}")]
    EmptyPhrase { section: String, what: String },

    #[error("function '{name}' is declared more than once")]
    DuplicateFunction { name: String },
}

impl ConfigLoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigLoadError>;
