//! Error types for autotag-fs

use std::path::PathBuf;

use crate::config::ConfigFormat;

/// Result type for autotag-fs operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Another process holds the advisory lock
    #[error("Could not lock {path}")]
    LockFailed { path: PathBuf },

    #[error("Invalid {format} in {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: ConfigFormat,
        message: String,
    },

    #[error("Could not write {format} to {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: ConfigFormat,
        message: String,
    },

    /// Extension is not one of toml, json, yaml or yml
    #[error("Unsupported config format: {extension:?}")]
    UnsupportedFormat { extension: String },

    #[error("Config file already exists: {path}")]
    ConfigExists { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying I/O error reports a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
