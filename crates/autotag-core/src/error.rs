//! Error types for autotag-core

use std::path::PathBuf;

/// Result type for autotag-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in autotag-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document store has no document at this path
    #[error("Document not found: {path}")]
    DocumentNotFound { path: String },

    /// A rename target is already taken
    #[error("Document already exists: {path}")]
    DocumentExists { path: String },

    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// A document path that cannot name a document
    #[error("Invalid document path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// Filesystem error from autotag-fs
    #[error(transparent)]
    Fs(#[from] autotag_fs::Error),

    /// TOML settings parse error
    #[error("Invalid settings: {0}")]
    Toml(#[from] toml::de::Error),

    /// Block patching error from autotag-blocks
    #[error(transparent)]
    Blocks(#[from] autotag_blocks::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
