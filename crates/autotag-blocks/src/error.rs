//! Error types for autotag-blocks

/// Result type for autotag-blocks operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid block marker {marker:?}: {reason}")]
    InvalidMarker { marker: String, reason: String },
}

impl Error {
    pub fn invalid_marker(marker: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidMarker {
            marker: marker.into(),
            reason: reason.into(),
        }
    }
}
