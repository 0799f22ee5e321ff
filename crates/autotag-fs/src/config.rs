//! Settings files in TOML, JSON or YAML
//!
//! The format follows the file extension. Files are read and written whole;
//! callers that treat a missing file as "all defaults" use
//! [`ConfigStore::load_or_default`].

use std::fmt;

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// A serialization format chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// The format for `path`, by case-insensitive extension.
    ///
    /// # Errors
    /// Returns `Error::UnsupportedFormat` for any other extension.
    pub fn from_path(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or("");
        match extension.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    fn decode<T: DeserializeOwned>(self, content: &str) -> std::result::Result<T, String> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }

    fn encode<T: Serialize>(self, value: &T) -> std::result::Result<String, String> {
        match self {
            Self::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
            Self::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        })
    }
}

/// Reads and writes settings values, picking the format per file.
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load a value from `path`.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let format = ConfigFormat::from_path(path)?;
        let content = io::read_text(path)?;
        decode(path, format, &content)
    }

    /// Load a value from `path`, or `T::default()` if there is no file.
    ///
    /// Parse errors in an existing file are still reported.
    pub fn load_or_default<T: DeserializeOwned + Default>(
        &self,
        path: &NormalizedPath,
    ) -> Result<T> {
        match self.load(path) {
            Err(e) if e.is_not_found() => {
                tracing::debug!(path = %path, "no config file, using defaults");
                Ok(T::default())
            }
            other => other,
        }
    }

    /// Parse configuration text as if it had been read from `path`.
    pub fn parse<T: DeserializeOwned>(&self, path: &NormalizedPath, content: &str) -> Result<T> {
        decode(path, ConfigFormat::from_path(path)?, content)
    }

    /// Write `value` to `path`, replacing any existing file atomically.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let format = ConfigFormat::from_path(path)?;
        let content = format.encode(value).map_err(|message| Error::ConfigSerialize {
            path: path.to_native(),
            format,
            message,
        })?;
        io::write_atomic(path, content.as_bytes())
    }

    /// Write a fresh config file.
    ///
    /// # Errors
    /// Returns `Error::ConfigExists` if `path` exists and `overwrite` is false.
    pub fn create<T: Serialize>(
        &self,
        path: &NormalizedPath,
        value: &T,
        overwrite: bool,
    ) -> Result<()> {
        if !overwrite && path.exists() {
            return Err(Error::ConfigExists {
                path: path.to_native(),
            });
        }
        self.save(path, value)
    }
}

fn decode<T: DeserializeOwned>(
    path: &NormalizedPath,
    format: ConfigFormat,
    content: &str,
) -> Result<T> {
    format.decode(content).map_err(|message| Error::ConfigParse {
        path: path.to_native(),
        format,
        message,
    })
}
