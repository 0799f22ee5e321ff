//! Settings discovery and loading

use std::path::{Path, PathBuf};

use autotag_fs::{ConfigStore, NormalizedPath, io};

use super::settings::Settings;
use crate::rules::parse_rules;
use crate::{Error, Result};

/// Config file looked up in the vault root.
pub const DEFAULT_CONFIG_FILE: &str = ".autotag.toml";

/// Finds and loads [`Settings`] for a vault.
///
/// Lookup order:
/// 1. `<vault>/.autotag.toml`
/// 2. `<config_dir>/autotag/config.toml`
/// 3. built-in defaults
pub struct SettingsLoader {
    root: NormalizedPath,

    /// Override for the user config directory (used for testing).
    /// When `None`, `dirs::config_dir()` is used.
    user_config_dir_override: Option<PathBuf>,
}

impl SettingsLoader {
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            user_config_dir_override: None,
        }
    }

    /// Create a loader with a custom user config directory.
    pub fn with_user_config_dir(root: NormalizedPath, user_config_dir: PathBuf) -> Self {
        Self {
            root,
            user_config_dir_override: Some(user_config_dir),
        }
    }

    fn user_config_dir(&self) -> Option<PathBuf> {
        if let Some(ref dir) = self.user_config_dir_override {
            return Some(dir.clone());
        }
        dirs::config_dir().map(|d| d.join("autotag"))
    }

    /// Path of the vault-level config file, whether or not it exists.
    pub fn vault_config_path(&self) -> NormalizedPath {
        self.root.join(DEFAULT_CONFIG_FILE)
    }

    /// The first existing config file in lookup order.
    pub fn discover(&self) -> Option<NormalizedPath> {
        let vault = self.vault_config_path();
        if vault.is_file() {
            return Some(vault);
        }
        self.user_config_dir()
            .map(|dir| NormalizedPath::new(dir.join("config.toml")))
            .filter(NormalizedPath::is_file)
    }

    /// Load the discovered config, or defaults when there is none.
    pub fn load(&self) -> Result<Settings> {
        match self.discover() {
            Some(path) => load_file(&path),
            None => {
                tracing::debug!(root = %self.root, "no config found, using defaults");
                Ok(Settings::default())
            }
        }
    }
}

/// Load settings from an explicit file.
///
/// Rules read from `rules_file` are appended after the structured rules.
///
/// # Errors
/// Returns `Error::ConfigNotFound` if `path` does not exist, and the
/// underlying parse or I/O error if the file or its rules file cannot be
/// read.
pub fn load_file(path: &NormalizedPath) -> Result<Settings> {
    if !path.is_file() {
        return Err(Error::ConfigNotFound {
            path: path.to_native(),
        });
    }

    let mut settings: Settings = ConfigStore::new().load(path)?;

    if let Some(rules_file) = settings.rules_file.clone() {
        let rules_path = resolve_relative(path, &rules_file);
        let text = io::read_text(&rules_path)?;
        let parsed = parse_rules(&text);
        tracing::debug!(path = %rules_path, rules = parsed.len(), "loaded rules file");
        settings.rules.extend(parsed);
    }

    tracing::debug!(path = %path, rules = settings.rules.len(), "loaded settings");
    Ok(settings)
}

fn resolve_relative(config: &NormalizedPath, target: &Path) -> NormalizedPath {
    if target.is_absolute() {
        return NormalizedPath::new(target);
    }
    let base = config.parent().unwrap_or_else(|| NormalizedPath::new(""));
    base.join(&target.to_string_lossy())
}
