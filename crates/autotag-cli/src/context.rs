//! Vault context detection
//!
//! Finds the vault root and settings from any directory inside it, so
//! commands work from subfolders the way `git` does.

use std::path::{Path, PathBuf};

use autotag_core::config::{DEFAULT_CONFIG_FILE, SettingsLoader, load_file};
use autotag_core::{FsStore, Settings, Tagger};
use autotag_fs::NormalizedPath;

use crate::error::Result;

/// Where a command operates and how it is configured.
#[derive(Debug, Clone)]
pub struct Vault {
    pub root: NormalizedPath,
    /// Explicit config file from `--config`
    pub config: Option<NormalizedPath>,
}

impl Vault {
    /// Resolve the vault from CLI options.
    ///
    /// An explicit `--root` wins; otherwise the nearest ancestor of `cwd`
    /// holding `.autotag.toml`, and finally `cwd` itself.
    pub fn resolve(cwd: &Path, root: Option<PathBuf>, config: Option<PathBuf>) -> Self {
        let root = match root {
            Some(root) if root.is_absolute() => root,
            Some(root) => cwd.join(root),
            None => detect_root(cwd),
        };
        let config = config.map(|path| {
            if path.is_absolute() {
                NormalizedPath::new(path)
            } else {
                NormalizedPath::new(cwd.join(path))
            }
        });
        Self {
            root: NormalizedPath::new(root),
            config,
        }
    }

    /// Path of the config file commands write to.
    pub fn config_path(&self) -> NormalizedPath {
        self.config
            .clone()
            .unwrap_or_else(|| self.root.join(DEFAULT_CONFIG_FILE))
    }

    pub fn settings(&self) -> Result<Settings> {
        let settings = match &self.config {
            Some(path) => load_file(path)?,
            None => SettingsLoader::new(self.root.clone()).load()?,
        };
        Ok(settings)
    }

    pub fn tagger(&self) -> Result<Tagger<FsStore>> {
        let settings = self.settings()?;
        tracing::debug!(root = %self.root, rules = settings.rules.len(), "opening vault");
        Ok(Tagger::new(settings, FsStore::new(self.root.clone()))?)
    }

    /// Turn a user-supplied document path into a vault-relative one.
    ///
    /// Absolute paths inside the vault are made relative; anything else is
    /// taken as already vault-relative.
    pub fn relative(&self, path: &str) -> String {
        let normalized = NormalizedPath::new(path);
        match normalized.strip_prefix(&self.root) {
            Some(relative) if Path::new(path).is_absolute() => relative.as_str().to_string(),
            _ => normalized.as_relative().to_string(),
        }
    }
}

fn detect_root(cwd: &Path) -> PathBuf {
    cwd.ancestors()
        .find(|dir| dir.join(DEFAULT_CONFIG_FILE).is_file())
        .unwrap_or(cwd)
        .to_path_buf()
}
