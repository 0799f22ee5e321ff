//! Configuration
//!
//! [`Settings`] is a plain value handed to the tagger; nothing reads it from
//! a global. [`SettingsLoader`] finds it for a vault:
//!
//! 1. **Vault config** - `<vault>/.autotag.toml`
//! 2. **User config** - `<config_dir>/autotag/config.toml`
//! 3. **Defaults** - [`Settings::default`]
//!
//! The first existing file wins; files are not merged. Any extension
//! `ConfigStore` understands (`toml`, `json`, `yaml`) may be passed to
//! [`load_file`] explicitly.
//!
//! # Example
//!
//! ```toml
//! marker = "<!-- autotag -->"
//! unfiled_tag = "new"
//! rules_file = "rules.txt"
//!
//! [[rules]]
//! folder = "Projects/Alpha"
//! tags = ["alpha", "work"]
//! ```

mod loader;
mod settings;

pub use loader::{DEFAULT_CONFIG_FILE, SettingsLoader, load_file};
pub use settings::Settings;
