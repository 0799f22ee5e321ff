//! Settings value consumed by the tagger

use std::path::PathBuf;

use autotag_blocks::DEFAULT_MARKER;
use autotag_fs::NormalizedPath;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::rules::{Rule, RuleResolver};
use crate::tags::normalize_tag;

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_true() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string()]
}

fn default_unfiled_tag() -> String {
    "new".to_string()
}

/// Tagging behaviour for one vault.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Literal string that starts the managed block
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Match rule folders recursively instead of immediate children only
    #[serde(default = "default_true")]
    pub recursive: bool,

    /// File extensions (without the dot) of documents that get tagged
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Tag applied when no rule matches
    #[serde(default = "default_unfiled_tag")]
    pub unfiled_tag: String,

    #[serde(default = "default_true")]
    pub add_unfiled_on_create: bool,

    #[serde(default = "default_true")]
    pub remove_unfiled_on_rename: bool,

    /// Add a `#YYYY-MM-DD-HH-MM` tag from the document's creation time
    #[serde(default = "default_true")]
    pub stamp_created_tag: bool,

    /// Rename new documents to their creation timestamp
    #[serde(default)]
    pub stamp_title_on_create: bool,

    /// Structured rules, in priority-free configuration order
    #[serde(default)]
    pub rules: Vec<Rule>,

    /// Optional textual rules file, relative to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            recursive: true,
            extensions: default_extensions(),
            unfiled_tag: default_unfiled_tag(),
            add_unfiled_on_create: true,
            remove_unfiled_on_rename: true,
            stamp_created_tag: true,
            stamp_title_on_create: false,
            rules: Vec::new(),
            rules_file: None,
        }
    }
}

impl Settings {
    /// Parse settings from TOML content.
    ///
    /// `rules_file` is not followed; use [`crate::config::SettingsLoader`]
    /// for that.
    ///
    /// # Example
    /// ```
    /// use autotag_core::config::Settings;
    ///
    /// let settings = Settings::parse(r#"
    /// recursive = false
    ///
    /// [[rules]]
    /// folder = "Projects"
    /// tags = ["work"]
    /// "#).unwrap();
    ///
    /// assert!(!settings.recursive);
    /// assert_eq!(settings.rules.len(), 1);
    /// assert_eq!(settings.unfiled_tag, "new");
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        Ok(settings)
    }

    /// The configured marker, or the default when it is blank.
    pub fn marker(&self) -> &str {
        if self.marker.trim().is_empty() {
            DEFAULT_MARKER
        } else {
            &self.marker
        }
    }

    /// The unfiled tag in normalized form, if it is not blank.
    pub fn unfiled(&self) -> Option<String> {
        normalize_tag(&self.unfiled_tag)
    }

    /// Whether documents at `path` are tagged at all.
    ///
    /// Extensions compare case-insensitively and may be configured with or
    /// without a leading dot.
    pub fn is_eligible(&self, path: &str) -> bool {
        let path = NormalizedPath::new(path);
        let Some(extension) = path.extension() else {
            return false;
        };
        self.extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }

    /// A resolver over the configured rules using the configured matching.
    pub fn resolver(&self) -> RuleResolver<'_> {
        RuleResolver::with_recursion(&self.rules, self.recursive)
    }
}
