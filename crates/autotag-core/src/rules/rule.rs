//! Rule type

use serde::{Deserialize, Serialize};

use crate::tags::{TAG_PREFIX, split_tags};

/// A folder-to-tags mapping.
///
/// `tags` holds raw tag strings in configuration order; they are normalized
/// only after all matching rules have been collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Vault-relative folder. Empty means the root, which matches nothing.
    #[serde(default)]
    pub folder: String,
    /// Raw tags contributed by this rule
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Rule {
    pub fn new<I, S>(folder: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            folder: folder.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a rule from a free-form tag string such as `"#a b, c"`.
    pub fn from_tag_string(folder: impl Into<String>, tags: &str) -> Self {
        Self::new(folder, split_tags(tags))
    }

    /// The folder with leading and trailing separators removed.
    pub fn folder_key(&self) -> &str {
        self.folder.trim_matches('/')
    }

    /// Whether this rule can ever match a document.
    pub fn is_active(&self) -> bool {
        !self.folder_key().is_empty()
    }
}

impl std::fmt::Display for Rule {
    /// Renders the textual rule form, `folder => tag1, tag2`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tags: Vec<&str> = self
            .tags
            .iter()
            .map(|t| t.trim().trim_start_matches(TAG_PREFIX))
            .filter(|t| !t.is_empty())
            .collect();
        let folder = self.folder_key();
        if folder.contains(char::is_whitespace) {
            write!(f, "\"{}\" => {}", folder, tags.join(", "))
        } else {
            write!(f, "{} => {}", folder, tags.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_key_strips_separators() {
        let rule = Rule::new("/Projects/A/", ["x"]);
        assert_eq!(rule.folder_key(), "Projects/A");
        assert!(rule.is_active());
    }

    #[test]
    fn test_root_rule_is_inactive() {
        assert!(!Rule::new("/", ["x"]).is_active());
        assert!(!Rule::new("", ["x"]).is_active());
    }

    #[test]
    fn test_from_tag_string() {
        let rule = Rule::from_tag_string("Inbox", "#todo, later  review");
        assert_eq!(rule.tags, ["#todo", "later", "review"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rule::new("A/B", ["#x", "y"]).to_string(), "A/B => x, y");
        assert_eq!(
            Rule::new("My Notes", ["z"]).to_string(),
            "\"My Notes\" => z"
        );
    }
}
