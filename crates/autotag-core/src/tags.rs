//! Tag normalization
//!
//! Every tag written to a managed block has exactly one leading `#`, no
//! surrounding whitespace, and appears once. Order is the order of first
//! occurrence.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Leading character of every normalized tag.
pub const TAG_PREFIX: char = '#';

/// Separators accepted between tags in free-form tag strings.
static TAG_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,]+").expect("Invalid tag separator regex"));

/// An ordered, duplicate-free set of normalized tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes and adds `raw`, keeping the first occurrence on duplicates.
    ///
    /// Returns `true` if a new tag was added.
    pub fn insert(&mut self, raw: &str) -> bool {
        match normalize_tag(raw) {
            Some(tag) if !self.contains(&tag) => {
                self.0.push(tag);
                true
            }
            _ => false,
        }
    }

    /// Whether the set holds `tag`. The argument is normalized first.
    pub fn contains(&self, tag: &str) -> bool {
        match normalize_tag(tag) {
            Some(tag) => self.0.iter().any(|t| *t == tag),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<S: AsRef<str>> Extend<S> for TagSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for raw in iter {
            self.insert(raw.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for TagSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for TagSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// Normalizes a single tag, or `None` if nothing is left of it.
///
/// Leading `#` characters are collapsed to one, so `tag`, `#tag`, `##tag`
/// and ` tag ` all become `#tag`.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let body = raw.trim().trim_start_matches(TAG_PREFIX).trim();
    if body.is_empty() {
        None
    } else {
        Some(format!("{}{}", TAG_PREFIX, body))
    }
}

/// Normalizes a collection of raw tags into a [`TagSet`].
///
/// Pure and total: any input, including an empty one, yields a valid set.
///
/// # Example
/// ```
/// use autotag_core::tags::normalize;
///
/// let tags = normalize(["foo", "#foo", " foo ", "bar"]);
/// assert_eq!(tags.as_slice(), ["#foo", "#bar"]);
/// ```
pub fn normalize<I, S>(raw: I) -> TagSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter().collect()
}

/// Splits a free-form tag string on whitespace and commas.
///
/// `"#a b, c"` yields `["#a", "b", "c"]`. Tags are not normalized.
pub fn split_tags(s: &str) -> Vec<String> {
    TAG_SEPARATORS
        .split(s)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("foo", Some("#foo"))]
    #[case("#foo", Some("#foo"))]
    #[case(" foo ", Some("#foo"))]
    #[case("##foo", Some("#foo"))]
    #[case("# foo", Some("#foo"))]
    #[case("#", None)]
    #[case("   ", None)]
    #[case("", None)]
    fn test_normalize_tag(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(normalize_tag(raw).as_deref(), expected);
    }

    #[test]
    fn test_normalize_dedupes_to_single() {
        let tags = normalize(["foo", "#foo", " foo "]);
        assert_eq!(tags.as_slice(), ["#foo"]);
    }

    #[test]
    fn test_normalize_empty() {
        let tags = normalize(Vec::<String>::new());
        assert!(tags.is_empty());
    }

    #[test]
    fn test_normalize_keeps_first_occurrence_order() {
        let tags = normalize(["b", "a", "#b", "c", "a"]);
        assert_eq!(tags.as_slice(), ["#b", "#a", "#c"]);
    }

    #[test]
    fn test_normalize_is_case_sensitive() {
        let tags = normalize(["Work", "work"]);
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags("#a b, c,,d"), ["#a", "b", "c", "d"]);
        assert!(split_tags("  , ").is_empty());
    }

    #[test]
    fn test_insert_reports_new() {
        let mut tags = TagSet::new();
        assert!(tags.insert("x"));
        assert!(!tags.insert("#x"));
        assert!(!tags.insert(" "));
        assert!(tags.contains("x"));
    }

    #[test]
    fn test_display_joins_with_space() {
        assert_eq!(normalize(["a", "b"]).to_string(), "#a #b");
    }
}
