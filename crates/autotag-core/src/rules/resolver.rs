//! Rule resolution
//!
//! Every rule whose folder matches a document path contributes its tags, in
//! rule order. There is no priority between rules: the result is a union.
//! Normalization and deduplication happen downstream.

use autotag_fs::NormalizedPath;

use super::rule::Rule;

/// Decides whether a rule folder applies to a document path.
///
/// Both arguments are already cleaned: `folder` has no leading or trailing
/// separator and is never empty, `path` is vault-relative with forward
/// slashes.
pub trait FolderMatcher: Send + Sync {
    fn matches(&self, folder: &str, path: &str) -> bool;
}

/// Matches documents anywhere below the folder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Recursive;

impl FolderMatcher for Recursive {
    fn matches(&self, folder: &str, path: &str) -> bool {
        path == folder
            || path
                .strip_prefix(folder)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Matches only documents directly inside the folder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateChildren;

impl FolderMatcher for ImmediateChildren {
    fn matches(&self, folder: &str, path: &str) -> bool {
        path.rsplit_once('/')
            .is_some_and(|(parent, _)| parent == folder)
    }
}

/// Tags collected for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Raw tags of all matching rules, in rule order
    pub tags: Vec<String>,
    /// Number of rules that matched
    pub matched: usize,
}

impl Resolution {
    pub fn is_unmatched(&self) -> bool {
        self.matched == 0
    }
}

/// Resolves rule tags for document paths.
pub struct RuleResolver<'a> {
    rules: &'a [Rule],
    matcher: &'static dyn FolderMatcher,
}

impl<'a> RuleResolver<'a> {
    /// A resolver using recursive folder matching.
    pub fn new(rules: &'a [Rule]) -> Self {
        Self {
            rules,
            matcher: &Recursive,
        }
    }

    /// A resolver whose matching strategy follows the `recursive` toggle.
    pub fn with_recursion(rules: &'a [Rule], recursive: bool) -> Self {
        let matcher: &'static dyn FolderMatcher = if recursive {
            &Recursive
        } else {
            &ImmediateChildren
        };
        Self { rules, matcher }
    }

    /// Rules that apply to `path`, in configuration order.
    pub fn matching(&self, path: &str) -> impl Iterator<Item = &'a Rule> {
        let path = NormalizedPath::new(path);
        let matcher = self.matcher;
        let rules = self.rules;
        rules.iter().filter(move |rule| {
            rule.is_active() && matcher.matches(rule.folder_key(), path.as_relative())
        })
    }

    pub fn resolve(&self, path: &str) -> Resolution {
        let mut resolution = Resolution::default();
        for rule in self.matching(path) {
            resolution.matched += 1;
            resolution.tags.extend(rule.tags.iter().cloned());
        }
        tracing::trace!(path, matched = resolution.matched, "resolved rule tags");
        resolution
    }
}

/// Raw tags that `rules` assign to `path`, with recursive matching.
///
/// # Example
/// ```
/// use autotag_core::rules::{Rule, resolve};
///
/// let rules = vec![Rule::new("A", ["x"]), Rule::new("A/B", ["y"])];
/// assert_eq!(resolve("A/B/note.md", &rules), ["x", "y"]);
/// ```
pub fn resolve(path: &str, rules: &[Rule]) -> Vec<String> {
    RuleResolver::new(rules).resolve(path).tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("A", "A/note.md", true)]
    #[case("A", "A/B/note.md", true)]
    #[case("A", "A", true)]
    #[case("A", "AB/note.md", false)]
    #[case("A/B", "A/note.md", false)]
    fn test_recursive(#[case] folder: &str, #[case] path: &str, #[case] expected: bool) {
        assert_eq!(Recursive.matches(folder, path), expected);
    }

    #[rstest]
    #[case("A", "A/note.md", true)]
    #[case("A", "A/B/note.md", false)]
    #[case("A/B", "A/B/note.md", true)]
    #[case("A", "note.md", false)]
    fn test_immediate_children(#[case] folder: &str, #[case] path: &str, #[case] expected: bool) {
        assert_eq!(ImmediateChildren.matches(folder, path), expected);
    }

    #[test]
    fn test_union_in_rule_order() {
        let rules = vec![Rule::new("A", ["x"]), Rule::new("A/B", ["y"])];
        let resolution = RuleResolver::new(&rules).resolve("A/B/note.md");
        assert_eq!(resolution.tags, ["x", "y"]);
        assert_eq!(resolution.matched, 2);
    }

    #[test]
    fn test_empty_folder_never_matches() {
        let rules = vec![Rule::new("", ["all"]), Rule::new("/", ["root"])];
        let resolution = RuleResolver::new(&rules).resolve("note.md");
        assert!(resolution.is_unmatched());
        assert!(resolution.tags.is_empty());
    }

    #[test]
    fn test_path_forms_are_normalized() {
        let rules = vec![Rule::new("/A/", ["x"])];
        assert_eq!(resolve("/A/n.md", &rules), ["x"]);
        assert_eq!(resolve("./A/n.md", &rules), ["x"]);
        assert_eq!(resolve("A\\n.md", &rules), ["x"]);
    }

    #[test]
    fn test_non_recursive_toggle() {
        let rules = vec![Rule::new("A", ["x"]), Rule::new("A/B", ["y"])];
        let resolver = RuleResolver::with_recursion(&rules, false);
        assert_eq!(resolver.resolve("A/B/note.md").tags, ["y"]);
        assert_eq!(resolver.resolve("A/note.md").tags, ["x"]);
    }
}
