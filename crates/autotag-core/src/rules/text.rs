//! Textual rule format
//!
//! One rule per line:
//!
//! ```text
//! # comment
//! Projects/Alpha => alpha, work
//! "Daily Notes" => #journal
//! ```
//!
//! Malformed lines are skipped, never reported as errors.

use super::rule::Rule;
use crate::tags::TAG_PREFIX;

/// Token between the folder and its tags.
const SEPARATOR: &str = "=>";

/// Parses rules from their textual form, skipping malformed lines.
///
/// # Example
/// ```
/// use autotag_core::rules::parse_rules;
///
/// let rules = parse_rules("A => x, #y\nnot a rule\n");
/// assert_eq!(rules.len(), 1);
/// assert_eq!(rules[0].tags, ["x", "y"]);
/// ```
pub fn parse_rules(text: &str) -> Vec<Rule> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(idx + 1, line))
        .collect()
}

fn parse_line(number: usize, line: &str) -> Option<Rule> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut parts = line.split(SEPARATOR);
    let (Some(folder), Some(tags), None) = (parts.next(), parts.next(), parts.next()) else {
        tracing::debug!(line = number, "skipping rule line without exactly one `=>`");
        return None;
    };

    let tags = tags
        .split(',')
        .map(|tag| {
            let tag = tag.trim();
            tag.strip_prefix(TAG_PREFIX).unwrap_or(tag)
        })
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>();

    Some(Rule::new(strip_quotes(folder.trim()), tags))
}

fn strip_quotes(token: &str) -> &str {
    for quote in ['"', '\''] {
        if token.len() >= 2
            && let Some(inner) = token
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    token
}

/// Renders rules in their textual form, one per line.
pub fn format_rules(rules: &[Rule]) -> String {
    rules.iter().map(|rule| format!("{}\n", rule)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_basic() {
        let rules = parse_rules("Projects/A => a, b\nInbox => todo");
        assert_eq!(
            rules,
            vec![Rule::new("Projects/A", ["a", "b"]), Rule::new("Inbox", ["todo"])]
        );
    }

    #[test]
    fn test_blank_and_comment_lines_ignored() {
        let rules = parse_rules("\n# heading\n   \n  # indented comment\nA => x\n");
        assert_eq!(rules, vec![Rule::new("A", ["x"])]);
    }

    #[test]
    fn test_lines_without_single_separator_skipped() {
        let rules = parse_rules("no separator\nA => x => y\nB => z");
        assert_eq!(rules, vec![Rule::new("B", ["z"])]);
    }

    #[test]
    fn test_quotes_stripped_from_folder() {
        let rules = parse_rules("\"Daily Notes\" => journal\n'Work' => job");
        assert_eq!(rules[0].folder, "Daily Notes");
        assert_eq!(rules[1].folder, "Work");
    }

    #[test]
    fn test_single_quote_char_is_kept() {
        assert_eq!(strip_quotes("\""), "\"");
        assert_eq!(strip_quotes("\"a'"), "\"a'");
    }

    #[test]
    fn test_one_leading_hash_stripped() {
        let rules = parse_rules("A => #x, ##y, , z ");
        assert_eq!(rules[0].tags, ["x", "#y", "z"]);
    }

    #[test]
    fn test_format_round_trips() {
        let rules = vec![Rule::new("A/B", ["x", "y"]), Rule::new("Daily Notes", ["j"])];
        assert_eq!(parse_rules(&format_rules(&rules)), rules);
    }
}
