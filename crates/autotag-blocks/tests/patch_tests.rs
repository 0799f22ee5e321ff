//! Integration tests for managed block patching.

use autotag_blocks::{
    BlockAction, DEFAULT_MARKER, Error, close_open_fence, find_block, has_block, patch,
    plan_patch, remove_block, scan, upsert_block,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

const MARKER: &str = "<!--M-->";

// =============================================================================
// Transition table
// =============================================================================

#[rstest]
#[case::absent_empty("Body", &[], "Body", BlockAction::Unchanged)]
#[case::absent_lines("Body", &["#a"], "Body\n\n<!--M-->\n#a", BlockAction::Inserted)]
#[case::present_empty("Body\n\n<!--M-->\n#old", &[], "Body", BlockAction::Removed)]
#[case::present_lines("Body\n\n<!--M-->\n#old", &["#new"], "Body\n\n<!--M-->\n#new", BlockAction::Replaced)]
#[case::present_same("Body\n\n<!--M-->\n#a", &["#a"], "Body\n\n<!--M-->\n#a", BlockAction::Unchanged)]
fn test_transition_table(
    #[case] text: &str,
    #[case] lines: &[&str],
    #[case] expected: &str,
    #[case] action: BlockAction,
) {
    let result = plan_patch(text, MARKER, lines).unwrap();
    assert_eq!(result.text, expected);
    assert_eq!(result.action, action);
    assert_eq!(result.is_changed(), action != BlockAction::Unchanged);
}

// =============================================================================
// Concrete scenarios
// =============================================================================

#[test]
fn test_open_fence_is_closed_before_block() {
    let text = "Hello\n\n```\nopen fence\n";
    let result = patch(text, MARKER, &["#a"]).unwrap();

    assert!(result.ends_with("Hello\n\n```\nopen fence\n```\n\n<!--M-->\n#a"));
}

#[test]
fn test_replace_existing_block() {
    let result = patch("Body\n\n<!--M-->\n#old", MARKER, &["#new"]).unwrap();
    assert_eq!(result, "Body\n\n<!--M-->\n#new");
}

#[test]
fn test_multiple_lines_are_newline_joined() {
    let result = patch("Body\n", MARKER, &["#a", "#b", "#c"]).unwrap();
    assert_eq!(result, "Body\n\n<!--M-->\n#a\n#b\n#c");
}

#[test]
fn test_trailing_whitespace_trimmed_before_insert() {
    let result = patch("Body   \n\n\n\t\n", MARKER, &["#a"]).unwrap();
    assert_eq!(result, "Body\n\n<!--M-->\n#a");
}

#[test]
fn test_insert_after_closed_fence() {
    let text = "Intro\n\n```\ncode\n```\n";
    let result = patch(text, MARKER, &["#a"]).unwrap();

    assert_eq!(result, "Intro\n\n```\ncode\n```\n\n<!--M-->\n#a");
    assert_eq!(scan(&result).len(), 1);
}

#[test]
fn test_dangling_fence_line_is_closed() {
    let result = patch("text\n```", MARKER, &["#a"]).unwrap();
    assert_eq!(result, "text\n```\n```\n\n<!--M-->\n#a");
}

#[test]
fn test_tilde_open_fence_closed_with_tildes() {
    let result = patch("~~~~\nlog line\n", MARKER, &["#a"]).unwrap();
    assert_eq!(result, "~~~~\nlog line\n~~~~\n\n<!--M-->\n#a");
}

// =============================================================================
// Fence awareness
// =============================================================================

#[test]
fn test_marker_inside_fence_is_not_a_block() {
    let text = "Docs\n\n```\n<!--M-->\n#example\n```\n";
    assert!(!has_block(text, MARKER));

    let result = patch(text, MARKER, &["#a"]).unwrap();
    assert_eq!(result, "Docs\n\n```\n<!--M-->\n#example\n```\n\n<!--M-->\n#a");
}

#[test]
fn test_marker_inside_open_fence_is_not_a_block() {
    let text = "Docs\n\n~~~\n<!--M-->\n#example\n";
    assert!(!has_block(text, MARKER));

    let result = patch(text, MARKER, &["#a"]).unwrap();
    assert_eq!(
        result,
        "Docs\n\n~~~\n<!--M-->\n#example\n~~~\n\n<!--M-->\n#a"
    );
}

#[test]
fn test_block_after_fenced_marker_is_found() {
    let text = "```\n<!--M-->\n```\n\n<!--M-->\n#real";
    let block = find_block(text, MARKER).unwrap();

    assert_eq!(block.start, 18);
    assert_eq!(block.content, "#real");
}

#[test]
fn test_remove_keeps_fenced_marker() {
    let text = "```\n<!--M-->\n```\n\n<!--M-->\n#real";
    let result = remove_block(text, MARKER).unwrap();

    assert_eq!(result, "```\n<!--M-->\n```");
}

// =============================================================================
// Removal and idempotence
// =============================================================================

#[test]
fn test_removal_round_trip() {
    let original = "# Title\n\nSome text.";
    let with_block = patch(original, MARKER, &["#a"]).unwrap();
    let removed = patch(&with_block, MARKER, &[] as &[&str]).unwrap();

    assert_eq!(removed, original);
    assert_eq!(removed, patch(original, MARKER, &[] as &[&str]).unwrap());
}

#[rstest]
#[case::one_newline("Body\n<!--M-->\n#a")]
#[case::blank_line("Body\n\n<!--M-->\n#a")]
#[case::two_blank_lines("Body\n\n\n<!--M-->\n#a")]
#[case::three_blank_lines("Body\n\n\n\n<!--M-->\n#a")]
fn test_removal_ignores_blank_line_count(#[case] text: &str) {
    assert_eq!(remove_block(text, MARKER).unwrap(), "Body");
}

#[test]
fn test_remove_is_noop_without_block() {
    assert_eq!(remove_block("Body\n", MARKER).unwrap(), "Body\n");
}

#[test]
fn test_remove_block_that_fills_document() {
    assert_eq!(remove_block("<!--M-->\n#a", MARKER).unwrap(), "");
}

#[test]
fn test_patch_twice_is_patch_once() {
    let text = "Hello\n\n```\nopen fence\n";
    let once = patch(text, MARKER, &["#a", "#b"]).unwrap();
    let twice = plan_patch(&once, MARKER, &["#a", "#b"]).unwrap();

    assert_eq!(twice.text, once);
    assert_eq!(twice.action, BlockAction::Unchanged);
}

#[test]
fn test_upsert_with_no_lines_keeps_text() {
    let text = "Body\n\n<!--M-->\n#a";
    assert_eq!(upsert_block(text, MARKER, &[] as &[&str]).unwrap(), text);
}

// =============================================================================
// Markers
// =============================================================================

#[test]
fn test_default_marker() {
    let result = patch("Note", DEFAULT_MARKER, &["#x"]).unwrap();
    assert_eq!(result, "Note\n\n<!-- autotag -->\n#x");
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("<!--\nM-->")]
#[case("~~~marker")]
fn test_invalid_marker_rejected(#[case] marker: &str) {
    let result = patch("Body", marker, &["#a"]);
    assert!(matches!(result, Err(Error::InvalidMarker { .. })));
}

#[test]
fn test_close_open_fence_is_noop_when_balanced() {
    let text = "```\ncode\n```\n";
    assert_eq!(close_open_fence(text), text);
}

#[test]
fn test_rendered_document() {
    let text = "# Meeting notes\n\n```sh\ncargo run\n";
    let result = patch(text, DEFAULT_MARKER, &["#work", "#2025-08-31-14-35"]).unwrap();

    insta::assert_snapshot!(result, @r"
    # Meeting notes

    ```sh
    cargo run
    ```

    <!-- autotag -->
    #work
    #2025-08-31-14-35
    ");
}
