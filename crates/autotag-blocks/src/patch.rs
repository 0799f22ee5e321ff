//! Managed block patching.
//!
//! The managed block starts at the first occurrence of the marker that lies
//! outside every fence and runs to the end of the document. Whatever follows
//! the marker is owned by this module and rewritten wholesale.
//!
//! | block   | desired lines | result                                         |
//! |---------|---------------|------------------------------------------------|
//! | absent  | empty         | unchanged                                      |
//! | absent  | non-empty     | close a trailing open fence, append the block  |
//! | present | empty         | block and its separator removed                |
//! | present | non-empty     | block replaced in place                        |

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::fence::{self, FenceScan};

/// Marker used when the caller does not configure one.
pub const DEFAULT_MARKER: &str = "<!-- autotag -->";

/// What a patch did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAction {
    /// The document already matched the desired state.
    Unchanged,
    /// A new block was appended.
    Inserted,
    /// An existing block was rewritten.
    Replaced,
    /// An existing block was removed.
    Removed,
}

impl std::fmt::Display for BlockAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Unchanged => "unchanged",
            Self::Inserted => "inserted",
            Self::Replaced => "replaced",
            Self::Removed => "removed",
        };
        f.write_str(label)
    }
}

/// The outcome of patching a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// The full new document text.
    pub text: String,
    pub action: BlockAction,
}

impl Patch {
    /// Whether the new text differs from the input.
    pub fn is_changed(&self) -> bool {
        self.action != BlockAction::Unchanged
    }
}

/// A managed block located in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedBlock {
    /// Byte offset of the marker.
    pub start: usize,
    /// Everything after the marker line, up to the end of the document.
    pub content: String,
}

impl ManagedBlock {
    /// Non-empty content lines, trimmed.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }

    /// Whether `token` appears as a whitespace-separated word in the block.
    pub fn contains_token(&self, token: &str) -> bool {
        self.content.split_whitespace().any(|word| word == token)
    }
}

/// Checks that `marker` can delimit a managed block.
///
/// # Errors
/// Returns `Error::InvalidMarker` if the marker is blank, spans more than one
/// line, or contains a fence delimiter run.
pub fn validate_marker(marker: &str) -> Result<()> {
    if marker.trim().is_empty() {
        return Err(Error::invalid_marker(marker, "marker is empty"));
    }
    if marker.contains(['\n', '\r']) {
        return Err(Error::invalid_marker(marker, "marker spans multiple lines"));
    }
    if marker.contains("```") || marker.contains("~~~") {
        return Err(Error::invalid_marker(
            marker,
            "marker contains a fence delimiter",
        ));
    }
    Ok(())
}

/// Locates the managed block in `text`.
///
/// Marker occurrences inside complete or unterminated fences are skipped.
///
/// # Example
/// ```
/// use autotag_blocks::find_block;
///
/// let text = "Body\n\n<!-- autotag -->\n#a\n#b";
/// let block = find_block(text, "<!-- autotag -->").unwrap();
/// assert_eq!(block.lines().collect::<Vec<_>>(), vec!["#a", "#b"]);
/// ```
pub fn find_block(text: &str, marker: &str) -> Option<ManagedBlock> {
    if marker.is_empty() {
        return None;
    }
    let fences = FenceScan::new(text);
    locate(text, marker, &fences).map(|start| {
        let after = &text[start + marker.len()..];
        ManagedBlock {
            start,
            content: after.strip_prefix('\n').unwrap_or(after).to_string(),
        }
    })
}

/// Whether `text` contains a managed block for `marker`.
pub fn has_block(text: &str, marker: &str) -> bool {
    find_block(text, marker).is_some()
}

fn locate(text: &str, marker: &str, fences: &FenceScan) -> Option<usize> {
    text.match_indices(marker)
        .map(|(start, _)| start)
        .find(|&start| !fences.overlaps(start..start + marker.len()))
}

fn format_block<S: AsRef<str>>(marker: &str, lines: &[S]) -> String {
    let mut block = String::from(marker);
    for line in lines {
        block.push('\n');
        block.push_str(line.as_ref());
    }
    block
}

/// Closes a fence left open at the end of `text`.
///
/// Trailing whitespace is trimmed and a closing run of the same kind and
/// length is added on its own line. Text without an open fence is returned
/// as is.
///
/// # Example
/// ```
/// use autotag_blocks::close_open_fence;
///
/// assert_eq!(close_open_fence("~~~~\nlog\n"), "~~~~\nlog\n~~~~");
/// assert_eq!(close_open_fence("plain\n"), "plain\n");
/// ```
pub fn close_open_fence(text: &str) -> Cow<'_, str> {
    match fence::open_fence_at_end(text) {
        Some(open) => Cow::Owned(format!("{}\n{}", text.trim_end(), open.closer())),
        None => Cow::Borrowed(text),
    }
}

/// Computes the new document text and reports what changed.
///
/// # Errors
/// Returns `Error::InvalidMarker` if the marker fails [`validate_marker`].
pub fn plan_patch<S: AsRef<str>>(text: &str, marker: &str, lines: &[S]) -> Result<Patch> {
    validate_marker(marker)?;

    let fences = FenceScan::new(text);
    let existing = locate(text, marker, &fences);

    let (new_text, action) = match (existing, lines.is_empty()) {
        (None, true) => (text.to_string(), BlockAction::Unchanged),
        (None, false) => (append_block(text, marker, lines), BlockAction::Inserted),
        (Some(start), true) => (strip_block(text, start), BlockAction::Removed),
        (Some(start), false) => {
            let mut replaced = text[..start].to_string();
            replaced.push_str(&format_block(marker, lines));
            (replaced, BlockAction::Replaced)
        }
    };

    let action = if new_text == text {
        BlockAction::Unchanged
    } else {
        action
    };
    tracing::debug!(%action, marker, lines = lines.len(), "planned block patch");

    Ok(Patch {
        text: new_text,
        action,
    })
}

/// Returns the document with its managed block set to `lines`.
///
/// An empty `lines` removes the block. Applying the same patch twice gives
/// the same text as applying it once.
///
/// # Errors
/// Returns `Error::InvalidMarker` if the marker fails [`validate_marker`].
///
/// # Example
/// ```
/// use autotag_blocks::patch;
///
/// let text = patch("Body", "<!--M-->", &["#a"]).unwrap();
/// assert_eq!(text, "Body\n\n<!--M-->\n#a");
/// assert_eq!(patch(&text, "<!--M-->", &["#a"]).unwrap(), text);
/// ```
pub fn patch<S: AsRef<str>>(text: &str, marker: &str, lines: &[S]) -> Result<String> {
    plan_patch(text, marker, lines).map(|patch| patch.text)
}

/// Inserts the block or replaces an existing one.
///
/// # Errors
/// Returns `Error::InvalidMarker` if the marker fails [`validate_marker`].
pub fn upsert_block<S: AsRef<str>>(text: &str, marker: &str, lines: &[S]) -> Result<String> {
    if lines.is_empty() {
        return Ok(text.to_string());
    }
    patch(text, marker, lines)
}

/// Removes the managed block, if present.
///
/// # Errors
/// Returns `Error::InvalidMarker` if the marker fails [`validate_marker`].
pub fn remove_block(text: &str, marker: &str) -> Result<String> {
    patch::<&str>(text, marker, &[])
}

fn append_block<S: AsRef<str>>(text: &str, marker: &str, lines: &[S]) -> String {
    let repaired = close_open_fence(text);
    let at = fence::safe_append_offset(&repaired);
    let before = repaired[..at].trim_end();
    let block = format_block(marker, lines);

    if before.is_empty() {
        block
    } else {
        format!("{}\n\n{}", before, block)
    }
}

/// Drops the block along with every line break separating it from the body,
/// so removal undoes an append regardless of how many blank lines were there.
fn strip_block(text: &str, start: usize) -> String {
    text[..start]
        .trim_end_matches(['\n', '\r'])
        .to_string()
}
