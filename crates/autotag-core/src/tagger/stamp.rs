//! Creation-time stamps for tags and titles

use autotag_fs::NormalizedPath;
use chrono::NaiveDateTime;

use crate::tags::TAG_PREFIX;

/// Minute-resolution stamp, e.g. `2025-08-31-14-35`.
pub const STAMP_FORMAT: &str = "%Y-%m-%d-%H-%M";

pub fn stamp(created: NaiveDateTime) -> String {
    created.format(STAMP_FORMAT).to_string()
}

/// The creation tag, e.g. `#2025-08-31-14-35`.
pub fn timestamp_tag(created: NaiveDateTime) -> String {
    format!("{}{}", TAG_PREFIX, stamp(created))
}

/// The creation time recorded by a creation tag, at minute resolution.
///
/// Returns `None` for anything [`timestamp_tag`] would not produce.
pub fn parse_timestamp_tag(tag: &str) -> Option<NaiveDateTime> {
    let text = tag.strip_prefix(TAG_PREFIX)?;
    let created = NaiveDateTime::parse_from_str(text, STAMP_FORMAT).ok()?;
    // chrono accepts unpadded fields; only the canonical spelling counts
    (stamp(created) == text).then_some(created)
}

/// A free path next to `path` named after its creation stamp.
///
/// Tries `<stamp>.<ext>`, then `<stamp>-1.<ext>`, `<stamp>-2.<ext>` and so
/// on. A document that already carries its candidate name keeps it.
pub fn stamped_path(path: &str, created: NaiveDateTime, taken: impl Fn(&str) -> bool) -> String {
    let current = NormalizedPath::new(NormalizedPath::new(path).as_relative());
    let base = stamp(created);
    let extension = current
        .extension()
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default();

    let mut suffix = 0usize;
    loop {
        let name = if suffix == 0 {
            format!("{}{}", base, extension)
        } else {
            format!("{}-{}{}", base, suffix, extension)
        };
        let candidate = current.with_file_name(&name);
        if candidate == current || !taken(candidate.as_str()) {
            return candidate.as_str().to_string();
        }
        suffix += 1;
    }
}
