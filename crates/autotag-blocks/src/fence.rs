//! Fenced literal region scanning.
//!
//! Recognizes fences line by line with a two-state machine (outside, or
//! inside a fence of a given kind):
//!
//! - A line opens a fence when, after at most three spaces of indentation, it
//!   starts with a run of three or more backticks or tildes. A backtick
//!   opener's info string may not contain a backtick.
//! - A fence closes at the first later line holding only a run of the same
//!   character at least as long as the opener (plus trailing whitespace).
//! - Fences do not nest and the two kinds never close each other.
//!
//! An opener on the last line of a document counts even without a trailing
//! newline: anything appended after it would otherwise turn it into a real
//! opener and swallow the appended text.

use std::ops::Range;

/// Maximum indentation before a fence delimiter.
const MAX_INDENT: usize = 3;

/// Minimum delimiter run length.
const MIN_RUN: usize = 3;

/// The delimiter family of a fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FenceKind {
    /// ```` ``` ````
    Backtick,
    /// `~~~`
    Tilde,
}

impl FenceKind {
    /// The character the delimiter run is made of.
    pub fn delimiter(self) -> char {
        match self {
            Self::Backtick => '`',
            Self::Tilde => '~',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '`' => Some(Self::Backtick),
            '~' => Some(Self::Tilde),
            _ => None,
        }
    }

    /// A delimiter run of this kind with `run` characters.
    pub fn run(self, run: usize) -> String {
        std::iter::repeat_n(self.delimiter(), run).collect()
    }
}

/// One complete fenced region, `[start, end)` in bytes.
///
/// `start` is the beginning of the opening line, `end` the position just
/// past the closing delimiter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSpan {
    pub start: usize,
    pub end: usize,
    pub kind: FenceKind,
    /// Length of the opening delimiter run.
    pub run: usize,
}

impl FenceSpan {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.range().contains(&offset)
    }
}

/// A fence opened but never closed before the end of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenFence {
    /// Beginning of the opening line.
    pub start: usize,
    pub kind: FenceKind,
    pub run: usize,
}

impl OpenFence {
    /// The delimiter line that closes this fence.
    pub fn closer(&self) -> String {
        self.kind.run(self.run)
    }
}

/// Result of scanning a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceScan {
    /// Complete fences, left to right.
    pub spans: Vec<FenceSpan>,
    /// The trailing unterminated fence, if any.
    pub open: Option<OpenFence>,
}

impl FenceScan {
    /// Scan `text` for fences.
    pub fn new(text: &str) -> Self {
        let mut scan = Self::default();
        let mut offset = 0;

        for line in text.split_inclusive('\n') {
            let line_start = offset;
            offset += line.len();

            let Some(delim) = Delimiter::parse(line) else {
                continue;
            };

            match scan.open {
                None => {
                    if delim.can_open() {
                        scan.open = Some(OpenFence {
                            start: line_start,
                            kind: delim.kind,
                            run: delim.run,
                        });
                    }
                }
                Some(open) => {
                    if delim.closes(&open) {
                        scan.spans.push(FenceSpan {
                            start: open.start,
                            end: line_start + delim.indent + delim.run,
                            kind: open.kind,
                            run: open.run,
                        });
                        scan.open = None;
                    }
                }
            }
        }

        scan
    }

    /// Whether any byte of `range` lies inside a fence, complete or open.
    pub fn overlaps(&self, range: Range<usize>) -> bool {
        let in_span = self
            .spans
            .iter()
            .any(|span| span.start < range.end && range.start < span.end);
        let in_open = self.open.is_some_and(|open| range.end > open.start);
        in_span || in_open
    }

    /// Whether `offset` lies inside a fence, complete or open.
    pub fn is_fenced(&self, offset: usize) -> bool {
        self.overlaps(offset..offset + 1)
    }
}

/// A delimiter run found at the start of a line.
struct Delimiter<'a> {
    indent: usize,
    kind: FenceKind,
    run: usize,
    /// Text after the run, without the line terminator.
    rest: &'a str,
}

impl<'a> Delimiter<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let content = line.trim_end_matches(['\n', '\r']);
        let unindented = content.trim_start_matches(' ');
        let indent = content.len() - unindented.len();
        if indent > MAX_INDENT {
            return None;
        }

        let first = unindented.chars().next()?;
        let kind = FenceKind::from_char(first)?;
        let rest = unindented.trim_start_matches(first);
        let run = unindented.len() - rest.len();
        if run < MIN_RUN {
            return None;
        }

        Some(Self {
            indent,
            kind,
            run,
            rest,
        })
    }

    fn can_open(&self) -> bool {
        self.kind != FenceKind::Backtick || !self.rest.contains('`')
    }

    fn closes(&self, open: &OpenFence) -> bool {
        self.kind == open.kind && self.run >= open.run && self.rest.trim().is_empty()
    }
}

/// All complete fenced spans in `text`, left to right.
pub fn scan(text: &str) -> Vec<FenceSpan> {
    FenceScan::new(text).spans
}

/// The fence left open at the end of `text`, if any.
pub fn open_fence_at_end(text: &str) -> Option<OpenFence> {
    FenceScan::new(text).open
}

/// Whether `text` ends in the middle of a fence.
pub fn has_open_fence_at_end(text: &str) -> bool {
    open_fence_at_end(text).is_some()
}

/// Offset at which new content may be appended to `text`.
///
/// This is the end of the last complete fence or the end of the text,
/// whichever is later. It is only safe once a trailing open fence has been
/// closed (see [`crate::patch::close_open_fence`]).
pub fn safe_append_offset(text: &str) -> usize {
    let last_end = scan(text).last().map_or(0, |span| span.end);
    last_end.max(text.len())
}
