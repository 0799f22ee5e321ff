//! Fence-aware managed block patching for autotag.
//!
//! A document carries at most one machine-managed block. The block starts at
//! a caller-supplied literal marker and runs to the end of the document:
//!
//! ```text
//! Human-written body.
//!
//! <!-- autotag -->
//! #project
//! #2025-08-31-14-35
//! ```
//!
//! The crate has two layers:
//!
//! - [`fence`] scans for fenced literal regions (```` ``` ```` and `~~~`),
//!   reports a trailing unterminated fence and the offset where appended text
//!   cannot land inside one.
//! - [`patch`] inserts, replaces or removes the managed block. A marker inside
//!   a fence is never treated as the block, and a new block is never placed
//!   inside a fence. Patching is idempotent.

pub mod error;
pub mod fence;
pub mod patch;

pub use error::{Error, Result};
pub use fence::{
    FenceKind, FenceScan, FenceSpan, OpenFence, has_open_fence_at_end, open_fence_at_end, scan,
    safe_append_offset,
};
pub use patch::{
    BlockAction, DEFAULT_MARKER, ManagedBlock, Patch, close_open_fence, find_block, has_block,
    patch, plan_patch, remove_block, upsert_block, validate_marker,
};
