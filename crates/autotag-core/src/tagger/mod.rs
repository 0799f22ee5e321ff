//! Document lifecycle orchestration
//!
//! This module provides:
//! - **event**: the created and renamed events the tagger reacts to
//! - **engine**: the [`Tagger`] itself
//! - **report**: per-document outcomes and bulk run reports
//! - **stamp**: creation-time tags and stamped titles

mod engine;
mod event;
mod report;
mod stamp;

pub use engine::Tagger;
pub use event::DocumentEvent;
pub use report::{DocumentError, DocumentOutcome, EventOutcome, SyncOptions, SyncReport};
pub use stamp::{STAMP_FORMAT, parse_timestamp_tag, stamp, stamped_path, timestamp_tag};
