//! Core orchestration layer for autotag
//!
//! This crate turns folder rules into managed tag blocks:
//!
//! - **Tag normalization**: one leading `#`, no duplicates, first-seen order
//! - **Rule resolution**: every rule whose folder contains a document contributes its tags
//! - **Settings**: an explicit configuration value, discovered per vault
//! - **Document stores**: filesystem and in-memory vaults behind one trait
//! - **Tagger**: reacts to created and renamed documents and reconciles whole vaults
//!
//! # Architecture
//!
//! ```text
//!                  autotag-cli
//!                       |
//!                  autotag-core
//!                       |
//!          +------------+------------+
//!          |                         |
//!     autotag-fs              autotag-blocks
//! ```
//!
//! # Example
//!
//! ```
//! use autotag_core::{DocumentStore, MemoryStore, Rule, Settings, Tagger};
//!
//! let settings = Settings {
//!     rules: vec![Rule::new("Projects/Alpha", ["alpha", "work"])],
//!     stamp_created_tag: false,
//!     ..Settings::default()
//! };
//! let mut store = MemoryStore::new();
//! store.insert("Projects/Alpha/plan.md", "Plan");
//!
//! let mut tagger = Tagger::new(settings, store)?;
//! tagger.on_renamed("Projects/Alpha/plan.md")?;
//!
//! assert_eq!(
//!     tagger.store().read("Projects/Alpha/plan.md")?,
//!     "Plan\n\n<!-- autotag -->\n#alpha\n#work"
//! );
//! # Ok::<(), autotag_core::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod rules;
pub mod store;
pub mod tagger;
pub mod tags;

pub use config::{DEFAULT_CONFIG_FILE, Settings, SettingsLoader};
pub use error::{Error, Result};
pub use rules::{Rule, RuleResolver, parse_rules, resolve};
pub use store::{DocumentStore, FsStore, MemoryStore};
pub use tagger::{
    DocumentEvent, DocumentOutcome, EventOutcome, SyncOptions, SyncReport, Tagger,
    parse_timestamp_tag,
};
pub use tags::{TagSet, normalize, split_tags};
