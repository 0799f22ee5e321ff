//! Document storage abstraction
//!
//! The tagger never touches the filesystem directly. It reads a fresh
//! snapshot through a [`DocumentStore`], computes the new text, and hands it
//! back only when something changed.
//!
//! Paths are vault-relative strings with forward slashes (`notes/a.md`).

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use chrono::NaiveDateTime;

use crate::Result;

/// Trait for reading and writing documents in a vault.
pub trait DocumentStore: Send + Sync {
    /// Read the full text of a document.
    ///
    /// A missing document surfaces as `Error::DocumentNotFound`.
    fn read(&self, path: &str) -> Result<String>;

    /// Replace the full text of a document, creating it if needed.
    fn write(&mut self, path: &str, text: &str) -> Result<()>;

    /// All documents in the vault, sorted, as vault-relative paths.
    fn list_documents(&self) -> Result<Vec<String>>;

    fn exists(&self, path: &str) -> bool;

    /// Move a document. Fails with `Error::DocumentExists` if `to` is taken.
    fn rename(&mut self, from: &str, to: &str) -> Result<()>;

    /// Local creation time of a document.
    fn created_at(&self, path: &str) -> Result<NaiveDateTime>;
}
