//! In-memory document store

use std::collections::BTreeMap;

use autotag_fs::NormalizedPath;
use chrono::{Local, NaiveDateTime};

use super::DocumentStore;
use crate::{Error, Result};

#[derive(Debug, Clone)]
struct Entry {
    text: String,
    created: NaiveDateTime,
}

/// A vault held in an ordered map.
///
/// Counts writes so callers can verify that unchanged documents are left
/// alone.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<String, Entry>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document created now. Does not count as a write.
    pub fn insert(&mut self, path: &str, text: impl Into<String>) {
        self.insert_created(path, text, Local::now().naive_local());
    }

    /// Add a document with an explicit creation time.
    pub fn insert_created(&mut self, path: &str, text: impl Into<String>, created: NaiveDateTime) {
        self.documents.insert(
            key(path),
            Entry {
                text: text.into(),
                created,
            },
        );
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.documents.get(&key(path)).map(|e| e.text.as_str())
    }

    /// Number of [`DocumentStore::write`] calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn entry(&self, path: &str) -> Result<&Entry> {
        self.documents
            .get(&key(path))
            .ok_or_else(|| Error::DocumentNotFound {
                path: path.to_string(),
            })
    }
}

fn key(path: &str) -> String {
    NormalizedPath::new(path).as_relative().to_string()
}

impl DocumentStore for MemoryStore {
    fn read(&self, path: &str) -> Result<String> {
        self.entry(path).map(|e| e.text.clone())
    }

    fn write(&mut self, path: &str, text: &str) -> Result<()> {
        let key = key(path);
        if key.is_empty() {
            return Err(Error::invalid_path(path, "path names the vault root"));
        }
        self.writes += 1;
        match self.documents.get_mut(&key) {
            Some(entry) => entry.text = text.to_string(),
            None => {
                self.documents.insert(
                    key,
                    Entry {
                        text: text.to_string(),
                        created: Local::now().naive_local(),
                    },
                );
            }
        }
        Ok(())
    }

    fn list_documents(&self) -> Result<Vec<String>> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn exists(&self, path: &str) -> bool {
        self.documents.contains_key(&key(path))
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        let target = key(to);
        if self.documents.contains_key(&target) {
            return Err(Error::DocumentExists {
                path: to.to_string(),
            });
        }
        let entry = self
            .documents
            .remove(&key(from))
            .ok_or_else(|| Error::DocumentNotFound {
                path: from.to_string(),
            })?;
        self.documents.insert(target, entry);
        Ok(())
    }

    fn created_at(&self, path: &str) -> Result<NaiveDateTime> {
        self.entry(path).map(|e| e.created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_normalized() {
        let mut store = MemoryStore::new();
        store.insert("/a/b.md", "x");
        assert!(store.exists("a/b.md"));
        assert_eq!(store.get("./a/b.md"), Some("x"));
    }

    #[test]
    fn test_rename_keeps_created_time() {
        let mut store = MemoryStore::new();
        let created = NaiveDateTime::parse_from_str("2025-08-31 14:35", "%Y-%m-%d %H:%M").unwrap();
        store.insert_created("a.md", "x", created);
        store.rename("a.md", "b.md").unwrap();
        assert!(!store.exists("a.md"));
        assert_eq!(store.created_at("b.md").unwrap(), created);
    }

    #[test]
    fn test_rename_onto_existing_fails() {
        let mut store = MemoryStore::new();
        store.insert("a.md", "x");
        store.insert("b.md", "y");
        assert!(matches!(
            store.rename("a.md", "b.md"),
            Err(Error::DocumentExists { .. })
        ));
    }

    #[test]
    fn test_write_counts() {
        let mut store = MemoryStore::new();
        store.write("a.md", "x").unwrap();
        store.write("a.md", "y").unwrap();
        assert_eq!(store.writes(), 2);
        assert_eq!(store.read("a.md").unwrap(), "y");
    }
}
