//! Filesystem-backed document store

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use autotag_fs::{NormalizedPath, io};
use chrono::{DateTime, Local, NaiveDateTime};

use super::DocumentStore;
use crate::{Error, Result};

/// Documents stored as files below a vault root.
///
/// Hidden files and directories (leading `.`) are never listed, which keeps
/// the config file and editor state out of bulk runs. Writes rewrite the
/// existing file in place, so a document's creation time is stable.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: NormalizedPath,
}

impl FsStore {
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Absolute location of a vault-relative document path.
    ///
    /// # Errors
    /// Returns `Error::InvalidPath` for the vault root itself and for paths
    /// that climb out of the vault.
    pub fn locate(&self, path: &str) -> Result<NormalizedPath> {
        let relative = NormalizedPath::new(path);
        let relative = relative.as_relative();
        if relative.is_empty() {
            return Err(Error::invalid_path(path, "path names the vault root"));
        }
        if relative.split('/').any(|segment| segment == "..") {
            return Err(Error::invalid_path(path, "path leaves the vault"));
        }
        Ok(self.root.join(relative))
    }

    fn collect(&self, dir: &NormalizedPath, out: &mut Vec<String>) -> Result<()> {
        // An empty root means the working directory
        let native = if dir.as_str().is_empty() {
            PathBuf::from(".")
        } else {
            dir.to_native()
        };
        let entries = fs::read_dir(&native).map_err(|e| autotag_fs::Error::io(&native, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| autotag_fs::Error::io(&native, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let path = dir.join(&name);
            let file_type = entry
                .file_type()
                .map_err(|e| autotag_fs::Error::io(entry.path(), e))?;
            if file_type.is_dir() {
                self.collect(&path, out)?;
            } else if file_type.is_file()
                && let Some(relative) = path.strip_prefix(&self.root)
            {
                out.push(relative.as_str().to_string());
            }
        }
        Ok(())
    }
}

impl DocumentStore for FsStore {
    fn read(&self, path: &str) -> Result<String> {
        let location = self.locate(path)?;
        io::read_text(&location).map_err(|e| {
            if e.is_not_found() {
                Error::DocumentNotFound {
                    path: path.to_string(),
                }
            } else {
                e.into()
            }
        })
    }

    fn write(&mut self, path: &str, text: &str) -> Result<()> {
        let location = self.locate(path)?;
        io::write_text(&location, text)?;
        tracing::trace!(path, bytes = text.len(), "wrote document");
        Ok(())
    }

    fn list_documents(&self) -> Result<Vec<String>> {
        let mut documents = Vec::new();
        self.collect(&self.root, &mut documents)?;
        documents.sort();
        Ok(documents)
    }

    fn exists(&self, path: &str) -> bool {
        self.locate(path).is_ok_and(|location| location.is_file())
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        let source = self.locate(from)?;
        let target = self.locate(to)?;
        if !source.is_file() {
            return Err(Error::DocumentNotFound {
                path: from.to_string(),
            });
        }
        if target.exists() {
            return Err(Error::DocumentExists {
                path: to.to_string(),
            });
        }
        io::rename(&source, &target)?;
        Ok(())
    }

    fn created_at(&self, path: &str) -> Result<NaiveDateTime> {
        let location = self.locate(path)?;
        let native = location.to_native();
        let metadata = fs::metadata(&native).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::DocumentNotFound {
                    path: path.to_string(),
                }
            } else {
                autotag_fs::Error::io(&native, e).into()
            }
        })?;

        let time = birth_time(&native, metadata.created(), || metadata.modified())?;
        Ok(DateTime::<Local>::from(time).naive_local())
    }
}

/// The file's birth time, or its modification time where the filesystem
/// records none. The fallback moves with every edit.
fn birth_time(
    native: &Path,
    created: std::io::Result<SystemTime>,
    modified: impl FnOnce() -> std::io::Result<SystemTime>,
) -> Result<SystemTime> {
    match created {
        Ok(time) => Ok(time),
        Err(reason) => {
            tracing::warn!(
                path = %native.display(),
                reason = %reason,
                "no birth time recorded, using modification time"
            );
            modified().map_err(|e| autotag_fs::Error::io(native, e).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_rejects_root_and_parent_segments() {
        let store = FsStore::new("/vault");
        assert!(matches!(store.locate(""), Err(Error::InvalidPath { .. })));
        assert!(matches!(store.locate("/"), Err(Error::InvalidPath { .. })));
        assert!(matches!(
            store.locate("../outside.md"),
            Err(Error::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_birth_time_prefers_creation() {
        let created = SystemTime::UNIX_EPOCH;
        let time = birth_time(Path::new("a.md"), Ok(created), || {
            panic!("modification time consulted")
        })
        .unwrap();
        assert_eq!(time, created);
    }

    #[test]
    fn test_birth_time_falls_back_to_modification() {
        let modified = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(60);
        let unsupported = std::io::Error::from(std::io::ErrorKind::Unsupported);

        let time = birth_time(Path::new("a.md"), Err(unsupported), || Ok(modified)).unwrap();

        assert_eq!(time, modified);
    }

    #[test]
    fn test_birth_time_without_any_timestamp() {
        let unsupported = || std::io::Error::from(std::io::ErrorKind::Unsupported);
        let result = birth_time(Path::new("a.md"), Err(unsupported()), || Err(unsupported()));
        assert!(matches!(result, Err(Error::Fs(_))));
    }

    #[test]
    fn test_locate_joins_relative() {
        let store = FsStore::new("/vault");
        assert_eq!(store.locate("/a/b.md").unwrap().as_str(), "/vault/a/b.md");
        assert_eq!(store.locate("./a\\b.md").unwrap().as_str(), "/vault/a/b.md");
    }
}
