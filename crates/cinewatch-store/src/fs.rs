//! Filesystem-backed blob store.
//!
//! Keys map to paths beneath a fixed root directory; `last_modified` comes
//! from file mtime. Listing is newest-first with same-mtime ties broken by
//! key, descending — artifact keys embed their creation timestamp, so the
//! lexicographically greater key is the younger artifact.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::blob::{BlobMeta, BlobStore};
use crate::error::StoreError;

pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves `key` to a path under the root, rejecting keys that would
    /// escape it.
    fn resolve(&self, key: &str) -> Result<PathBuf, StoreError> {
        let invalid = |reason: &str| StoreError::InvalidKey {
            key: key.to_owned(),
            reason: reason.to_owned(),
        };
        if key.is_empty() {
            return Err(invalid("empty key"));
        }
        let relative = Path::new(key);
        for component in relative.components() {
            match component {
                Component::Normal(_) => {}
                Component::CurDir | Component::ParentDir => {
                    return Err(invalid("key must not contain `.` or `..` components"));
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("key must be relative"));
                }
            }
        }
        Ok(self.root.join(relative))
    }

    fn io_err(key: &str, source: std::io::Error) -> StoreError {
        StoreError::Io {
            key: key.to_owned(),
            source,
        }
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::io_err(key, e))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| Self::io_err(key, e))
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.resolve(key)?;
        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound {
                    key: key.to_owned(),
                }
            } else {
                Self::io_err(key, e)
            }
        })
    }

    async fn list(&self, prefix: &str) -> Result<Vec<BlobMeta>, StoreError> {
        let dir = self.resolve(prefix)?;
        let mut read_dir = match tokio::fs::read_dir(&dir).await {
            Ok(rd) => rd,
            // A prefix nothing has been written under lists as empty.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::io_err(prefix, e)),
        };

        let mut entries = Vec::new();
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| Self::io_err(prefix, e))?
        {
            let metadata = entry
                .metadata()
                .await
                .map_err(|e| Self::io_err(prefix, e))?;
            if !metadata.is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            let modified = metadata
                .modified()
                .map_err(|e| Self::io_err(prefix, e))?;
            entries.push(BlobMeta {
                key: format!("{prefix}/{file_name}"),
                last_modified: DateTime::<Utc>::from(modified),
            });
        }

        entries.sort_by(|a, b| {
            b.last_modified
                .cmp(&a.last_modified)
                .then_with(|| b.key.cmp(&a.key))
        });
        Ok(entries)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_err(key, e)),
        }
    }
}
