use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;

/// Listing entry for one stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobMeta {
    pub key: String,
    pub last_modified: DateTime<Utc>,
}

/// Flat key/value object storage for pipeline artifacts.
///
/// Keys are `/`-separated paths relative to the store root (e.g.
/// `scraped-data/scraped-data_2026-08-30T12-00-00-000Z.json`).
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no object exists under `key`.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Lists objects whose key starts with `prefix`, newest-first by
    /// `last_modified`. How same-timestamp ties are broken is up to the
    /// backend; callers that need determinism inject their own selection
    /// over the returned entries.
    async fn list(&self, prefix: &str) -> Result<Vec<BlobMeta>, StoreError>;

    /// Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
