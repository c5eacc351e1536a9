//! In-memory blob store.
//!
//! Backs tests and dry runs. Each `put` records the wall-clock time plus a
//! monotonic insertion tick, so rapid writes with colliding timestamps still
//! list in a deterministic newest-first order; `put_at` pins an explicit
//! timestamp for exercising same-timestamp ties.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::blob::{BlobMeta, BlobStore};
use crate::error::StoreError;

struct StoredObject {
    bytes: Vec<u8>,
    last_modified: DateTime<Utc>,
    /// Insertion tick, used as the listing tie-break.
    seq: u64,
}

struct Inner {
    objects: HashMap<String, StoredObject>,
    next_seq: u64,
}

pub struct MemBlobStore {
    inner: Mutex<Inner>,
}

impl MemBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                objects: HashMap::new(),
                next_seq: 0,
            }),
        }
    }

    /// Stores an object with an explicit `last_modified` timestamp.
    pub async fn put_at(&self, key: &str, bytes: &[u8], last_modified: DateTime<Utc>) {
        let mut inner = self.inner.lock().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.objects.insert(
            key.to_owned(),
            StoredObject {
                bytes: bytes.to_vec(),
                last_modified,
                seq,
            },
        );
    }
}

impl Default for MemBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for MemBlobStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        // Wall-clock mtime like a real backend; `seq` keeps rapid writes in
        // a deterministic order when timestamps collide.
        let last_modified = Utc::now();
        inner.objects.insert(
            key.to_owned(),
            StoredObject {
                bytes: bytes.to_vec(),
                last_modified,
                seq,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let inner = self.inner.lock().await;
        inner
            .objects
            .get(key)
            .map(|o| o.bytes.clone())
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_owned(),
            })
    }

    async fn list(&self, prefix: &str) -> Result<Vec<BlobMeta>, StoreError> {
        let inner = self.inner.lock().await;
        let mut entries: Vec<(&String, &StoredObject)> = inner
            .objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .collect();
        entries.sort_by(|(_, a), (_, b)| {
            b.last_modified
                .cmp(&a.last_modified)
                .then_with(|| b.seq.cmp(&a.seq))
        });
        Ok(entries
            .into_iter()
            .map(|(key, object)| BlobMeta {
                key: key.clone(),
                last_modified: object.last_modified,
            })
            .collect())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.objects.remove(key);
        Ok(())
    }
}
