//! Age-based cleanup of stored artifacts.

use chrono::{DateTime, Duration, Utc};

use crate::blob::BlobStore;
use crate::error::StoreError;

/// Deletes every object under `prefix` whose `last_modified` is strictly
/// older than `now - max_age`. Returns the number of deleted objects.
///
/// An object exactly at the cutoff is kept.
///
/// # Errors
///
/// Propagates the backend's listing or delete error.
pub async fn sweep_prefix(
    store: &dyn BlobStore,
    prefix: &str,
    max_age: Duration,
    now: DateTime<Utc>,
) -> Result<usize, StoreError> {
    let cutoff = now - max_age;
    let mut deleted = 0usize;
    for meta in store.list(prefix).await? {
        if meta.last_modified < cutoff {
            store.delete(&meta.key).await?;
            tracing::debug!(key = %meta.key, "retention sweep deleted artifact");
            deleted += 1;
        }
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::mem::MemBlobStore;

    #[tokio::test]
    async fn deletes_only_objects_older_than_the_window() {
        let store = MemBlobStore::new();
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        store
            .put_at("snaps/old.json", b"1", now - Duration::hours(2))
            .await;
        store
            .put_at("snaps/fresh.json", b"2", now - Duration::minutes(10))
            .await;

        let deleted = sweep_prefix(&store, "snaps", Duration::hours(1), now)
            .await
            .unwrap();
        assert_eq!(deleted, 1);

        let keys: Vec<String> = store
            .list("snaps")
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.key)
            .collect();
        assert_eq!(keys, vec!["snaps/fresh.json"]);
    }

    #[tokio::test]
    async fn object_exactly_at_cutoff_is_kept() {
        let store = MemBlobStore::new();
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        store
            .put_at("snaps/edge.json", b"1", now - Duration::hours(1))
            .await;

        let deleted = sweep_prefix(&store, "snaps", Duration::hours(1), now)
            .await
            .unwrap();
        assert_eq!(deleted, 0);
        assert_eq!(store.list("snaps").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn sweep_only_touches_the_given_prefix() {
        let store = MemBlobStore::new();
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        store
            .put_at("snaps/old.json", b"1", now - Duration::hours(2))
            .await;
        store
            .put_at("diffs/old.json", b"2", now - Duration::hours(2))
            .await;

        sweep_prefix(&store, "snaps", Duration::hours(1), now)
            .await
            .unwrap();
        assert_eq!(store.list("diffs").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_prefix_sweeps_nothing() {
        let store = MemBlobStore::new();
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let deleted = sweep_prefix(&store, "snaps", Duration::hours(1), now)
            .await
            .unwrap();
        assert_eq!(deleted, 0);
    }
}
