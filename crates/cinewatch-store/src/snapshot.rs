//! Artifact key scheme and snapshot/diff IO.
//!
//! One snapshot per run, written under a timestamp-keyed path and never
//! mutated afterwards; diff artifacts are written only for runs that
//! detected a change.

use chrono::{DateTime, SecondsFormat, Utc};
use cinewatch_core::{DiffRecord, NormalizedShowing};

use crate::blob::{BlobMeta, BlobStore};
use crate::error::StoreError;

/// Picks (newest, second-newest) from a newest-first listing.
///
/// The pipeline takes the selector as a parameter so tests can substitute a
/// deterministic choice when the backend's same-timestamp tie-break is not
/// under our control.
pub type SnapshotSelector = fn(&[BlobMeta]) -> Option<(BlobMeta, BlobMeta)>;

/// Default selector: the first two entries of the listing.
#[must_use]
pub fn select_latest_two(entries: &[BlobMeta]) -> Option<(BlobMeta, BlobMeta)> {
    match entries {
        [latest, penultimate, ..] => Some((latest.clone(), penultimate.clone())),
        _ => None,
    }
}

/// Key for the snapshot written at `now`, e.g.
/// `scraped-data/scraped-data_2026-08-30T12-00-00-000Z.json`.
#[must_use]
pub fn snapshot_key(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{prefix}/scraped-data_{}.json", artifact_timestamp(now))
}

/// Key for the diff artifact written at `now`.
#[must_use]
pub fn diff_key(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{prefix}/differences_{}.json", artifact_timestamp(now))
}

/// RFC 3339 timestamp with `:` and `.` replaced so the key is safe for
/// filesystems and object stores alike.
fn artifact_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

/// Writes a snapshot as a pretty-printed JSON array of showings.
///
/// # Errors
///
/// Returns [`StoreError::Json`] on serialization failure, otherwise any
/// error from the backend `put`.
pub async fn write_snapshot(
    store: &dyn BlobStore,
    key: &str,
    showings: &[NormalizedShowing],
) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(showings).map_err(|e| StoreError::Json {
        context: format!("snapshot {key}"),
        source: e,
    })?;
    store.put(key, &bytes).await
}

/// Reads a snapshot back into showings.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] for a missing key and
/// [`StoreError::Json`] when the stored bytes do not parse as a snapshot.
pub async fn read_snapshot(
    store: &dyn BlobStore,
    key: &str,
) -> Result<Vec<NormalizedShowing>, StoreError> {
    let bytes = store.get(key).await?;
    serde_json::from_slice(&bytes).map_err(|e| StoreError::Json {
        context: format!("snapshot {key}"),
        source: e,
    })
}

/// Writes the non-common diff parts as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`StoreError::Json`] on serialization failure, otherwise any
/// error from the backend `put`.
pub async fn write_diff_records(
    store: &dyn BlobStore,
    key: &str,
    records: &[DiffRecord],
) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(records).map_err(|e| StoreError::Json {
        context: format!("diff {key}"),
        source: e,
    })?;
    store.put(key, &bytes).await
}
