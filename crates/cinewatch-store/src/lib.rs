//! Persistence for cinewatch artifacts.
//!
//! Snapshots and diff reports are opaque JSON blobs under timestamped keys.
//! [`BlobStore`] is the backend seam: [`FsBlobStore`] persists to a rooted
//! directory, [`MemBlobStore`] backs tests. [`snapshot`] knows the artifact
//! key scheme and formats; [`retention`] ages old artifacts out.

pub mod blob;
pub mod error;
pub mod fs;
pub mod mem;
pub mod retention;
pub mod snapshot;

pub use blob::{BlobMeta, BlobStore};
pub use error::StoreError;
pub use fs::FsBlobStore;
pub use mem::MemBlobStore;
pub use retention::sweep_prefix;
pub use snapshot::{
    diff_key, read_snapshot, select_latest_two, snapshot_key, write_diff_records, write_snapshot,
    SnapshotSelector,
};
