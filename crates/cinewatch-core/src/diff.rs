//! Structural diff between two schedule snapshots.
//!
//! Equality between showings is deliberately coarse: two showings are equal
//! when their `movie_title` fields are equal, ignoring date, time, and
//! cinema. The diff therefore answers "was a movie added to or removed from
//! the programme", not "did a specific showtime move".

use serde::{Deserialize, Serialize};

use crate::showing::NormalizedShowing;

/// Classification of one run of showings in a diff result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    /// Present in both snapshots.
    Common,
    /// Present only in the current snapshot.
    Added,
    /// Present only in the previous snapshot.
    Removed,
}

/// A maximal contiguous run of showings with the same classification.
///
/// Runs preserve the sub-order of the sequence they come from; concatenating
/// the `values` of all parts yields an interleaving consistent with both
/// input sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffPart {
    pub kind: DiffKind,
    pub values: Vec<NormalizedShowing>,
}

/// Persisted form of a non-common diff part.
///
/// Mirrors the diff artifact format: exactly one of `added`/`removed` is
/// present (as `true`), the other is omitted from the JSON entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed: Option<bool>,
    pub count: usize,
    pub value: Vec<NormalizedShowing>,
}

impl DiffRecord {
    fn from_part(part: &DiffPart) -> Self {
        Self {
            added: (part.kind == DiffKind::Added).then_some(true),
            removed: (part.kind == DiffKind::Removed).then_some(true),
            count: part.values.len(),
            value: part.values.clone(),
        }
    }
}

/// Title-only comparator. Date, time, and cinema are intentionally ignored.
fn same_movie(a: &NormalizedShowing, b: &NormalizedShowing) -> bool {
    a.movie_title == b.movie_title
}

/// Diffs two snapshots under the title-only comparator.
///
/// Computes a longest-common-subsequence alignment between `previous` and
/// `current`, then groups positions into maximal runs: matched positions
/// become `Common` parts (carrying the current snapshot's records),
/// unmatched positions of `previous` become `Removed` parts and unmatched
/// positions of `current` become `Added` parts. At a divergence point the
/// removed run is emitted before the added run.
///
/// `diff_showings(s, s)` yields a single `Common` part (or nothing for empty
/// input).
#[must_use]
pub fn diff_showings(
    previous: &[NormalizedShowing],
    current: &[NormalizedShowing],
) -> Vec<DiffPart> {
    let n = previous.len();
    let m = current.len();

    // lcs[i][j] = length of the longest common subsequence of
    // previous[i..] and current[j..].
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if same_movie(&previous[i], &current[j]) {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut parts: Vec<DiffPart> = Vec::new();
    let mut i = 0;
    let mut j = 0;
    while i < n || j < m {
        if i < n && j < m && same_movie(&previous[i], &current[j]) {
            append(&mut parts, DiffKind::Common, current[j].clone());
            i += 1;
            j += 1;
        } else if i < n && (j == m || lcs[i + 1][j] >= lcs[i][j + 1]) {
            append(&mut parts, DiffKind::Removed, previous[i].clone());
            i += 1;
        } else {
            append(&mut parts, DiffKind::Added, current[j].clone());
            j += 1;
        }
    }
    parts
}

/// Extends the last part when the kind continues, otherwise starts a new run.
fn append(parts: &mut Vec<DiffPart>, kind: DiffKind, value: NormalizedShowing) {
    match parts.last_mut() {
        Some(last) if last.kind == kind => last.values.push(value),
        _ => parts.push(DiffPart {
            kind,
            values: vec![value],
        }),
    }
}

/// True when the diff contains at least one added or removed part.
#[must_use]
pub fn has_changes(parts: &[DiffPart]) -> bool {
    parts.iter().any(|p| p.kind != DiffKind::Common)
}

/// Converts the added/removed parts to their persisted form, dropping
/// common runs. This is what gets written to the diff artifact.
#[must_use]
pub fn non_common_records(parts: &[DiffPart]) -> Vec<DiffRecord> {
    parts
        .iter()
        .filter(|p| p.kind != DiffKind::Common)
        .map(DiffRecord::from_part)
        .collect()
}

#[cfg(test)]
#[path = "diff_test.rs"]
mod tests;
