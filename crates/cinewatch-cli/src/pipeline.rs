//! One-shot pipeline run: fetch → extract → interpret → normalize →
//! snapshot → diff → notify → sweep.
//!
//! Every stage up to and including the snapshot write aborts the run on
//! failure, leaving the previous snapshot as the most recent one. The
//! notification and the retention sweeps run after the artifacts are
//! durable, so their failures are logged and reported but never undo a
//! completed run.

use chrono::{DateTime, Duration, Utc};

use cinewatch_core::{diff_showings, has_changes, non_common_records, AppConfig};
use cinewatch_scraper::{
    collect_script_text, expect_schedule_bindings, extract_block, interpret, normalize_days,
    PageClient, ScrapeError,
};
use cinewatch_store::{
    diff_key, read_snapshot, snapshot_key, sweep_prefix, write_diff_records, write_snapshot,
    BlobStore, SnapshotSelector,
};

use crate::notify::{change_message, TelegramNotifier};

/// Summary of one pipeline run, for logging and for tests.
#[derive(Debug)]
pub struct RunReport {
    pub snapshot_key: String,
    pub showing_count: usize,
    /// `(previous, current)` snapshot keys, when two snapshots existed.
    pub compared: Option<(String, String)>,
    pub changed: bool,
    pub diff_key: Option<String>,
    /// `Some(true)` delivered, `Some(false)` attempted and failed, `None`
    /// when no notification was due or no notifier is configured.
    pub notified: Option<bool>,
}

/// Executes one run of the pipeline at time `now`.
///
/// `select_snapshots` picks the two snapshots to compare from the
/// newest-first listing; production passes
/// [`cinewatch_store::select_latest_two`].
///
/// # Errors
///
/// Propagates fetch, extraction, interpretation, normalization, and
/// snapshot/diff persistence errors. Notification and retention failures
/// are logged, not returned.
pub async fn run_once(
    config: &AppConfig,
    client: &PageClient,
    store: &dyn BlobStore,
    notifier: Option<&TelegramNotifier>,
    select_snapshots: SnapshotSelector,
    now: DateTime<Utc>,
) -> anyhow::Result<RunReport> {
    let html = client.fetch_page(&config.schedule_url).await?;
    let script = collect_script_text(&html);
    let block = extract_block(&script, &config.start_marker, &config.end_marker).ok_or_else(
        || ScrapeError::ExtractionMiss {
            start_marker: config.start_marker.clone(),
            end_marker: config.end_marker.clone(),
        },
    )?;

    let bindings = interpret(block)?;
    expect_schedule_bindings(&bindings)?;
    let days = bindings
        .get("days")
        .ok_or_else(|| ScrapeError::MissingBinding {
            name: "days".to_owned(),
        })?;
    let showings = normalize_days(days)?;

    let snapshot_key = snapshot_key(&config.snapshot_prefix, now);
    write_snapshot(store, &snapshot_key, &showings).await?;
    tracing::info!(key = %snapshot_key, showings = showings.len(), "snapshot written");

    let mut report = RunReport {
        snapshot_key,
        showing_count: showings.len(),
        compared: None,
        changed: false,
        diff_key: None,
        notified: None,
    };

    let listing = store.list(&config.snapshot_prefix).await?;
    if let Some((latest, penultimate)) = select_snapshots(&listing) {
        // Independent reads; the only concurrency in the pipeline.
        let (current, previous) = tokio::try_join!(
            read_snapshot(store, &latest.key),
            read_snapshot(store, &penultimate.key),
        )?;
        tracing::info!(previous = %penultimate.key, current = %latest.key, "comparing snapshots");
        report.compared = Some((penultimate.key.clone(), latest.key.clone()));

        let parts = diff_showings(&previous, &current);
        if has_changes(&parts) {
            report.changed = true;
            let records = non_common_records(&parts);
            let diff_key = diff_key(&config.diff_prefix, now);
            write_diff_records(store, &diff_key, &records).await?;
            tracing::info!(key = %diff_key, parts = records.len(), "differences detected and saved");
            report.diff_key = Some(diff_key);

            if let Some(notifier) = notifier {
                match notifier.send(&change_message(&config.schedule_url)).await {
                    Ok(delivered) => report.notified = Some(delivered),
                    Err(e) => {
                        tracing::warn!(error = %e, "notification failed; artifacts are already persisted");
                        report.notified = Some(false);
                    }
                }
            } else {
                tracing::warn!("programme changed but no notifier is configured");
            }
        } else {
            tracing::info!("no differences found");
        }
    } else {
        tracing::info!("not enough snapshots for comparison");
    }

    let max_age = Duration::seconds(
        i64::try_from(config.retention_max_age_secs).unwrap_or(i64::MAX),
    );
    for prefix in [&config.snapshot_prefix, &config.diff_prefix] {
        match sweep_prefix(store, prefix, max_age, now).await {
            Ok(deleted) if deleted > 0 => {
                tracing::info!(prefix = %prefix, deleted, "retention sweep completed");
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(prefix = %prefix, error = %e, "retention sweep failed"),
        }
    }

    Ok(report)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
