//! cinewatch binary: watch the UCI IMAX schedule page and report changes.

mod notify;
mod pipeline;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cinewatch_core::{load_app_config, AppConfig};
use cinewatch_scraper::PageClient;
use cinewatch_store::{select_latest_two, FsBlobStore};

use crate::notify::TelegramNotifier;
use crate::pipeline::run_once;

#[derive(Parser)]
#[command(name = "cinewatch", about = "Cinema schedule watcher", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the schedule once, diff it against the previous snapshot, and
    /// notify on changes.
    Run,
    /// Run the pipeline repeatedly on a fixed interval.
    Watch {
        /// Seconds between runs.
        #[arg(long, default_value_t = 900)]
        interval_secs: u64,
    },
}

fn build_notifier(config: &AppConfig) -> anyhow::Result<Option<TelegramNotifier>> {
    match (&config.telegram_bot_token, &config.telegram_chat_id) {
        (Some(token), Some(chat_id)) => {
            let notifier = TelegramNotifier::with_api_base(
                token,
                chat_id,
                config.request_timeout_secs,
                &config.telegram_api_base,
            )
            .context("failed to build Telegram notifier")?;
            Ok(Some(notifier))
        }
        _ => {
            tracing::warn!("Telegram credentials not configured; notifications disabled");
            Ok(None)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_app_config().context("failed to load configuration")?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::debug!(?config, "configuration loaded");

    let client = PageClient::new(config.request_timeout_secs, &config.user_agent)
        .context("failed to build HTTP client")?;
    let store = FsBlobStore::new(&config.storage_root);
    let notifier = build_notifier(&config)?;

    match cli.command {
        Command::Run => {
            let report = run_once(
                &config,
                &client,
                &store,
                notifier.as_ref(),
                select_latest_two,
                Utc::now(),
            )
            .await?;
            tracing::info!(
                snapshot = %report.snapshot_key,
                showings = report.showing_count,
                changed = report.changed,
                "run complete"
            );
        }
        Command::Watch { interval_secs } => {
            tracing::info!(interval_secs, "watching schedule");
            let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval_secs));
            loop {
                ticker.tick().await;
                match run_once(
                    &config,
                    &client,
                    &store,
                    notifier.as_ref(),
                    select_latest_two,
                    Utc::now(),
                )
                .await
                {
                    Ok(report) => tracing::info!(
                        snapshot = %report.snapshot_key,
                        showings = report.showing_count,
                        changed = report.changed,
                        "run complete"
                    ),
                    Err(e) => tracing::error!(error = %e, "run failed"),
                }
            }
        }
    }

    Ok(())
}
