use std::path::PathBuf;

use thiserror::Error;

use crate::app_config::AppConfig;

const DEFAULT_SCHEDULE_URL: &str = "https://imax.ucicinemas.it/";
const DEFAULT_START_MARKER: &str = "moment.locale('it')";
const DEFAULT_END_MARKER: &str = "function gotToBuyPage(pid) {";
const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid or the Telegram settings are
/// only half-configured.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid or the Telegram settings are
/// only half-configured.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`
/// needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let require_non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let value = or_default(var, default);
        if value.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(value)
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let schedule_url = require_non_empty("CINEWATCH_SCHEDULE_URL", DEFAULT_SCHEDULE_URL)?;
    let start_marker = require_non_empty("CINEWATCH_START_MARKER", DEFAULT_START_MARKER)?;
    let end_marker = require_non_empty("CINEWATCH_END_MARKER", DEFAULT_END_MARKER)?;

    let storage_root = PathBuf::from(or_default("CINEWATCH_STORAGE_ROOT", "./data"));
    let snapshot_prefix = require_non_empty("CINEWATCH_SNAPSHOT_PREFIX", "scraped-data")?;
    let diff_prefix = require_non_empty("CINEWATCH_DIFF_PREFIX", "differences-data")?;

    let retention_max_age_secs = parse_u64("CINEWATCH_RETENTION_MAX_AGE_SECS", "3600")?;
    let request_timeout_secs = parse_u64("CINEWATCH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("CINEWATCH_USER_AGENT", "cinewatch/0.1 (schedule-watch)");
    let log_level = or_default("CINEWATCH_LOG_LEVEL", "info");

    let telegram_bot_token = lookup("TELEGRAM_BOT_TOKEN").ok().filter(|s| !s.is_empty());
    let telegram_chat_id = lookup("TELEGRAM_CHANNEL_CHAT_ID")
        .ok()
        .filter(|s| !s.is_empty());
    // Half-configured credentials are a deployment mistake; fail loudly
    // instead of silently never notifying.
    match (&telegram_bot_token, &telegram_chat_id) {
        (Some(_), None) => {
            return Err(ConfigError::MissingEnvVar(
                "TELEGRAM_CHANNEL_CHAT_ID".to_string(),
            ));
        }
        (None, Some(_)) => {
            return Err(ConfigError::MissingEnvVar("TELEGRAM_BOT_TOKEN".to_string()));
        }
        _ => {}
    }
    let telegram_api_base = or_default("CINEWATCH_TELEGRAM_API_BASE", DEFAULT_TELEGRAM_API_BASE);

    Ok(AppConfig {
        schedule_url,
        start_marker,
        end_marker,
        storage_root,
        snapshot_prefix,
        diff_prefix,
        retention_max_age_secs,
        request_timeout_secs,
        user_agent,
        log_level,
        telegram_bot_token,
        telegram_chat_id,
        telegram_api_base,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
