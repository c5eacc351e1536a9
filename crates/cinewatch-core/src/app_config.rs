use std::path::PathBuf;

/// Runtime configuration for one cinewatch process.
///
/// Built once at startup (see [`crate::config::load_app_config`]) and passed
/// explicitly into the pipeline; nothing in the core reads process-wide
/// state after this point.
#[derive(Clone)]
pub struct AppConfig {
    /// Schedule page to fetch.
    pub schedule_url: String,
    /// Marker immediately preceding the embedded schedule block.
    pub start_marker: String,
    /// Marker immediately following the embedded schedule block.
    pub end_marker: String,
    /// Root directory of the filesystem blob store.
    pub storage_root: PathBuf,
    /// Key prefix for snapshot artifacts.
    pub snapshot_prefix: String,
    /// Key prefix for diff artifacts.
    pub diff_prefix: String,
    /// Artifacts older than this are deleted by the retention sweep.
    pub retention_max_age_secs: u64,
    /// HTTP request timeout for the page fetch and the notifier.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
    /// Telegram credentials. When absent, change notifications are skipped.
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    /// Telegram API base URL; overridable so tests can point at a mock server.
    pub telegram_api_base: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("schedule_url", &self.schedule_url)
            .field("start_marker", &self.start_marker)
            .field("end_marker", &self.end_marker)
            .field("storage_root", &self.storage_root)
            .field("snapshot_prefix", &self.snapshot_prefix)
            .field("diff_prefix", &self.diff_prefix)
            .field("retention_max_age_secs", &self.retention_max_age_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .field(
                "telegram_bot_token",
                &self.telegram_bot_token.as_ref().map(|_| "[redacted]"),
            )
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("telegram_api_base", &self.telegram_api_base)
            .finish()
    }
}
