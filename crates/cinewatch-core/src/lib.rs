//! Core domain types for the cinewatch pipeline: the normalized showing
//! record, the snapshot diff engine, and application configuration.

pub mod app_config;
pub mod config;
pub mod diff;
pub mod showing;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use diff::{diff_showings, has_changes, non_common_records, DiffKind, DiffPart, DiffRecord};
pub use showing::{NormalizedShowing, NOT_AVAILABLE};
