//! Scraping front half of the cinewatch pipeline.
//!
//! Fetches the schedule page, isolates the embedded schedule block between
//! two textual markers, interprets it as a restricted data-definition
//! language (no code execution), and flattens the nested `days` structure
//! into [`cinewatch_core::NormalizedShowing`] records.

pub mod client;
pub mod error;
pub mod extract;
pub mod interpret;
pub mod normalize;

pub use client::PageClient;
pub use error::ScrapeError;
pub use extract::{collect_script_text, extract_block};
pub use interpret::{
    expect_schedule_bindings, interpret, Bindings, EmbeddedValue, EXPECTED_BINDINGS,
};
pub use normalize::{cinema_display_name, normalize_days};
