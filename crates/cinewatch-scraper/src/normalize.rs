//! Flattening of the nested `days` structure into showing records.
//!
//! `days` maps a cinema key to a list of day entries, each holding a list of
//! movie entries, each holding a list of showtimes. Normalization walks that
//! nesting in source order and emits exactly one record per (movie, time)
//! pair, so the output length is always the sum of movie-entries ×
//! time-entries over all cinemas and days.

use cinewatch_core::{NormalizedShowing, NOT_AVAILABLE};

use crate::error::ScrapeError;
use crate::interpret::EmbeddedValue;

/// Flattens the `days` value into an ordered sequence of showings.
///
/// Iteration order: cinema keys in insertion order, then day entries, movie
/// entries, and showtimes in list order.
///
/// # Errors
///
/// Returns [`ScrapeError::Shape`] when `days` does not match the expected
/// nesting. Missing `time` values are not errors; they default to `"N/A"`.
pub fn normalize_days(days: &EmbeddedValue) -> Result<Vec<NormalizedShowing>, ScrapeError> {
    let cinemas = days
        .as_object()
        .ok_or_else(|| shape("`days` is not an object".to_owned()))?;

    let mut showings = Vec::new();
    for (cinema_key, day_list) in cinemas {
        let cinema_name = cinema_display_name(cinema_key);
        let day_entries = day_list
            .as_array()
            .ok_or_else(|| shape(format!("days[{cinema_key:?}] is not an array")))?;

        for (day_idx, day) in day_entries.iter().enumerate() {
            let date = day
                .get("date")
                .and_then(EmbeddedValue::as_str)
                .ok_or_else(|| {
                    shape(format!(
                        "days[{cinema_key:?}][{day_idx}] has no string `date`"
                    ))
                })?;
            let events = day
                .get("events")
                .and_then(EmbeddedValue::as_array)
                .ok_or_else(|| {
                    shape(format!(
                        "days[{cinema_key:?}][{day_idx}] has no `events` array"
                    ))
                })?;

            for (event_idx, event) in events.iter().enumerate() {
                let movie_title = event
                    .get("movieTitle")
                    .and_then(EmbeddedValue::as_str)
                    .ok_or_else(|| {
                        shape(format!(
                            "days[{cinema_key:?}][{day_idx}].events[{event_idx}] has no string `movieTitle`"
                        ))
                    })?;
                let times = event
                    .get("times")
                    .and_then(EmbeddedValue::as_array)
                    .ok_or_else(|| {
                        shape(format!(
                            "days[{cinema_key:?}][{day_idx}].events[{event_idx}] has no `times` array"
                        ))
                    })?;

                for time_entry in times {
                    // Absent or empty `time` becomes the placeholder; the
                    // record always carries all four fields.
                    let time = time_entry
                        .get("time")
                        .and_then(EmbeddedValue::as_str)
                        .filter(|t| !t.is_empty())
                        .unwrap_or(NOT_AVAILABLE);

                    showings.push(NormalizedShowing {
                        movie_title: movie_title.to_owned(),
                        date: date.to_owned(),
                        time: time.to_owned(),
                        cinema_name: cinema_name.clone(),
                    });
                }
            }
        }
    }
    Ok(showings)
}

/// Derives a display name from a cinema key.
///
/// Underscores and hyphens become spaces, digits are stripped, whitespace is
/// collapsed and trimmed, and the first letter of each remaining word is
/// uppercased (the rest of the word is left untouched). An empty result
/// becomes `"N/A"`.
///
/// `"Milano_Bicocca-1"` → `"Milano Bicocca"`.
#[must_use]
pub fn cinema_display_name(cinema_key: &str) -> String {
    let spaced: String = cinema_key
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .filter(|c| !c.is_ascii_digit())
        .collect();

    let name = spaced
        .split_whitespace()
        .map(uppercase_first)
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        NOT_AVAILABLE.to_owned()
    } else {
        name
    }
}

fn uppercase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn shape(reason: String) -> ScrapeError {
    ScrapeError::Shape { reason }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
