//! Date range boundaries.
//!
//! Date filters store UTC epoch milliseconds. Editors show and accept
//! `datetime-local` style text in the user's own offset, so a boundary typed
//! as "10:00" local always stores the instant that displays as "10:00" again.

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::TimeZone;

const INPUT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Converts editor text typed in `offset` to stored epoch milliseconds.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS]` or a bare `YYYY-MM-DD` (midnight). Empty
/// or unreadable input means "no bound".
pub fn local_input_to_epoch_ms(input: &str, offset: FixedOffset) -> Option<i64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let naive = INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.timestamp_millis())
}

/// Converts stored epoch milliseconds to editor text in `offset`
/// (`YYYY-MM-DDTHH:MM`).
pub fn epoch_ms_to_local_input(ms: i64, offset: FixedOffset) -> Option<String> {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.with_timezone(&offset).format("%Y-%m-%dT%H:%M").to_string())
}

/// Formats a boundary for display, e.g. `3/1/2024 10:00 am`.
pub fn format_medium(ms: f64, offset: FixedOffset) -> String {
    match DateTime::from_timestamp_millis(ms as i64) {
        Some(dt) => dt
            .with_timezone(&offset)
            .format("%-m/%-d/%Y %-I:%M %P")
            .to_string(),
        None => "-".to_string(),
    }
}
