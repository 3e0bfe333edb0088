//! Human-readable dates for event cards.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub const INVALID_DATE: &str = "Invalid date";

const DATE_FORMAT: &str = "%B %-d, %Y";

/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` (read as UTC)
/// and plain `YYYY-MM-DD` dates.
fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S")
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `"2025-01-05"` → `"January 5, 2025"`.
pub fn format_date(input: &str) -> String {
    match parse_date(input) {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => {
            tracing::debug!("[time_format] Unparseable date {:?}", input);
            INVALID_DATE.to_string()
        }
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// Relative phrasing for recent dates, the absolute date after a week.
pub fn format_relative_time(input: &str, now: DateTime<Utc>) -> String {
    let Some(date) = parse_date(input) else {
        return INVALID_DATE.to_string();
    };

    let elapsed = now.signed_duration_since(date);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if elapsed.num_seconds() < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else {
        date.format(DATE_FORMAT).to_string()
    }
}
