use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime};

/// Storage format for week boundaries, matching the archive table keys
pub const WEEK_KEY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The most recent Sunday at midnight relative to `reference`.
/// A Sunday maps to itself at midnight.
pub fn current_week_start(reference: NaiveDateTime) -> NaiveDateTime {
    let days_since_sunday = reference.weekday().num_days_from_sunday() as i64;
    let start_day = reference.date() - Duration::days(days_since_sunday);
    start_day.and_time(NaiveTime::MIN)
}

/// Start (Sunday 00:00:00) and end (Saturday 23:59:59) of the week
/// containing `reference`.
pub fn week_boundaries(reference: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let start = current_week_start(reference);
    let end = start + Duration::days(7) - Duration::seconds(1);
    (start, end)
}

/// Render a date as the archive key string
pub fn format_week_key(date: NaiveDateTime) -> String {
    date.format(WEEK_KEY_FORMAT).to_string()
}

/// Parse a week boundary, accepting both the storage format and
/// RFC 3339 timestamps
pub fn parse_week_date(date_str: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, WEEK_KEY_FORMAT) {
        return Ok(dt);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt);
    }

    anyhow::bail!("Failed to parse week date: {}", date_str)
}

/// Display label for a week boundary, e.g. "Jan 5, 2025"
pub fn format_week_label(date: NaiveDateTime) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Display label for a whole week, e.g. "Jan 5, 2025 - Jan 11, 2025"
pub fn format_date_range(week_start: &str, week_end: &str) -> Result<String> {
    let start = parse_week_date(week_start)?;
    let end = parse_week_date(week_end)?;
    Ok(format!(
        "{} - {}",
        format_week_label(start),
        format_week_label(end)
    ))
}
