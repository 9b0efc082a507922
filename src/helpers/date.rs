//! Date helper functions

use chrono::{DateTime, Utc};

/// Get relative time (like "2 hours ago") of `date` as seen from `now`
///
/// Thresholds follow the usual moment.js `fromNow` buckets, so 50 minutes
/// reads as "an hour ago" and 40 days as "a month ago".
///
/// # Examples
/// ```ignore
/// relative_date(&posted, &Utc::now()) // -> "3 days ago"
/// ```
pub fn relative_date(date: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(*date).num_seconds();
    let phrase = humanize(delta.unsigned_abs());

    if delta < 0 {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

fn humanize(seconds: u64) -> String {
    let minutes = div_round(seconds, 60);
    let hours = div_round(seconds, 3600);
    let days = div_round(seconds, 86_400);

    if seconds < 45 {
        "a few seconds".to_string()
    } else if seconds < 90 {
        "a minute".to_string()
    } else if minutes < 45 {
        format!("{} minutes", minutes)
    } else if minutes < 90 {
        "an hour".to_string()
    } else if hours < 22 {
        format!("{} hours", hours)
    } else if hours < 36 {
        "a day".to_string()
    } else if days < 26 {
        format!("{} days", days)
    } else if days < 45 {
        "a month".to_string()
    } else if days < 320 {
        format!("{} months", div_round(days * 12, 365).max(2))
    } else if days < 548 {
        "a year".to_string()
    } else {
        format!("{} years", div_round(days, 365).max(2))
    }
}

/// Integer division rounding half up
fn div_round(n: u64, d: u64) -> u64 {
    (n + d / 2) / d
}

/// Format a date in ISO 8601, for `<time datetime>`
pub fn date_xml(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
