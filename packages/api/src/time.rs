//! Human-readable post ages.

use chrono::{DateTime, Local, Utc};

use crate::models::parse_timestamp;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// Format `created_at` relative to `now`.
///
/// Buckets are half-open on their lower bound: exactly 60 seconds is
/// "1 minute ago". Unparseable or future timestamps read "Just now"; anything a
/// week or older is shown as a local calendar date (`M/D/YYYY`).
pub fn format_relative_time(created_at: &str, now: DateTime<Utc>) -> String {
    let Some(then) = parse_timestamp(created_at) else {
        return "Just now".to_string();
    };
    let elapsed = (now - then).num_seconds();

    if elapsed < MINUTE {
        "Just now".to_string()
    } else if elapsed < HOUR {
        ago(elapsed / MINUTE, "minute")
    } else if elapsed < DAY {
        ago(elapsed / HOUR, "hour")
    } else if elapsed < WEEK {
        ago(elapsed / DAY, "day")
    } else {
        // en-US M/D/YYYY in the viewer's time zone
        then.with_timezone(&Local).format("%-m/%-d/%Y").to_string()
    }
}

fn ago(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
