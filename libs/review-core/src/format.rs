//! Human-readable scheduling text.

use chrono::{DateTime, Utc};

use crate::types::CardReviewRecord;

const SECS_PER_HOUR: i64 = 60 * 60;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

/// Bucketed description of when a card comes due.
///
/// Hours and days round up on the remaining time; weeks and months are
/// integer divisions of the ceiling-day count by 7 and 30.
pub fn next_review_text(record: &CardReviewRecord, now: DateTime<Utc>) -> String {
    let remaining = (record.next_review_date - now).num_seconds();
    if remaining <= 0 {
        return "Due now".to_string();
    }

    let days = ceil_div(remaining, SECS_PER_DAY);
    if remaining < SECS_PER_DAY {
        let hours = ceil_div(remaining, SECS_PER_HOUR);
        format!("Due in {} hour{}", hours, plural(hours))
    } else if days == 1 {
        "Due tomorrow".to_string()
    } else if days < 7 {
        format!("Due in {} days", days)
    } else if days < 30 {
        let weeks = days / 7;
        format!("Due in {} week{}", weeks, plural(weeks))
    } else {
        let months = days / 30;
        format!("Due in {} month{}", months, plural(months))
    }
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    (value + divisor - 1) / divisor
}

fn plural(count: i64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
