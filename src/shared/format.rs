//! Display helpers shared by the dashboard views.

use chrono::{DateTime, Local, Utc};

/// Devices allowed without a subscription.
pub const FREE_DEVICE_LIMIT: usize = 1;
/// Devices allowed once the account has a subscription of any status.
pub const SUBSCRIBED_DEVICE_LIMIT: usize = 10;

const MS_PER_DAY: i64 = 86_400_000;

/// Local date and time, or `N/A` when the server sent nothing.
pub fn format_date(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(date) => date
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "N/A".to_string(),
    }
}

/// Whole days left until `end`, rounded up; never negative.
pub fn days_remaining(end: Option<&DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    let Some(end) = end else {
        return 0;
    };
    let millis = (*end - now).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + MS_PER_DAY - 1) / MS_PER_DAY
}

pub fn device_limit(has_subscription: bool) -> usize {
    if has_subscription {
        SUBSCRIBED_DEVICE_LIMIT
    } else {
        FREE_DEVICE_LIMIT
    }
}

/// First eight characters of an id, for compact listings.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((index, _)) => &id[..index],
        None => id,
    }
}
