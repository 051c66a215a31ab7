use chrono::{DateTime, Utc};

/// Current UTC time truncated to whole milliseconds.
///
/// Timestamps are persisted as Unix milliseconds, so anything finer would not
/// survive a write/read cycle and freshly built records would compare unequal
/// to their stored form.
pub fn utc_now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}
