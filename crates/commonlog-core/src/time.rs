//! Timestamp formatting for text log lines.

use chrono::{DateTime, Local, TimeZone};

/// strftime pattern for log line timestamps, millisecond precision.
pub const TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.3f";

/// The current local time formatted with [`TIME_FORMAT`].
pub fn timestamp() -> String {
    format_timestamp(&Local::now())
}

/// Format `time` with [`TIME_FORMAT`].
pub fn format_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format(TIME_FORMAT).to_string()
}
