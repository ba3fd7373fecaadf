//! Formatting helpers for rendering thread and message timestamps.

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::error::{ParleyError, Result};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Format a millisecond timestamp relative to `now`.
///
/// Timestamps falling on the same calendar day as `now` (in `tz`) render as a
/// 12-hour clock time, anything else as month and day.
///
/// # Examples
///
/// ```
/// use jiff::Timestamp;
/// use jiff::tz::TimeZone;
/// use parley::formatting::format_abbreviated_datetime;
///
/// let now: Timestamp = "2024-03-05T18:00:00Z".parse().unwrap();
/// let earlier: Timestamp = "2024-03-05T09:07:00Z".parse().unwrap();
/// let last_year: Timestamp = "2023-11-20T09:07:00Z".parse().unwrap();
///
/// assert_eq!(
///     format_abbreviated_datetime(earlier.as_millisecond(), now, &TimeZone::UTC).unwrap(),
///     "9:07 AM"
/// );
/// assert_eq!(
///     format_abbreviated_datetime(last_year.as_millisecond(), now, &TimeZone::UTC).unwrap(),
///     "Nov 20"
/// );
/// ```
pub fn format_abbreviated_datetime(millis: i64, now: Timestamp, tz: &TimeZone) -> Result<String> {
    let when = Timestamp::from_millisecond(millis)
        .map_err(|e| ParleyError::InvalidTimestamp(format!("{millis}: {e}")))?
        .to_zoned(tz.clone());
    let today = now.to_zoned(tz.clone());

    if when.date() == today.date() {
        let hour = when.hour();
        let suffix = if hour < 12 { "AM" } else { "PM" };
        let hour12 = match hour % 12 {
            0 => 12,
            h => h,
        };
        Ok(format!("{}:{:02} {}", hour12, when.minute(), suffix))
    } else {
        let month = MONTHS[(when.month() - 1) as usize];
        Ok(format!("{} {}", month, when.day()))
    }
}

/// Format against the current time in the system time zone.
pub fn format_abbreviated_datetime_now(millis: i64) -> Result<String> {
    format_abbreviated_datetime(millis, Timestamp::now(), &TimeZone::system())
}
