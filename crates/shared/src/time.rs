//! Timezone-aware calendar helpers and minute-of-day arithmetic.
//!
//! All reminder scheduling works on civil (wall-clock) time in a configured
//! IANA timezone, while storage timestamps stay in UTC. This module is the
//! single place that converts between the two.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// Number of minutes in a civil day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Civil date/time parts of an instant in a given timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// Day of week with Sunday = 0, matching the schedule table convention.
    pub day_of_week: u32,
}

impl LocalParts {
    /// Minute-of-day of these parts, in `[0, 1439]`.
    pub fn minute_of_day(&self) -> u32 {
        minutes_of_day(self.hour, self.minute)
    }
}

/// Resolve an absolute instant to civil date/time parts in `tz`.
///
/// DST transitions are handled by chrono-tz; the result is the wall clock an
/// observer in `tz` would read at that instant.
pub fn local_parts(instant: DateTime<Utc>, tz: Tz) -> LocalParts {
    let local = tz.from_utc_datetime(&instant.naive_utc());
    LocalParts {
        year: local.year(),
        month: local.month(),
        day: local.day(),
        hour: local.hour(),
        minute: local.minute(),
        day_of_week: local.weekday().num_days_from_sunday(),
    }
}

/// Civil date of an instant in `tz`.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    tz.from_utc_datetime(&instant.naive_utc()).date_naive()
}

/// Stable per-day identifier ("YYYY-MM-DD") independent of server-local time.
pub fn date_key(instant: DateTime<Utc>, tz: Tz) -> String {
    local_date(instant, tz).format("%Y-%m-%d").to_string()
}

/// UTC bounds `[start, end)` of the civil day containing `instant` in `tz`.
///
/// Used for "created today" range queries against UTC timestamps. On a DST
/// spring-forward day the nonexistent local midnight falls back to the
/// earliest valid mapping.
pub fn local_day_bounds_utc(instant: DateTime<Utc>, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let day = local_date(instant, tz);
    let start = civil_midnight_utc(day, tz);
    let end = civil_midnight_utc(day + chrono::Duration::days(1), tz);
    (start, end)
}

fn civil_midnight_utc(day: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = day.and_hms_opt(0, 0, 0).unwrap_or_default();
    match tz.from_local_datetime(&midnight) {
        chrono::LocalResult::Single(dt) => dt.with_timezone(&Utc),
        chrono::LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        // Midnight skipped by DST: take the first valid instant after it.
        chrono::LocalResult::None => tz
            .from_local_datetime(&(midnight + chrono::Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight)),
    }
}

/// Minute-of-day for a wall-clock `(hour, minute)`, in `[0, 1439]`.
pub fn minutes_of_day(hour: u32, minute: u32) -> u32 {
    (hour * 60 + minute) % MINUTES_PER_DAY
}

/// Normalize a possibly negative minute offset into `[0, 1439]`.
pub fn wrap_minutes(x: i64) -> u32 {
    x.rem_euclid(i64::from(MINUTES_PER_DAY)) as u32
}

/// Minutes elapsed from `target` to `current`, wrapping forward through
/// midnight when necessary. Result is in `[0, 1439]`.
///
/// `wrapped_forward_diff(now, t) <= window` answers "has the daily instant
/// `t` already passed, and no more than `window` minutes ago".
pub fn wrapped_forward_diff(current: u32, target: u32) -> u32 {
    wrap_minutes(i64::from(current) - i64::from(target))
}

/// Format a minute-of-day as an "HH:MM" label.
pub fn format_minute_of_day(minute_of_day: u32) -> String {
    let m = minute_of_day % MINUTES_PER_DAY;
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// Parse a schedule time string into `(hour, minute)`.
///
/// Accepts `HH:MM`, a bare hour (`"9"`), and `.`-separated input (`"9.30"`).
/// Unparsable or out-of-range values return `None`; callers degrade to
/// "no reminder" rather than failing the run.
pub fn parse_entry_time(raw: &str) -> Option<(u32, u32)> {
    let normalized = raw.trim().replace('.', ":");
    if normalized.is_empty() {
        return None;
    }

    let (hour_part, minute_part) = match normalized.split_once(':') {
        Some((h, m)) => (h, m),
        None => (normalized.as_str(), "0"),
    };

    let hour: u32 = hour_part.trim().parse().ok()?;
    let minute: u32 = minute_part.trim().parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Parse a schedule time string directly into a minute-of-day.
pub fn parse_entry_minutes(raw: &str) -> Option<u32> {
    parse_entry_time(raw).map(|(h, m)| minutes_of_day(h, m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Madrid;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_local_parts_winter_offset() {
        // Madrid is UTC+1 in January.
        let parts = local_parts(utc(2024, 1, 15, 8, 30), Madrid);
        assert_eq!(parts.hour, 9);
        assert_eq!(parts.minute, 30);
        assert_eq!(parts.day, 15);
        assert_eq!(parts.day_of_week, 1); // Monday
    }

    #[test]
    fn test_local_parts_summer_offset() {
        // Madrid is UTC+2 in July.
        let parts = local_parts(utc(2024, 7, 15, 8, 30), Madrid);
        assert_eq!(parts.hour, 10);
        assert_eq!(parts.minute_of_day(), 630);
    }

    #[test]
    fn test_local_parts_crosses_midnight() {
        // 23:30 UTC on the 14th is 00:30 local on the 15th.
        let parts = local_parts(utc(2024, 1, 14, 23, 30), Madrid);
        assert_eq!(parts.day, 15);
        assert_eq!(parts.hour, 0);
        assert_eq!(parts.day_of_week, 1);
    }

    #[test]
    fn test_date_key_uses_local_day() {
        assert_eq!(date_key(utc(2024, 1, 14, 23, 30), Madrid), "2024-01-15");
        assert_eq!(date_key(utc(2024, 1, 14, 22, 30), Madrid), "2024-01-14");
    }

    #[test]
    fn test_local_day_bounds_cover_local_day() {
        let (start, end) = local_day_bounds_utc(utc(2024, 1, 15, 12, 0), Madrid);
        // Local midnight on the 15th is 23:00 UTC on the 14th.
        assert_eq!(start, utc(2024, 1, 14, 23, 0));
        assert_eq!(end, utc(2024, 1, 15, 23, 0));
    }

    #[test]
    fn test_local_day_bounds_dst_spring_forward() {
        // 2024-03-31 is the spring-forward day in Madrid (23h long).
        let (start, end) = local_day_bounds_utc(utc(2024, 3, 31, 12, 0), Madrid);
        assert_eq!(end - start, chrono::Duration::hours(23));
    }

    #[test]
    fn test_minutes_of_day() {
        assert_eq!(minutes_of_day(0, 0), 0);
        assert_eq!(minutes_of_day(9, 5), 545);
        assert_eq!(minutes_of_day(23, 59), 1439);
    }

    #[test]
    fn test_wrap_minutes_negative() {
        assert_eq!(wrap_minutes(-1), 1439);
        assert_eq!(wrap_minutes(-5), 1435);
        assert_eq!(wrap_minutes(1440), 0);
        assert_eq!(wrap_minutes(1441), 1);
    }

    #[test]
    fn test_wrapped_forward_diff() {
        assert_eq!(wrapped_forward_diff(540, 540), 0);
        assert_eq!(wrapped_forward_diff(545, 540), 5);
        // Target not yet reached: wraps to a large value.
        assert_eq!(wrapped_forward_diff(536, 540), 1436);
        // Forward through midnight: 00:10 is 40 minutes after 23:30.
        assert_eq!(wrapped_forward_diff(10, 1410), 40);
    }

    #[test]
    fn test_format_minute_of_day() {
        assert_eq!(format_minute_of_day(0), "00:00");
        assert_eq!(format_minute_of_day(535), "08:55");
        assert_eq!(format_minute_of_day(1439), "23:59");
    }

    #[test]
    fn test_parse_entry_time_standard() {
        assert_eq!(parse_entry_time("09:00"), Some((9, 0)));
        assert_eq!(parse_entry_time("9:5"), Some((9, 5)));
        assert_eq!(parse_entry_time(" 22:30 "), Some((22, 30)));
    }

    #[test]
    fn test_parse_entry_time_bare_hour_and_dots() {
        assert_eq!(parse_entry_time("9"), Some((9, 0)));
        assert_eq!(parse_entry_time("9.30"), Some((9, 30)));
    }

    #[test]
    fn test_parse_entry_time_rejects_garbage() {
        assert_eq!(parse_entry_time(""), None);
        assert_eq!(parse_entry_time("abc"), None);
        assert_eq!(parse_entry_time("25:00"), None);
        assert_eq!(parse_entry_time("12:75"), None);
    }

    #[test]
    fn test_parse_entry_minutes() {
        assert_eq!(parse_entry_minutes("09:00"), Some(540));
        assert_eq!(parse_entry_minutes("00:00"), Some(0));
        assert_eq!(parse_entry_minutes("nope"), None);
    }
}
