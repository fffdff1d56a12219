//! Time-zone resolution and local-time anchoring helpers.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

/// Zone substituted whenever a hospital's stored zone name is absent or
/// invalid. Requests never fail over a bad zone configuration.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Tokyo;

/// Resolve a stored IANA zone name, falling back to [`DEFAULT_TIMEZONE`].
///
/// An empty or whitespace-only name counts as absent. An unparseable name is
/// logged once per request at warn level and replaced by the default.
pub fn resolve_timezone(name: &str) -> Tz {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return DEFAULT_TIMEZONE;
    }
    match trimmed.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            log::warn!(
                "invalid timezone {:?}, falling back to {}",
                trimmed,
                DEFAULT_TIMEZONE.name()
            );
            DEFAULT_TIMEZONE
        }
    }
}

/// Anchor a local date + time in `tz`.
///
/// Returns `None` when the local time does not exist in the zone (DST spring
/// gap); an ambiguous time resolves to its earlier occurrence.
pub fn combine_local(date: NaiveDate, time: NaiveTime, tz: Tz) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&date.and_time(time)).earliest()
}

/// Day-of-week index used by every hour row: 0 = Monday ... 6 = Sunday.
pub fn dow_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}
