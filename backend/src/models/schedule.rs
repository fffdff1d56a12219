//! Domain rows and schedule resolution types.
//!
//! These are the entities the engine reads: hospitals, routes, hour rows and
//! date-ranged exceptions, plus the closed enums describing a resolution
//! result. All of them are produced by the administrative surface and are
//! read-only from the engine's point of view.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{ExceptionId, HospitalId, RouteId};

/// A facility reachable by phone.
#[derive(Debug, Clone, PartialEq)]
pub struct Hospital {
    pub id: HospitalId,
    /// Unique, immutable public code (used in URLs and QR payloads).
    pub code: String,
    pub name: String,
    /// IANA zone name as stored. May be empty or invalid; resolution falls
    /// back to [`crate::models::time::DEFAULT_TIMEZONE`].
    pub timezone: String,
    pub is_active: bool,
}

/// A phone contact purpose belonging to one hospital (reservations, visiting, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub id: RouteId,
    pub hospital_id: HospitalId,
    /// Unique per hospital.
    pub key: String,
    pub label: String,
    pub phone: String,
    pub is_enabled: bool,
    /// Display ordering only; irrelevant to resolution.
    pub sort_order: i32,
}

/// One day-of-week hour row.
///
/// The same shape backs both the weekly schedule and exception hours: a closed
/// flag and an optional local open/close pair. When `is_closed` is false both
/// times must be present with `open < close`; anything else degrades to closed
/// on the read path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayHours {
    /// 0 = Monday ... 6 = Sunday.
    pub dow: u8,
    pub is_closed: bool,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
}

impl DayHours {
    /// A row marking the day fully closed.
    pub fn closed(dow: u8) -> Self {
        DayHours {
            dow,
            is_closed: true,
            open_time: None,
            close_time: None,
        }
    }

    /// An open row with the given local window.
    pub fn open(dow: u8, open_time: NaiveTime, close_time: NaiveTime) -> Self {
        DayHours {
            dow,
            is_closed: false,
            open_time: Some(open_time),
            close_time: Some(close_time),
        }
    }
}

/// A date-ranged override of a route's weekly schedule (holiday, special closure).
///
/// Ranges are inclusive on both ends and may overlap; when two exceptions of
/// the same route cover one date, the most recently created wins entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteException {
    pub id: ExceptionId,
    pub route_id: RouteId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RouteException {
    /// Whether `date` falls inside the inclusive range.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Write payload for creating an exception with its day rows in one operation.
#[derive(Debug, Clone)]
pub struct NewException {
    pub route_id: RouteId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Day rows the exception explicitly lists. Days without a row defer to
    /// the weekly schedule.
    pub hours: Vec<DayHours>,
}

/// Published announcement shown in the patient payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    pub hospital_id: HospitalId,
    pub title: String,
    pub body: Option<String>,
    pub priority: NewsPriority,
    pub is_published: bool,
    pub updated_at: DateTime<Utc>,
}

/// News display priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsPriority {
    High,
    Normal,
}

/// Provenance of the window used for a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSource {
    Exception,
    Weekly,
    None,
}

/// Classification of current reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Open,
    BeforeOpen,
    AfterClose,
    Closed,
}

/// The applicable open/close window for one route on one calendar date,
/// together with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    pub source: ScheduleSource,
    pub is_closed: bool,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
}

impl DailySchedule {
    /// The "no schedule at all" result: no weekly entry, no exception row.
    pub fn unscheduled() -> Self {
        DailySchedule {
            source: ScheduleSource::None,
            is_closed: true,
            open_time: None,
            close_time: None,
        }
    }

    /// Build a resolution result from an hour row and its provenance.
    pub fn from_hours(source: ScheduleSource, hours: &DayHours) -> Self {
        DailySchedule {
            source,
            is_closed: hours.is_closed,
            open_time: hours.open_time,
            close_time: hours.close_time,
        }
    }

    /// The usable open/close pair, or `None` when the day is closed, a time is
    /// missing, or the pair is inverted (`open >= close`). A day without a
    /// usable pair can never evaluate to open.
    pub fn valid_window(&self) -> Option<(NaiveTime, NaiveTime)> {
        if self.is_closed {
            return None;
        }
        match (self.open_time, self.close_time) {
            (Some(open), Some(close)) if open < close => Some((open, close)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_valid_window_requires_open_before_close() {
        let schedule = DailySchedule::from_hours(
            ScheduleSource::Weekly,
            &DayHours::open(0, hm(9, 0), hm(17, 0)),
        );
        assert_eq!(schedule.valid_window(), Some((hm(9, 0), hm(17, 0))));

        let inverted = DailySchedule::from_hours(
            ScheduleSource::Weekly,
            &DayHours::open(0, hm(17, 0), hm(9, 0)),
        );
        assert_eq!(inverted.valid_window(), None);

        let degenerate = DailySchedule::from_hours(
            ScheduleSource::Weekly,
            &DayHours::open(0, hm(9, 0), hm(9, 0)),
        );
        assert_eq!(degenerate.valid_window(), None);
    }

    #[test]
    fn test_valid_window_closed_or_partial_rows() {
        let closed = DailySchedule::from_hours(ScheduleSource::Exception, &DayHours::closed(3));
        assert_eq!(closed.valid_window(), None);

        let partial = DailySchedule {
            source: ScheduleSource::Weekly,
            is_closed: false,
            open_time: Some(hm(9, 0)),
            close_time: None,
        };
        assert_eq!(partial.valid_window(), None);

        assert_eq!(DailySchedule::unscheduled().valid_window(), None);
    }

    #[test]
    fn test_exception_covers_inclusive_bounds() {
        let ex = RouteException {
            id: ExceptionId::new(1),
            route_id: RouteId::new(1),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            title: None,
            created_at: Utc::now(),
        };

        assert!(ex.covers(NaiveDate::from_ymd_opt(2026, 3, 20).unwrap()));
        assert!(ex.covers(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()));
        assert!(!ex.covers(NaiveDate::from_ymd_opt(2026, 3, 19).unwrap()));
        assert!(!ex.covers(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
    }

    #[test]
    fn test_enum_wire_literals() {
        assert_eq!(
            serde_json::to_string(&ScheduleSource::None).unwrap(),
            "\"none\""
        );
        assert_eq!(
            serde_json::to_string(&Reason::AfterClose).unwrap(),
            "\"after_close\""
        );
        assert_eq!(
            serde_json::to_string(&NewsPriority::High).unwrap(),
            "\"high\""
        );
    }
}
