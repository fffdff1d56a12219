//! Daily schedule resolution.
//!
//! For one route and one calendar date, decides which open/close window
//! applies and where it came from. This is the defining business rule of the
//! engine: an exception day-row strictly overrides the weekly entry, but an
//! exception that does not list a day-of-week defers to weekly rather than
//! blanket-closing its whole date range.

use chrono::NaiveDate;

use crate::api::RouteId;
use crate::db::repository::{RepositoryResult, ScheduleRepository};
use crate::models::{dow_index, DailySchedule, ScheduleSource};

/// Resolve the applicable schedule for `route_id` on `date`.
///
/// Precedence:
/// 1. An active exception with an hour row for `date`'s day-of-week wins,
///    whatever that row says (it can close a normally-open day or open a
///    normally-closed one).
/// 2. An active exception without a row for that day falls through to the
///    weekly entry.
/// 3. No weekly entry means no recurring window: closed, `source = none`.
pub async fn resolve_for_date<R: ScheduleRepository + ?Sized>(
    repo: &R,
    route_id: RouteId,
    date: NaiveDate,
) -> RepositoryResult<DailySchedule> {
    let dow = dow_index(date);

    if let Some(exception) = repo.active_exception(route_id, date).await? {
        if let Some(hours) = repo.exception_hours(exception.id, dow).await? {
            return Ok(DailySchedule::from_hours(ScheduleSource::Exception, &hours));
        }
    }

    if let Some(hours) = repo.weekly_entry(route_id, dow).await? {
        return Ok(DailySchedule::from_hours(ScheduleSource::Weekly, &hours));
    }

    Ok(DailySchedule::unscheduled())
}
