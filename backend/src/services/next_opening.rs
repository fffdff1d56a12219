//! Bounded forward search for the next opening instant.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use crate::api::RouteId;
use crate::db::repository::{RepositoryResult, ScheduleRepository};
use crate::models::combine_local;
use crate::services::resolver::resolve_for_date;

/// How many days ahead of today the search examines, inclusive.
///
/// One constant for every call site: repeated queries at the same instant
/// must never disagree about whether a route is reachable within the bound.
pub const LOOKAHEAD_DAYS: i64 = 14;

/// Find the next instant at which the route opens, scanning today plus
/// [`LOOKAHEAD_DAYS`] days forward.
///
/// Today qualifies only with a window that has not started yet (`now <
/// start`); a window already in progress or already past is not a "next
/// opening". Any later day qualifies with its first valid window. Days that
/// resolve closed, have an invalid pair, or cannot be anchored in the zone
/// are skipped. Returns `None` when the bound is exhausted.
pub async fn next_open_at<R: ScheduleRepository + ?Sized>(
    repo: &R,
    route_id: RouteId,
    now: DateTime<Tz>,
) -> RepositoryResult<Option<DateTime<Tz>>> {
    let today = now.date_naive();
    let tz = now.timezone();

    for day in 0..=LOOKAHEAD_DAYS {
        let date = today + Duration::days(day);
        let schedule = resolve_for_date(repo, route_id, date).await?;
        let Some((open, close)) = schedule.valid_window() else {
            continue;
        };
        let (Some(start), Some(_end)) = (
            combine_local(date, open, tz),
            combine_local(date, close, tz),
        ) else {
            continue;
        };

        if day == 0 {
            if now < start {
                return Ok(Some(start));
            }
            continue;
        }
        return Ok(Some(start));
    }

    Ok(None)
}
