//! Route availability facade.
//!
//! Composes the daily resolver, the status evaluator and the next-opening
//! search into the per-hospital payload the patient client consumes. The
//! engine is a pure function of (schedule data, current instant): callers
//! pass "now" explicitly and the facade holds no state of its own.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::api::{
    HospitalInfo, NewsEntry, PatientHospitalData, RouteAvailability, TimeWindow, TodayStatus,
};
use crate::db::repository::{
    FullRepository, HospitalRepository, RepositoryResult, ScheduleRepository,
};
use crate::models::resolve_timezone;
use crate::services::next_opening::next_open_at;
use crate::services::resolver::resolve_for_date;
use crate::services::status::evaluate;

/// Maximum number of news entries in the payload.
const NEWS_LIMIT: usize = 10;

/// Evaluate one route's reachability at `now`.
///
/// `next_open_at` is searched only while not open, so it is always null for
/// an open route and may still be null for a closed one when nothing was
/// found within the lookahead bound.
pub async fn route_today<R: ScheduleRepository + ?Sized>(
    repo: &R,
    route_id: crate::api::RouteId,
    now: DateTime<Tz>,
) -> RepositoryResult<TodayStatus> {
    let schedule = resolve_for_date(repo, route_id, now.date_naive()).await?;
    let outcome = evaluate(&schedule, now);

    let next_open = if outcome.is_open {
        None
    } else {
        next_open_at(repo, route_id, now).await?
    };

    Ok(TodayStatus {
        is_open: outcome.is_open,
        reason: outcome.reason,
        source: schedule.source,
        window: outcome.window.map(|(open, close)| TimeWindow {
            open: open.format("%H:%M").to_string(),
            close: close.format("%H:%M").to_string(),
        }),
        next_open_at: next_open.map(|instant| instant.to_rfc3339()),
    })
}

/// Assemble the full patient payload for a hospital code.
///
/// Returns `Ok(None)` for an unknown or deactivated code (the HTTP layer
/// turns that into a 404). The hospital's zone is resolved with fallback, and
/// every enabled route is evaluated independently: one malformed route
/// degrades to a closed placeholder instead of failing the batch. Routes are
/// assembled in repository (sort) order.
pub async fn hospital_availability<R: FullRepository + ?Sized>(
    repo: &R,
    code: &str,
    now_utc: DateTime<Utc>,
) -> RepositoryResult<Option<PatientHospitalData>> {
    let Some(hospital) = repo.hospital_by_code(code).await? else {
        return Ok(None);
    };

    let tz = resolve_timezone(&hospital.timezone);
    let now = now_utc.with_timezone(&tz);

    let news = repo
        .published_news(hospital.id, NEWS_LIMIT)
        .await?
        .into_iter()
        .map(|item| NewsEntry {
            title: item.title,
            body: item.body,
            priority: item.priority,
            updated_at: Some(item.updated_at.with_timezone(&tz).to_rfc3339()),
        })
        .collect();

    let routes = repo.enabled_routes(hospital.id).await?;
    let mut out_routes = Vec::with_capacity(routes.len());
    for route in routes {
        let today = match route_today(repo, route.id, now).await {
            Ok(status) => status,
            Err(err) => {
                log::warn!("route {} ({}) degraded to closed: {}", route.id, route.key, err);
                TodayStatus::unavailable()
            }
        };
        out_routes.push(RouteAvailability {
            key: route.key,
            label: route.label,
            phone: route.phone,
            today,
        });
    }

    Ok(Some(PatientHospitalData {
        hospital: HospitalInfo {
            code: hospital.code,
            name: hospital.name,
            timezone: tz.name().to_string(),
        },
        news,
        routes: out_routes,
    }))
}
