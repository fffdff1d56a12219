//! Shared fixtures for integration tests.

// Not every suite uses every helper.
#![allow(dead_code)]

use chrono::{NaiveTime, Utc};

use duxcall_rust::api::{HospitalId, RouteId};
use duxcall_rust::db::repository::AdminRepository;
use duxcall_rust::db::LocalRepository;
use duxcall_rust::models::DayHours;

pub fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// A week with every day marked closed.
pub fn closed_week() -> Vec<DayHours> {
    (0u8..7).map(DayHours::closed).collect()
}

/// A week open `open..close` on every day.
pub fn open_week(open: NaiveTime, close: NaiveTime) -> Vec<DayHours> {
    (0u8..7).map(|dow| DayHours::open(dow, open, close)).collect()
}

/// Create a hospital with one route and the given weekly pattern.
pub async fn hospital_with_route(
    repo: &LocalRepository,
    code: &str,
    timezone: &str,
    route_key: &str,
    week: Vec<DayHours>,
) -> (HospitalId, RouteId) {
    let hospital = repo
        .upsert_hospital(code, "Integration Hospital", timezone)
        .await
        .unwrap();
    let route = repo
        .upsert_route(hospital.id, route_key, "Integration Route", "0312340000", 10)
        .await
        .unwrap();
    repo.replace_weekly_hours(route.id, week).await.unwrap();
    (hospital.id, route.id)
}

/// UTC instant that corresponds to the given Tokyo wall-clock time.
pub fn tokyo_now_utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> chrono::DateTime<Utc> {
    use chrono::TimeZone;
    chrono_tz::Asia::Tokyo
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
        .with_timezone(&Utc)
}
