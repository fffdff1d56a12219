//! Demo dataset seeding.
//!
//! Builds a small, fully featured hospital through the repository write
//! surface: two routes with different weekly patterns, a date-ranged
//! exception and one announcement. Re-running converges to the same state,
//! so the endpoint can be hit repeatedly during development.

use chrono::{NaiveDate, NaiveTime, Utc};

use crate::db::repository::{AdminRepository, FullRepository, RepositoryError, RepositoryResult};
use crate::models::{DayHours, NewException, NewsPriority};

/// Code of the hospital the seed provisions.
pub const DEMO_HOSPITAL_CODE: &str = "tokyo-clinic";

fn hm(hour: u32, minute: u32) -> RepositoryResult<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
        RepositoryError::InternalError(format!("invalid seed time {:02}:{:02}", hour, minute))
    })
}

fn ymd(year: i32, month: u32, day: u32) -> RepositoryResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        RepositoryError::InternalError(format!("invalid seed date {}-{}-{}", year, month, day))
    })
}

/// Weekday pattern helper: `open..close` Monday through Friday, Saturday per
/// `saturday`, Sunday closed.
fn weekday_pattern(
    open: NaiveTime,
    close: NaiveTime,
    saturday: Option<(NaiveTime, NaiveTime)>,
) -> Vec<DayHours> {
    let mut week: Vec<DayHours> = (0u8..5).map(|dow| DayHours::open(dow, open, close)).collect();
    week.push(match saturday {
        Some((sat_open, sat_close)) => DayHours::open(5, sat_open, sat_close),
        None => DayHours::closed(5),
    });
    week.push(DayHours::closed(6));
    week
}

/// Provision the demo hospital and return its code.
pub async fn seed_demo_data(repo: &dyn FullRepository) -> RepositoryResult<String> {
    let hospital = repo
        .upsert_hospital(DEMO_HOSPITAL_CODE, "Tokyo Sample Hospital", "Asia/Tokyo")
        .await?;

    // Reservation: Mon-Fri 9-17, Sat 9-12, Sun closed.
    let reservation = repo
        .upsert_route(hospital.id, "reservation", "Reservation", "0312345678", 10)
        .await?;
    repo.replace_weekly_hours(
        reservation.id,
        weekday_pattern(hm(9, 0)?, hm(17, 0)?, Some((hm(9, 0)?, hm(12, 0)?))),
    )
    .await?;

    // Visiting: Mon-Fri 13-16, weekend closed.
    let visit = repo
        .upsert_route(hospital.id, "visit", "Visiting", "0399990000", 20)
        .await?;
    repo.replace_weekly_hours(visit.id, weekday_pattern(hm(13, 0)?, hm(16, 0)?, None))
        .await?;

    // Year-end staffing: visiting hours shrink to 14-15 on weekdays for the
    // last days of the fiscal year, weekend stays closed.
    let reduced_open = hm(14, 0)?;
    let reduced_close = hm(15, 0)?;
    let mut exception_hours: Vec<DayHours> = (0u8..5)
        .map(|dow| DayHours::open(dow, reduced_open, reduced_close))
        .collect();
    exception_hours.push(DayHours::closed(5));
    exception_hours.push(DayHours::closed(6));
    repo.add_exception(NewException {
        route_id: visit.id,
        start_date: ymd(2026, 3, 20)?,
        end_date: ymd(2026, 3, 31)?,
        title: Some("Year-end staffing".to_string()),
        created_at: Utc::now(),
        hours: exception_hours,
    })
    .await?;

    repo.publish_news(
        hospital.id,
        "Visiting hours notice",
        Some("Current visiting reception hours are shown under the Visiting contact."),
        NewsPriority::High,
    )
    .await?;

    log::info!("seeded demo hospital {}", DEMO_HOSPITAL_CODE);
    Ok(DEMO_HOSPITAL_CODE.to_string())
}
