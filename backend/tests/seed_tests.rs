//! Tests of the demo seed through the full read path.

mod support;

use duxcall_rust::db::{seed_demo_data, LocalRepository, DEMO_HOSPITAL_CODE};
use duxcall_rust::models::{NewsPriority, Reason, ScheduleSource};
use duxcall_rust::services::hospital_availability;

use support::tokyo_now_utc;

#[tokio::test]
async fn test_seed_is_idempotent() {
    let repo = LocalRepository::new();
    seed_demo_data(&repo).await.unwrap();
    seed_demo_data(&repo).await.unwrap();

    assert_eq!(repo.hospital_count(), 1);
    assert_eq!(repo.route_count(), 2);
}

#[tokio::test]
async fn test_seeded_hospital_payload_monday_morning() {
    let repo = LocalRepository::new();
    let code = seed_demo_data(&repo).await.unwrap();
    assert_eq!(code, DEMO_HOSPITAL_CODE);

    // Monday 2026-03-23 10:00 Tokyo, inside the year-end exception range.
    let now = tokyo_now_utc(2026, 3, 23, 10, 0);
    let data = hospital_availability(&repo, DEMO_HOSPITAL_CODE, now)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(data.hospital.timezone, "Asia/Tokyo");
    assert_eq!(data.news.len(), 1);
    assert_eq!(data.news[0].priority, NewsPriority::High);

    // Reservation keeps its weekly 09:00-17:00 window.
    let reservation = &data.routes[0];
    assert_eq!(reservation.key, "reservation");
    assert!(reservation.today.is_open);
    assert_eq!(reservation.today.source, ScheduleSource::Weekly);

    // Visiting is overridden by the exception to 14:00-15:00.
    let visit = &data.routes[1];
    assert_eq!(visit.key, "visit");
    assert!(!visit.today.is_open);
    assert_eq!(visit.today.reason, Reason::BeforeOpen);
    assert_eq!(visit.today.source, ScheduleSource::Exception);
    let window = visit.today.window.as_ref().unwrap();
    assert_eq!(window.open, "14:00");
    assert_eq!(window.close, "15:00");
    assert_eq!(
        visit.today.next_open_at.as_deref(),
        Some("2026-03-23T14:00:00+09:00")
    );
}

#[tokio::test]
async fn test_seeded_visit_outside_exception_uses_weekly() {
    let repo = LocalRepository::new();
    seed_demo_data(&repo).await.unwrap();

    // Monday 2026-04-06 14:30 Tokyo is past the exception's end date; the
    // weekly visiting window 13:00-16:00 applies again.
    let now = tokyo_now_utc(2026, 4, 6, 14, 30);
    let data = hospital_availability(&repo, DEMO_HOSPITAL_CODE, now)
        .await
        .unwrap()
        .unwrap();

    let visit = &data.routes[1];
    assert!(visit.today.is_open);
    assert_eq!(visit.today.source, ScheduleSource::Weekly);
    let window = visit.today.window.as_ref().unwrap();
    assert_eq!(window.open, "13:00");
    assert_eq!(window.close, "16:00");
}

#[tokio::test]
async fn test_seeded_sunday_reservation_points_at_monday() {
    let repo = LocalRepository::new();
    seed_demo_data(&repo).await.unwrap();

    // Sunday 2026-04-05 10:00 Tokyo: reservation is closed (weekly Sunday row)
    // and the next opening is Monday 09:00.
    let now = tokyo_now_utc(2026, 4, 5, 10, 0);
    let data = hospital_availability(&repo, DEMO_HOSPITAL_CODE, now)
        .await
        .unwrap()
        .unwrap();

    let reservation = &data.routes[0];
    assert!(!reservation.today.is_open);
    assert_eq!(reservation.today.reason, Reason::Closed);
    assert_eq!(
        reservation.today.next_open_at.as_deref(),
        Some("2026-04-06T09:00:00+09:00")
    );
}
