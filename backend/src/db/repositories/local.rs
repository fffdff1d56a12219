//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local deployments. All data is stored in
//! memory using HashMap and Vec structures, providing fast, deterministic,
//! and isolated execution.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::{ExceptionId, HospitalId, RouteId};
use crate::db::repository::*;
use crate::models::{
    DayHours, Hospital, NewException, NewsItem, NewsPriority, Route, RouteException,
};

/// In-memory local repository.
///
/// Data lives behind a single `RwLock`, so every write operation is naturally
/// atomic from the point of view of concurrent readers: a sort-order swap or a
/// weekly-week replacement is observed either entirely or not at all.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    hospitals: HashMap<HospitalId, Hospital>,
    routes: HashMap<RouteId, Route>,
    weekly: HashMap<(RouteId, u8), DayHours>,
    exceptions: HashMap<ExceptionId, RouteException>,
    exception_hours: HashMap<(ExceptionId, u8), DayHours>,
    news: Vec<NewsItem>,

    // ID counters
    next_hospital_id: i64,
    next_route_id: i64,
    next_exception_id: i64,

    // Connection health and deployment capability
    is_healthy: bool,
    exceptions_available: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            hospitals: HashMap::new(),
            routes: HashMap::new(),
            weekly: HashMap::new(),
            exceptions: HashMap::new(),
            exception_hours: HashMap::new(),
            news: Vec::new(),
            next_hospital_id: 1,
            next_route_id: 1,
            next_exception_id: 1,
            is_healthy: true,
            exceptions_available: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Toggle exception storage availability.
    ///
    /// Emulates a deployment where the exception tables were never
    /// provisioned: lookups report absent, the weekly baseline still works.
    pub fn set_exceptions_available(&self, available: bool) {
        self.data.write().exceptions_available = available;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        let is_healthy = data.is_healthy;
        let exceptions_available = data.exceptions_available;
        *data = LocalData {
            is_healthy,
            exceptions_available,
            ..Default::default()
        };
    }

    /// Enable or disable a route, like the staff toggle would.
    pub fn set_route_enabled(&self, route_id: RouteId, enabled: bool) {
        if let Some(route) = self.data.write().routes.get_mut(&route_id) {
            route.is_enabled = enabled;
        }
    }

    /// Activate or deactivate a hospital.
    pub fn set_hospital_active(&self, hospital_id: HospitalId, active: bool) {
        if let Some(hospital) = self.data.write().hospitals.get_mut(&hospital_id) {
            hospital.is_active = active;
        }
    }

    /// Number of hospitals stored.
    pub fn hospital_count(&self) -> usize {
        self.data.read().hospitals.len()
    }

    /// Number of routes stored.
    pub fn route_count(&self) -> usize {
        self.data.read().routes.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::ConnectionError(
                "Storage backend is not healthy".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HospitalRepository for LocalRepository {
    async fn hospital_by_code(&self, code: &str) -> RepositoryResult<Option<Hospital>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data
            .hospitals
            .values()
            .find(|h| h.is_active && h.code == code)
            .cloned())
    }

    async fn enabled_routes(&self, hospital_id: HospitalId) -> RepositoryResult<Vec<Route>> {
        self.check_health()?;
        let data = self.data.read();
        let mut routes: Vec<Route> = data
            .routes
            .values()
            .filter(|r| r.hospital_id == hospital_id && r.is_enabled)
            .cloned()
            .collect();
        routes.sort_by_key(|r| (r.sort_order, r.id));
        Ok(routes)
    }

    async fn published_news(
        &self,
        hospital_id: HospitalId,
        limit: usize,
    ) -> RepositoryResult<Vec<NewsItem>> {
        self.check_health()?;
        let data = self.data.read();
        let mut items: Vec<NewsItem> = data
            .news
            .iter()
            .filter(|n| n.hospital_id == hospital_id && n.is_published)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        items.truncate(limit);
        Ok(items)
    }
}

#[async_trait]
impl ScheduleRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    fn supports_exceptions(&self) -> bool {
        self.data.read().exceptions_available
    }

    async fn weekly_entry(&self, route_id: RouteId, dow: u8) -> RepositoryResult<Option<DayHours>> {
        self.check_health()?;
        Ok(self.data.read().weekly.get(&(route_id, dow)).copied())
    }

    async fn active_exception(
        &self,
        route_id: RouteId,
        date: NaiveDate,
    ) -> RepositoryResult<Option<RouteException>> {
        self.check_health()?;
        let data = self.data.read();
        if !data.exceptions_available {
            return Ok(None);
        }
        Ok(data
            .exceptions
            .values()
            .filter(|ex| ex.route_id == route_id && ex.covers(date))
            .max_by_key(|ex| (ex.created_at, ex.id))
            .cloned())
    }

    async fn exception_hours(
        &self,
        exception_id: ExceptionId,
        dow: u8,
    ) -> RepositoryResult<Option<DayHours>> {
        self.check_health()?;
        let data = self.data.read();
        if !data.exceptions_available {
            return Ok(None);
        }
        Ok(data.exception_hours.get(&(exception_id, dow)).copied())
    }
}

#[async_trait]
impl AdminRepository for LocalRepository {
    async fn upsert_hospital(
        &self,
        code: &str,
        name: &str,
        timezone: &str,
    ) -> RepositoryResult<Hospital> {
        self.check_health()?;
        let mut data = self.data.write();

        if let Some(existing) = data.hospitals.values_mut().find(|h| h.code == code) {
            existing.name = name.to_string();
            existing.timezone = timezone.to_string();
            existing.is_active = true;
            return Ok(existing.clone());
        }

        let id = HospitalId::new(data.next_hospital_id);
        data.next_hospital_id += 1;
        let hospital = Hospital {
            id,
            code: code.to_string(),
            name: name.to_string(),
            timezone: timezone.to_string(),
            is_active: true,
        };
        data.hospitals.insert(id, hospital.clone());
        Ok(hospital)
    }

    async fn upsert_route(
        &self,
        hospital_id: HospitalId,
        key: &str,
        label: &str,
        phone: &str,
        sort_order: i32,
    ) -> RepositoryResult<Route> {
        self.check_health()?;
        let mut data = self.data.write();

        if let Some(existing) = data
            .routes
            .values_mut()
            .find(|r| r.hospital_id == hospital_id && r.key == key)
        {
            existing.label = label.to_string();
            existing.phone = phone.to_string();
            existing.sort_order = sort_order;
            existing.is_enabled = true;
            return Ok(existing.clone());
        }

        let id = RouteId::new(data.next_route_id);
        data.next_route_id += 1;
        let route = Route {
            id,
            hospital_id,
            key: key.to_string(),
            label: label.to_string(),
            phone: phone.to_string(),
            is_enabled: true,
            sort_order,
        };
        data.routes.insert(id, route.clone());
        Ok(route)
    }

    async fn swap_sort_order(&self, route_a: RouteId, route_b: RouteId) -> RepositoryResult<()> {
        self.check_health()?;
        // Single write lock covers the read-both/write-both sequence, so no
        // interleaved edit can observe or produce a half-applied swap.
        let mut data = self.data.write();

        let order_a = data
            .routes
            .get(&route_a)
            .map(|r| r.sort_order)
            .ok_or_else(|| RepositoryError::NotFound(format!("Route {} not found", route_a)))?;
        let order_b = data
            .routes
            .get(&route_b)
            .map(|r| r.sort_order)
            .ok_or_else(|| RepositoryError::NotFound(format!("Route {} not found", route_b)))?;

        if let Some(a) = data.routes.get_mut(&route_a) {
            a.sort_order = order_b;
        }
        if let Some(b) = data.routes.get_mut(&route_b) {
            b.sort_order = order_a;
        }
        Ok(())
    }

    async fn replace_weekly_hours(
        &self,
        route_id: RouteId,
        week: Vec<DayHours>,
    ) -> RepositoryResult<()> {
        self.check_health()?;

        // Validate before touching storage: exactly one row per day-of-week.
        let mut seen = [false; 7];
        for row in &week {
            let dow = row.dow as usize;
            if dow >= 7 {
                return Err(RepositoryError::ValidationError(format!(
                    "Invalid day-of-week {} (expected 0..=6)",
                    row.dow
                )));
            }
            if seen[dow] {
                return Err(RepositoryError::ValidationError(format!(
                    "Duplicate day-of-week {} in weekly schedule",
                    row.dow
                )));
            }
            seen[dow] = true;
        }
        if week.len() != 7 {
            return Err(RepositoryError::ValidationError(format!(
                "Weekly schedule must cover all 7 days, got {}",
                week.len()
            )));
        }

        let mut data = self.data.write();
        for dow in 0u8..7 {
            data.weekly.remove(&(route_id, dow));
        }
        for row in week {
            data.weekly.insert((route_id, row.dow), row);
        }
        Ok(())
    }

    async fn add_exception(&self, exception: NewException) -> RepositoryResult<ExceptionId> {
        self.check_health()?;
        let mut data = self.data.write();

        let id = ExceptionId::new(data.next_exception_id);
        data.next_exception_id += 1;

        data.exceptions.insert(
            id,
            RouteException {
                id,
                route_id: exception.route_id,
                start_date: exception.start_date,
                end_date: exception.end_date,
                title: exception.title,
                created_at: exception.created_at,
            },
        );
        for row in exception.hours {
            data.exception_hours.insert((id, row.dow), row);
        }
        Ok(id)
    }

    async fn publish_news(
        &self,
        hospital_id: HospitalId,
        title: &str,
        body: Option<&str>,
        priority: NewsPriority,
    ) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write();
        let now = Utc::now();

        if let Some(existing) = data
            .news
            .iter_mut()
            .find(|n| n.hospital_id == hospital_id && n.title == title)
        {
            existing.body = body.map(str::to_string);
            existing.priority = priority;
            existing.is_published = true;
            existing.updated_at = now;
            return Ok(());
        }

        data.news.push(NewsItem {
            hospital_id,
            title: title.to_string(),
            body: body.map(str::to_string),
            priority,
            is_published: true,
            updated_at: now,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn full_week_closed() -> Vec<DayHours> {
        (0u8..7).map(DayHours::closed).collect()
    }

    async fn route_fixture(repo: &LocalRepository) -> RouteId {
        let hospital = repo
            .upsert_hospital("test-clinic", "Test Clinic", "Asia/Tokyo")
            .await
            .unwrap();
        repo.upsert_route(hospital.id, "reservation", "Reservation", "0312345678", 10)
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_hospital_by_code_ignores_inactive() {
        let repo = LocalRepository::new();
        repo.upsert_hospital("a", "A", "Asia/Tokyo").await.unwrap();

        assert!(repo.hospital_by_code("a").await.unwrap().is_some());
        assert!(repo.hospital_by_code("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_enabled_routes_ordered_by_sort_order_then_id() {
        let repo = LocalRepository::new();
        let hospital = repo.upsert_hospital("a", "A", "Asia/Tokyo").await.unwrap();
        repo.upsert_route(hospital.id, "visit", "Visit", "1", 20)
            .await
            .unwrap();
        repo.upsert_route(hospital.id, "reservation", "Reservation", "2", 10)
            .await
            .unwrap();
        repo.upsert_route(hospital.id, "billing", "Billing", "3", 10)
            .await
            .unwrap();

        let keys: Vec<String> = repo
            .enabled_routes(hospital.id)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.key)
            .collect();
        // Equal sort_order falls back to insertion (id) order.
        assert_eq!(keys, vec!["reservation", "billing", "visit"]);
    }

    #[tokio::test]
    async fn test_active_exception_most_recent_created_at_wins() {
        let repo = LocalRepository::new();
        let route_id = route_fixture(&repo).await;

        let older = NewException {
            route_id,
            start_date: date(2026, 3, 1),
            end_date: date(2026, 3, 31),
            title: Some("older".to_string()),
            created_at: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
            hours: vec![],
        };
        let newer = NewException {
            route_id,
            start_date: date(2026, 3, 10),
            end_date: date(2026, 3, 20),
            title: Some("newer".to_string()),
            created_at: Utc.with_ymd_and_hms(2026, 2, 15, 0, 0, 0).unwrap(),
            hours: vec![],
        };
        repo.add_exception(older).await.unwrap();
        repo.add_exception(newer).await.unwrap();

        let winner = repo
            .active_exception(route_id, date(2026, 3, 15))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(winner.title.as_deref(), Some("newer"));

        // Outside the newer range the older exception still applies.
        let fallback = repo
            .active_exception(route_id, date(2026, 3, 25))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fallback.title.as_deref(), Some("older"));
    }

    #[tokio::test]
    async fn test_active_exception_same_instant_highest_id_wins() {
        let repo = LocalRepository::new();
        let route_id = route_fixture(&repo).await;
        let created_at = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();

        for title in ["first", "second"] {
            repo.add_exception(NewException {
                route_id,
                start_date: date(2026, 3, 1),
                end_date: date(2026, 3, 31),
                title: Some(title.to_string()),
                created_at,
                hours: vec![],
            })
            .await
            .unwrap();
        }

        let winner = repo
            .active_exception(route_id, date(2026, 3, 15))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(winner.title.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_exception_storage_unavailable_reports_absent() {
        let repo = LocalRepository::new();
        let route_id = route_fixture(&repo).await;
        repo.add_exception(NewException {
            route_id,
            start_date: date(2026, 3, 1),
            end_date: date(2026, 3, 31),
            title: None,
            created_at: Utc::now(),
            hours: vec![DayHours::closed(0)],
        })
        .await
        .unwrap();

        repo.set_exceptions_available(false);
        assert!(!repo.supports_exceptions());
        assert!(repo
            .active_exception(route_id, date(2026, 3, 15))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_swap_sort_order_exchanges_ranks() {
        let repo = LocalRepository::new();
        let hospital = repo.upsert_hospital("a", "A", "Asia/Tokyo").await.unwrap();
        let first = repo
            .upsert_route(hospital.id, "reservation", "Reservation", "1", 10)
            .await
            .unwrap();
        let second = repo
            .upsert_route(hospital.id, "visit", "Visit", "2", 20)
            .await
            .unwrap();

        repo.swap_sort_order(first.id, second.id).await.unwrap();

        let keys: Vec<String> = repo
            .enabled_routes(hospital.id)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.key)
            .collect();
        assert_eq!(keys, vec!["visit", "reservation"]);

        let err = repo
            .swap_sort_order(first.id, RouteId::new(999))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_replace_weekly_hours_is_all_or_nothing() {
        let repo = LocalRepository::new();
        let route_id = route_fixture(&repo).await;

        let mut week = full_week_closed();
        week[0] = DayHours::open(0, hm(9, 0), hm(17, 0));
        repo.replace_weekly_hours(route_id, week).await.unwrap();

        // A short week is rejected and the stored week stays intact.
        let err = repo
            .replace_weekly_hours(route_id, vec![DayHours::closed(0)])
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError(_)));
        let monday = repo.weekly_entry(route_id, 0).await.unwrap().unwrap();
        assert!(!monday.is_closed);

        // Duplicate days are rejected as well.
        let mut duplicated = full_week_closed();
        duplicated[6] = DayHours::closed(0);
        let err = repo
            .replace_weekly_hours(route_id, duplicated)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_published_news_ordered_and_limited() {
        let repo = LocalRepository::new();
        let hospital = repo.upsert_hospital("a", "A", "Asia/Tokyo").await.unwrap();
        for i in 0..12 {
            repo.publish_news(hospital.id, &format!("news {}", i), None, NewsPriority::Normal)
                .await
                .unwrap();
        }

        let items = repo.published_news(hospital.id, 10).await.unwrap();
        assert_eq!(items.len(), 10);
        for pair in items.windows(2) {
            assert!(pair[0].updated_at >= pair[1].updated_at);
        }
    }

    #[tokio::test]
    async fn test_unhealthy_backend_errors_on_lookups() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);

        assert!(!repo.health_check().await.unwrap());
        let err = repo.hospital_by_code("a").await.unwrap_err();
        assert!(matches!(err, RepositoryError::ConnectionError(_)));
    }
}
