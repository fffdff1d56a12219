//! Repository trait for abstracting database operations.
//!
//! This trait defines the interface for all storage operations, allowing
//! different implementations (in-memory, SQL, etc.) to be swapped via
//! dependency injection. The availability engine only ever reads; the small
//! write surface exists for provisioning and the administrative invariants
//! the read path assumes.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::{ExceptionId, HospitalId, RouteId};
use crate::models::{DayHours, Hospital, NewException, NewsItem, NewsPriority, Route, RouteException};

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Data validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<String> for RepositoryError {
    fn from(s: String) -> Self {
        RepositoryError::InternalError(s)
    }
}

impl From<&str> for RepositoryError {
    fn from(s: &str) -> Self {
        RepositoryError::InternalError(s.to_string())
    }
}

/// Repository trait for hospital-level lookups.
///
/// These are the collaborator queries the availability facade consumes: the
/// hospital header, its enabled routes in display order, and the published
/// news feed.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust and allow
/// sharing across threads.
#[async_trait]
pub trait HospitalRepository: Send + Sync {
    /// Look up an active hospital by its public code.
    ///
    /// # Returns
    /// * `Ok(Some(Hospital))` - The hospital, if the code exists and is active
    /// * `Ok(None)` - Unknown code, or the hospital is deactivated
    /// * `Err(RepositoryError)` - If the lookup fails
    async fn hospital_by_code(&self, code: &str) -> RepositoryResult<Option<Hospital>>;

    /// All enabled routes of a hospital, ordered by `(sort_order asc, id asc)`.
    async fn enabled_routes(&self, hospital_id: HospitalId) -> RepositoryResult<Vec<Route>>;

    /// Published news for a hospital, most recently updated first.
    ///
    /// # Arguments
    /// * `hospital_id` - The hospital to fetch news for
    /// * `limit` - Maximum number of entries to return
    async fn published_news(
        &self,
        hospital_id: HospitalId,
        limit: usize,
    ) -> RepositoryResult<Vec<NewsItem>>;
}

/// Repository trait for schedule lookups.
///
/// This is the read-only leaf the resolution engine is built on. It owns no
/// logic, only lookups; precedence between exceptions and weekly entries is
/// decided by the resolver.
///
/// # Error Handling
/// All methods return `RepositoryResult<T>`. Data absence is never an error:
/// a missing weekly entry, a missing exception day row, or unavailable
/// exception storage all surface as `Ok(None)` so the read path can degrade
/// instead of failing.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    // ==================== Health & Capability ====================

    /// Check if the storage backend is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if the backend is reachable
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Whether exception storage is provisioned for this deployment.
    ///
    /// Exception support is additive; the weekly schedule is the guaranteed
    /// baseline. When this returns false, [`Self::active_exception`] reports
    /// absent for every date rather than propagating a storage error.
    fn supports_exceptions(&self) -> bool;

    // ==================== Schedule Lookups ====================

    /// The weekly entry of a route for one day-of-week (0=Monday ... 6=Sunday).
    ///
    /// # Returns
    /// * `Ok(Some(DayHours))` - The recurring entry for that day
    /// * `Ok(None)` - No entry defined for that day
    async fn weekly_entry(&self, route_id: RouteId, dow: u8) -> RepositoryResult<Option<DayHours>>;

    /// The single exception whose inclusive date range contains `date`.
    ///
    /// When several exceptions of the route overlap on `date`, the one with
    /// the most recent creation time wins entirely (ties broken by highest
    /// id, so the result is deterministic).
    ///
    /// # Returns
    /// * `Ok(Some(RouteException))` - The winning exception
    /// * `Ok(None)` - No exception covers the date, or exception storage is
    ///   not provisioned
    async fn active_exception(
        &self,
        route_id: RouteId,
        date: NaiveDate,
    ) -> RepositoryResult<Option<RouteException>>;

    /// The hour row an exception defines for one day-of-week.
    ///
    /// # Returns
    /// * `Ok(Some(DayHours))` - The override row for that day
    /// * `Ok(None)` - The exception does not list that day (resolution falls
    ///   through to the weekly entry)
    async fn exception_hours(
        &self,
        exception_id: ExceptionId,
        dow: u8,
    ) -> RepositoryResult<Option<DayHours>>;
}

/// Repository trait for the administrative write surface.
///
/// The engine never writes; these operations back provisioning and the demo
/// seed, and they carry the two invariants the read path assumes: an atomic
/// sort-order swap and an all-or-nothing weekly upsert.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Create or update a hospital by code. Re-running is idempotent.
    async fn upsert_hospital(
        &self,
        code: &str,
        name: &str,
        timezone: &str,
    ) -> RepositoryResult<Hospital>;

    /// Create or update a route by `(hospital, key)`. Re-running is idempotent.
    async fn upsert_route(
        &self,
        hospital_id: HospitalId,
        key: &str,
        label: &str,
        phone: &str,
        sort_order: i32,
    ) -> RepositoryResult<Route>;

    /// Swap the sort order of two routes atomically (read-both, write-both).
    ///
    /// Concurrent swaps must never produce duplicate or missing ranks.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If either route does not exist
    async fn swap_sort_order(&self, route_a: RouteId, route_b: RouteId) -> RepositoryResult<()>;

    /// Replace a route's full weekly schedule in one all-or-nothing operation.
    ///
    /// `week` must contain exactly one row per day-of-week 0..=6; anything
    /// else is rejected with `ValidationError` and the stored week is left
    /// untouched. The resolver expects the weekly table to reflect a
    /// complete, consistent week rather than a partially-applied edit.
    async fn replace_weekly_hours(
        &self,
        route_id: RouteId,
        week: Vec<DayHours>,
    ) -> RepositoryResult<()>;

    /// Store an exception together with its day rows.
    ///
    /// # Returns
    /// The id assigned to the new exception.
    async fn add_exception(&self, exception: NewException) -> RepositoryResult<ExceptionId>;

    /// Create or update a published news entry by `(hospital, title)`.
    async fn publish_news(
        &self,
        hospital_id: HospitalId,
        title: &str,
        body: Option<&str>,
        priority: NewsPriority,
    ) -> RepositoryResult<()>;
}

/// Convenience supertrait for components that need the whole surface.
pub trait FullRepository: HospitalRepository + ScheduleRepository + AdminRepository {}

impl<T> FullRepository for T where T: HospitalRepository + ScheduleRepository + AdminRepository {}
