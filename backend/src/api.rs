//! Public API surface for the Rust backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

use serde::{Deserialize, Serialize};

use crate::models::{NewsPriority, Reason, ScheduleSource};

/// Hospital identifier (database primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct HospitalId(pub i64);

/// Route identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RouteId(pub i64);

/// Schedule exception identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExceptionId(pub i64);

impl HospitalId {
    pub fn new(value: i64) -> Self {
        HospitalId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl RouteId {
    pub fn new(value: i64) -> Self {
        RouteId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ExceptionId {
    pub fn new(value: i64) -> Self {
        ExceptionId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for HospitalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for ExceptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Full patient-facing payload for one hospital.
///
/// This is the response body of `GET /patient/hospitals/{code}`: the hospital
/// header, the published news feed and the availability of every enabled route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientHospitalData {
    pub hospital: HospitalInfo,
    pub news: Vec<NewsEntry>,
    pub routes: Vec<RouteAvailability>,
}

/// Hospital header echoed to the client.
///
/// `timezone` is the IANA zone the availability engine actually used, so the
/// client can render local times consistently even when the stored zone name
/// was invalid and the fallback applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalInfo {
    pub code: String,
    pub name: String,
    pub timezone: String,
}

/// Published announcement entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsEntry {
    pub title: String,
    pub body: Option<String>,
    pub priority: NewsPriority,
    /// RFC 3339 instant in the hospital's zone, or null if unknown.
    pub updated_at: Option<String>,
}

/// One phone route with its current reachability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteAvailability {
    pub key: String,
    pub label: String,
    pub phone: String,
    pub today: TodayStatus,
}

/// Reachability of one route at the evaluated instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayStatus {
    pub is_open: bool,
    pub reason: Reason,
    pub source: ScheduleSource,
    /// Today's window when a non-closed, valid open/close pair was resolved,
    /// even while not currently open. Null means no known schedule today.
    pub window: Option<TimeWindow>,
    /// RFC 3339 instant of the next opening. Always null while open; may be
    /// null while closed when nothing was found within the lookahead bound.
    pub next_open_at: Option<String>,
}

impl TodayStatus {
    /// The degraded result substituted for a route whose schedule could not be
    /// evaluated. Under-promises reachability rather than failing the batch.
    pub fn unavailable() -> Self {
        TodayStatus {
            is_open: false,
            reason: Reason::Closed,
            source: ScheduleSource::None,
            window: None,
            next_open_at: None,
        }
    }
}

/// Local open/close pair, formatted `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub open: String,
    pub close: String,
}
