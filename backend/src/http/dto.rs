//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! The patient payload types are re-exported from the api module since they
//! already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    HospitalInfo, NewsEntry, PatientHospitalData, RouteAvailability, TimeWindow, TodayStatus,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service identifier
    pub service: String,
    /// Storage backend status
    pub database: String,
    /// Server time, RFC 3339
    pub time: String,
}

/// Response for the QR onboarding lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub hospital: HospitalInfo,
}

/// Response for demo seeding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedResponse {
    pub seeded: bool,
    pub hospital_code: String,
}
