//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use super::dto::{HealthResponse, HospitalInfo, PatientHospitalData, RegisterResponse, SeedResponse};
use super::error::AppError;
use super::state::AppState;
use crate::db::repository::{HospitalRepository, ScheduleRepository};
use crate::db::seed;
use crate::models::resolve_timezone;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and storage is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        service: "duxcall-rust".to_string(),
        database: db_status,
        time: Utc::now().to_rfc3339(),
    }))
}

// =============================================================================
// Patient Endpoints
// =============================================================================

/// GET /patient/hospitals/{code}
///
/// Full patient payload: hospital header, published news and per-route
/// availability evaluated at the current instant in the hospital's zone.
pub async fn get_patient_hospital(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> HandlerResult<PatientHospitalData> {
    let data = services::hospital_availability(state.repository.as_ref(), &code, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound("Hospital not found".to_string()))?;

    Ok(Json(data))
}

/// POST /patient/hospitals/{code}/register
///
/// QR onboarding lookup: resolves a hospital code to its header so the client
/// can store it locally. No state is written.
pub async fn register_hospital(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> HandlerResult<RegisterResponse> {
    let hospital = state
        .repository
        .hospital_by_code(&code)
        .await?
        .ok_or_else(|| AppError::NotFound("Hospital not found".to_string()))?;

    let tz = resolve_timezone(&hospital.timezone);
    Ok(Json(RegisterResponse {
        hospital: HospitalInfo {
            code: hospital.code,
            name: hospital.name,
            timezone: tz.name().to_string(),
        },
    }))
}

// =============================================================================
// Development
// =============================================================================

/// POST /dev/seed
///
/// Provision the demo dataset. Idempotent: repeated calls converge to the
/// same state.
pub async fn dev_seed(State(state): State<AppState>) -> HandlerResult<SeedResponse> {
    let hospital_code = seed::seed_demo_data(state.repository.as_ref()).await?;

    Ok(Json(SeedResponse {
        seeded: true,
        hospital_code,
    }))
}
