//! # Duxcall Rust Backend
//!
//! Business-hours resolution engine for patient phone contact routes.
//!
//! This crate decides, for every phone contact route of a hospital, whether the
//! route is reachable right now, why not if it isn't, and when it next will be.
//! Staff-facing CRUD, QR onboarding and the client UI live elsewhere; this
//! backend owns the read path and exposes it as a REST API via Axum.
//!
//! ## Features
//!
//! - **Daily Resolution**: exception-over-weekly schedule resolution per route and date
//! - **Status Evaluation**: half-open `[open, close)` reachability classification
//! - **Next-Opening Search**: bounded forward scan for the next reachable instant
//! - **Time Handling**: IANA time-zone resolution with a documented fallback zone
//! - **News Feed**: published hospital announcements in the patient payload
//! - **HTTP API**: RESTful endpoints for the patient-facing client
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`db`]: Repository pattern and the in-memory storage backend
//! - [`models`]: Domain rows, schedule enums and time-zone helpers
//! - [`services`]: The resolution engine (resolver, evaluator, search, facade)
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;

pub mod db;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
