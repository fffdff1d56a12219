//! Database module for hospital schedule data.
//!
//! This module provides abstractions for storage access via the Repository
//! pattern, allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! The database module follows a layered architecture:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API)                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services/) - Resolution Engine          │
//! │  - Daily schedule resolution                            │
//! │  - Status evaluation & next-opening search              │
//! │  - Per-hospital availability assembly                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository.rs) - Abstract Interface │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! # Repository Pattern
//! The module includes:
//! - `repository`: Trait definitions for storage operations
//! - `repositories::local`: In-memory implementation for unit testing and
//!   local deployments
//! - `seed`: Demo dataset provisioning through the write surface
//!
//! The engine reads through [`ScheduleRepository`] and [`HospitalRepository`];
//! the administrative surface writes through [`AdminRepository`]. Exception
//! storage is an additive capability: implementations advertise it via
//! `supports_exceptions()` and report absence instead of failing when it is
//! not provisioned.

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod repositories;
pub mod repository;
pub mod seed;

pub use repositories::LocalRepository;
pub use repository::{
    AdminRepository, FullRepository, HospitalRepository, RepositoryError, RepositoryResult,
    ScheduleRepository,
};
pub use seed::{seed_demo_data, DEMO_HOSPITAL_CODE};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

#[cfg(feature = "local-repo")]
fn create_selected_repository() -> Arc<dyn FullRepository> {
    Arc::new(LocalRepository::new())
}

/// Initialize the global repository singleton for the selected backend.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let _ = REPOSITORY.set(create_selected_repository());
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_repository();
    }

    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
