//! Service layer: the business-hours resolution engine.
//!
//! Everything here is a pure, stateless function of (schedule data, current
//! instant), reading through the repository traits. Composition order:
//! facade -> daily resolver -> status evaluator -> (when closed) next-opening
//! search, which delegates back to the resolver per scanned day.

pub mod availability;

pub mod next_opening;

pub mod resolver;

pub mod status;

pub use availability::{hospital_availability, route_today};
pub use next_opening::{next_open_at, LOOKAHEAD_DAYS};
pub use resolver::resolve_for_date;
pub use status::{evaluate, StatusOutcome};
