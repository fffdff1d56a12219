//! Reachability classification for one route at one instant.

use chrono::{DateTime, NaiveTime};
use chrono_tz::Tz;

use crate::models::{combine_local, DailySchedule, Reason};

/// Result of evaluating a resolved daily schedule against "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOutcome {
    pub is_open: bool,
    pub reason: Reason,
    /// The local open/close pair when a non-closed, valid window was resolved,
    /// reported even while not currently open. `None` otherwise.
    pub window: Option<(NaiveTime, NaiveTime)>,
}

/// Classify `now` against the schedule resolved for its calendar date.
///
/// The window is half-open `[start, end)`: the exact open instant counts as
/// open, the exact close instant as already closed. A closed flag, a missing
/// or inverted pair, or a window start that cannot be anchored in the zone
/// all classify as `closed`.
pub fn evaluate(schedule: &DailySchedule, now: DateTime<Tz>) -> StatusOutcome {
    let Some((open, close)) = schedule.valid_window() else {
        return StatusOutcome {
            is_open: false,
            reason: Reason::Closed,
            window: None,
        };
    };

    let today = now.date_naive();
    let tz = now.timezone();
    let (Some(start), Some(end)) = (
        combine_local(today, open, tz),
        combine_local(today, close, tz),
    ) else {
        // The local time falls in a DST gap; under-promise rather than guess.
        return StatusOutcome {
            is_open: false,
            reason: Reason::Closed,
            window: None,
        };
    };

    let (is_open, reason) = if start <= now && now < end {
        (true, Reason::Open)
    } else if now < start {
        (false, Reason::BeforeOpen)
    } else {
        (false, Reason::AfterClose)
    };

    StatusOutcome {
        is_open,
        reason,
        window: Some((open, close)),
    }
}
