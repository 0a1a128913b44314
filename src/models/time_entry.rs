//! Time entry model.
//!
//! This module defines the [`TimeEntry`] struct, one completed clock-in/clock-out
//! interval as delivered by the time-clock subsystem.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::calculate_duration_hours;
use crate::error::EngineResult;

/// One completed work interval.
///
/// Entries are immutable value objects; the engine never mutates them. Open
/// entries (no clock-out yet) are not representable here and must be filtered
/// out by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Optional identifier from the time-clock system, used in warnings.
    #[serde(default)]
    pub id: Option<String>,
    /// The worker this interval belongs to.
    pub worker_id: String,
    /// Clock-in timestamp.
    pub start: DateTime<Utc>,
    /// Clock-out timestamp.
    pub end: DateTime<Utc>,
}

impl TimeEntry {
    /// Returns the entry duration in hours, rounded to 2 decimal places.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInterval`](crate::error::EngineError::InvalidInterval)
    /// when `end` is not strictly after `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use overtime_engine::models::TimeEntry;
    /// use chrono::{TimeZone, Utc};
    /// use rust_decimal::Decimal;
    ///
    /// let entry = TimeEntry {
    ///     id: Some("te_001".to_string()),
    ///     worker_id: "w_001".to_string(),
    ///     start: Utc.with_ymd_and_hms(2026, 1, 13, 9, 0, 0).unwrap(),
    ///     end: Utc.with_ymd_and_hms(2026, 1, 13, 17, 30, 0).unwrap(),
    /// };
    /// assert_eq!(entry.duration_hours().unwrap(), Decimal::new(850, 2));
    /// ```
    pub fn duration_hours(&self) -> EngineResult<Decimal> {
        calculate_duration_hours(&self.worker_id, self.start, self.end)
    }

    /// Returns the entry id, or `"<unknown>"` when the source did not supply one.
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or("<unknown>")
    }
}
