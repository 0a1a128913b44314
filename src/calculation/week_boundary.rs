//! Division of a worker's entries into weekly accumulation windows.
//!
//! Under [`WeekBoundary::Period`] every entry lands in one window. Under
//! [`WeekBoundary::CalendarWeek`] an entry belongs to the calendar week that
//! contains its start timestamp (UTC date), even when it runs past midnight
//! into the next week.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::WeekBoundary;

/// A validated entry reduced to what the rule engines need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedInterval {
    /// Source entry id, if any.
    pub entry_id: Option<String>,
    /// Clock-in timestamp, used for ordering and week bucketing.
    pub start: DateTime<Utc>,
    /// Duration in hours, already rounded.
    pub hours: Decimal,
}

/// Returns the first day of the window containing `start`, or `None` when the
/// whole period is a single window.
///
/// # Examples
///
/// ```
/// use overtime_engine::calculation::week_start;
/// use overtime_engine::config::WeekBoundary;
/// use chrono::{NaiveDate, TimeZone, Utc, Weekday};
///
/// // Thursday 2026-01-15
/// let start = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
/// let boundary = WeekBoundary::CalendarWeek { week_starts_on: Weekday::Mon };
///
/// assert_eq!(week_start(start, boundary), NaiveDate::from_ymd_opt(2026, 1, 12));
/// assert_eq!(week_start(start, WeekBoundary::Period), None);
/// ```
pub fn week_start(start: DateTime<Utc>, boundary: WeekBoundary) -> Option<NaiveDate> {
    match boundary {
        WeekBoundary::Period => None,
        WeekBoundary::CalendarWeek { week_starts_on } => {
            let date = start.date_naive();
            let offset = (7 + date.weekday().num_days_from_monday()
                - week_starts_on.num_days_from_monday())
                % 7;
            Some(date - Duration::days(i64::from(offset)))
        }
    }
}

/// Splits chronologically sorted intervals into consecutive weekly windows.
///
/// Windows with no entries are simply absent. An empty input yields no windows.
pub fn split_into_weeks(
    intervals: &[WorkedInterval],
    boundary: WeekBoundary,
) -> Vec<&[WorkedInterval]> {
    intervals
        .chunk_by(|a, b| week_start(a.start, boundary) == week_start(b.start, boundary))
        .collect()
}
