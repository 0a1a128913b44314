//! Duration calculation for time entries.
//!
//! Converts a start/end timestamp pair into fractional hours rounded to
//! 2 decimal places, so later sums over many entries stay exact.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Number of decimal places every hour figure is rounded to.
pub const HOURS_DECIMAL_PLACES: u32 = 2;

const SECONDS_PER_HOUR: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);

/// Rounds an hour quantity to [`HOURS_DECIMAL_PLACES`], midpoint away from zero,
/// and fixes the scale so it always renders with two decimals.
///
/// # Examples
///
/// ```
/// use overtime_engine::calculation::round_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_hours(Decimal::new(8005, 3)).to_string(), "8.01");
/// assert_eq!(round_hours(Decimal::from(8)).to_string(), "8.00");
/// ```
pub fn round_hours(hours: Decimal) -> Decimal {
    let mut rounded =
        hours.round_dp_with_strategy(HOURS_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(HOURS_DECIMAL_PLACES);
    rounded
}

/// Calculates the duration of an interval in hours.
///
/// The interval is measured in whole seconds and rounded with [`round_hours`].
///
/// # Errors
///
/// Returns [`EngineError::InvalidInterval`] if `end` is not strictly after
/// `start`; a zero or negative duration is never produced.
///
/// # Examples
///
/// ```
/// use overtime_engine::calculation::calculate_duration_hours;
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let start = Utc.with_ymd_and_hms(2026, 1, 13, 9, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2026, 1, 13, 21, 30, 0).unwrap();
/// assert_eq!(calculate_duration_hours("w_001", start, end).unwrap(), Decimal::new(1250, 2));
/// assert!(calculate_duration_hours("w_001", end, start).is_err());
/// ```
pub fn calculate_duration_hours(
    worker_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> EngineResult<Decimal> {
    if end <= start {
        return Err(EngineError::InvalidInterval {
            worker_id: worker_id.to_string(),
            start,
            end,
        });
    }

    let seconds = Decimal::from((end - start).num_seconds());
    Ok(round_hours(seconds / SECONDS_PER_HOUR))
}
