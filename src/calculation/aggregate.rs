//! Aggregation and rounding of per-worker hour totals.
//!
//! The rule engines accumulate into [`HoursTotals`]; [`finalize_summary`]
//! rounds each bucket independently, checks that the buckets still add up to
//! the total, and drops workers with no hours.

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{HoursSummary, WorkerRegimeAssignment};

use super::duration::round_hours;

/// Running regular/overtime/double-time/total hours for one worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursTotals {
    /// Regular hours so far.
    pub regular: Decimal,
    /// Overtime hours so far.
    pub overtime: Decimal,
    /// Double-time hours so far.
    pub doubletime: Decimal,
    /// Total worked hours so far.
    pub total: Decimal,
}

impl Add for HoursTotals {
    type Output = HoursTotals;

    fn add(self, other: HoursTotals) -> HoursTotals {
        HoursTotals {
            regular: self.regular + other.regular,
            overtime: self.overtime + other.overtime,
            doubletime: self.doubletime + other.doubletime,
            total: self.total + other.total,
        }
    }
}

impl Sum for HoursTotals {
    fn sum<I: Iterator<Item = HoursTotals>>(iter: I) -> Self {
        iter.fold(HoursTotals::default(), Add::add)
    }
}

/// Rounds a worker's totals and builds the summary.
///
/// Returns `Ok(None)` when the rounded total is zero: such workers are not
/// payroll-relevant for the period and get no row.
///
/// # Errors
///
/// Returns [`EngineError::ComputationInvariantViolation`] if the rounded
/// buckets differ from the rounded total by more than
/// [`BALANCE_TOLERANCE`](crate::models::BALANCE_TOLERANCE). The summary is
/// not emitted in that case.
///
/// # Examples
///
/// ```
/// use overtime_engine::calculation::{finalize_summary, HoursTotals};
/// use overtime_engine::models::{Regime, WorkerRegimeAssignment};
/// use rust_decimal::Decimal;
///
/// let assignment = WorkerRegimeAssignment {
///     worker_id: "w_001".to_string(),
///     regime: Regime::FlatWeekly,
///     regime_inferred: false,
/// };
/// let totals = HoursTotals {
///     regular: Decimal::from(40),
///     overtime: Decimal::new(1, 2),
///     doubletime: Decimal::ZERO,
///     total: Decimal::new(4001, 2),
/// };
///
/// let summary = finalize_summary(&assignment, None, totals).unwrap().unwrap();
/// assert_eq!(summary.regular_hours.to_string(), "40.00");
/// assert_eq!(summary.overtime_hours.to_string(), "0.01");
/// ```
pub fn finalize_summary(
    assignment: &WorkerRegimeAssignment,
    display_name: Option<&str>,
    totals: HoursTotals,
) -> EngineResult<Option<HoursSummary>> {
    let total_hours = round_hours(totals.total);
    if total_hours.is_zero() {
        return Ok(None);
    }

    let summary = HoursSummary {
        worker_id: assignment.worker_id.clone(),
        display_name: display_name.map(str::to_string),
        regime: assignment.regime,
        regime_inferred: assignment.regime_inferred,
        regular_hours: round_hours(totals.regular),
        overtime_hours: round_hours(totals.overtime),
        doubletime_hours: round_hours(totals.doubletime),
        total_hours,
    };

    if !summary.is_balanced() {
        tracing::error!(
            worker_id = %summary.worker_id,
            regular = %summary.regular_hours,
            overtime = %summary.overtime_hours,
            doubletime = %summary.doubletime_hours,
            total = %summary.total_hours,
            "Hours buckets do not add up to total"
        );
        return Err(EngineError::ComputationInvariantViolation {
            worker_id: summary.worker_id,
            regular: summary.regular_hours,
            overtime: summary.overtime_hours,
            doubletime: summary.doubletime_hours,
            total: summary.total_hours,
        });
    }

    Ok(Some(summary))
}
