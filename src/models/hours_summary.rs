//! Output models for an hours computation run.
//!
//! This module contains the [`HoursSummary`] produced per worker, the
//! [`ComputationWarning`] records for isolated per-entry and per-worker
//! problems, and the [`HoursReport`] bundling both.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Regime;

/// Hour breakdown for one worker over the requested period.
///
/// `regular_hours + overtime_hours + doubletime_hours == total_hours` holds
/// for every summary the engine emits, and `doubletime_hours` is zero under
/// [`Regime::FlatWeekly`].
///
/// # Example
///
/// ```
/// use overtime_engine::models::{HoursSummary, Regime};
/// use rust_decimal::Decimal;
///
/// let summary = HoursSummary {
///     worker_id: "w_001".to_string(),
///     display_name: Some("Dana Reyes".to_string()),
///     regime: Regime::TieredDailyWeekly,
///     regime_inferred: false,
///     regular_hours: Decimal::new(4000, 2),
///     overtime_hours: Decimal::new(500, 2),
///     doubletime_hours: Decimal::ZERO,
///     total_hours: Decimal::new(4500, 2),
/// };
/// assert!(summary.is_balanced());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursSummary {
    /// The worker identifier.
    pub worker_id: String,
    /// Display name from the worker directory, if known.
    pub display_name: Option<String>,
    /// The regime the hours were classified under.
    pub regime: Regime,
    /// True when the regime is the fail-open default rather than a resolved match.
    pub regime_inferred: bool,
    /// Hours paid at the standard rate.
    pub regular_hours: Decimal,
    /// Hours past a daily or weekly overtime threshold.
    pub overtime_hours: Decimal,
    /// Hours past the daily double-time threshold.
    pub doubletime_hours: Decimal,
    /// Sum of all eligible entry durations.
    pub total_hours: Decimal,
}

/// Largest allowed gap between the bucket sum and the total.
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

impl HoursSummary {
    /// Returns true when the three buckets add up to the total within
    /// [`BALANCE_TOLERANCE`].
    pub fn is_balanced(&self) -> bool {
        let buckets = self.regular_hours + self.overtime_hours + self.doubletime_hours;
        (buckets - self.total_hours).abs() <= BALANCE_TOLERANCE
    }
}

/// Identifies the kind of a [`ComputationWarning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// An entry's end was not after its start; the entry was dropped.
    InvalidInterval,
    /// An entry had an empty worker id; the entry was dropped.
    MissingWorkerId,
    /// A worker's payroll code did not resolve; the default regime was used.
    UnresolvedJurisdiction,
    /// No eligible entries were supplied.
    EmptyInput,
}

/// A non-fatal problem recorded during a computation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationWarning {
    /// The kind of warning.
    pub code: WarningCode,
    /// The affected worker, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    /// The affected time entry, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
    /// Human-readable description.
    pub message: String,
}

/// The result of one computation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursReport {
    /// One summary per worker with nonzero hours, ordered by worker id.
    pub summaries: Vec<HoursSummary>,
    /// Warnings in deterministic order.
    pub warnings: Vec<ComputationWarning>,
}

impl HoursReport {
    /// Looks up the summary for a worker.
    pub fn summary_for(&self, worker_id: &str) -> Option<&HoursSummary> {
        self.summaries.iter().find(|s| s.worker_id == worker_id)
    }

    /// Returns true if any warning carries the given code.
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}
