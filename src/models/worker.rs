//! Worker directory records and rule regimes.
//!
//! This module defines the [`Worker`] record supplied by the worker directory,
//! the closed [`Regime`] enumeration, and the per-worker regime assignment.

use serde::{Deserialize, Serialize};

/// The labor-rule regime a worker's hours are classified under.
///
/// # Example
///
/// ```
/// use overtime_engine::models::Regime;
///
/// assert_eq!(Regime::TieredDailyWeekly.to_string(), "tiered_daily_weekly");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Daily overtime and double-time tiers plus a weekly regular-hours cap
    /// (California-style).
    TieredDailyWeekly,
    /// A single weekly overtime threshold, no daily tiers (Nevada/Michigan-style).
    FlatWeekly,
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Regime::TieredDailyWeekly => write!(f, "tiered_daily_weekly"),
            Regime::FlatWeekly => write!(f, "flat_weekly"),
        }
    }
}

/// A worker as known to the worker directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique identifier, matching [`TimeEntry::worker_id`](super::TimeEntry::worker_id).
    pub id: String,
    /// Name shown by downstream report formatters.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Free-form payroll classification code with the jurisdiction token as a
    /// prefix (e.g. `"CA-west-payroll"`).
    #[serde(default)]
    pub payroll_code: Option<String>,
}

/// The outcome of resolving a payroll code to a regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeResolution {
    /// The regime to apply.
    pub regime: Regime,
    /// True when the regime is the configured fallback rather than a match.
    pub inferred: bool,
    /// The jurisdiction token extracted from the code, if any.
    pub jurisdiction: Option<String>,
}

/// Maps one worker to exactly one regime for a computation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRegimeAssignment {
    /// The worker identifier.
    pub worker_id: String,
    /// The resolved regime.
    pub regime: Regime,
    /// True when the regime came from the fail-open default.
    pub regime_inferred: bool,
}

impl WorkerRegimeAssignment {
    /// Builds an assignment from a resolver outcome.
    pub fn new(worker_id: impl Into<String>, resolution: &RegimeResolution) -> Self {
        Self {
            worker_id: worker_id.into(),
            regime: resolution.regime,
            regime_inferred: resolution.inferred,
        }
    }
}
