//! Calculation logic for the hours engine.
//!
//! This module contains the duration calculator, the jurisdiction resolver,
//! the tiered daily/weekly and flat weekly rule engines, weekly window
//! bucketing, the aggregator/rounder, and the batch orchestration that ties
//! them together.

mod aggregate;
mod duration;
mod flat_weekly;
mod hours;
mod jurisdiction;
mod tiered;
mod week_boundary;

pub use aggregate::{HoursTotals, finalize_summary};
pub use duration::{HOURS_DECIMAL_PLACES, calculate_duration_hours, round_hours};
pub use flat_weekly::calculate_flat_weekly;
pub use hours::{apply_regime, compute_hours, compute_hours_concurrent, compute_worker_summary};
pub use jurisdiction::{extract_jurisdiction_token, resolve_regime};
pub use tiered::{DailySplit, TieredOutcome, TieredState, calculate_tiered};
pub use week_boundary::{WorkedInterval, split_into_weeks, week_start};
