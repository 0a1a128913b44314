//! Core data models for the hours engine.
//!
//! This module contains all the domain models used throughout the engine.

mod hours_summary;
mod time_entry;
mod worker;

pub use hours_summary::{
    BALANCE_TOLERANCE, ComputationWarning, HoursReport, HoursSummary, WarningCode,
};
pub use time_entry::TimeEntry;
pub use worker::{Regime, RegimeResolution, Worker, WorkerRegimeAssignment};
