//! Error types for the hours engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing hours.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the hours engine.
///
/// Only configuration errors, [`EngineError::ComputationInvariantViolation`] and
/// [`EngineError::CalculationError`] escape a computation run. Per-entry and
/// per-worker problems are converted into warnings on the report.
///
/// # Example
///
/// ```
/// use overtime_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rules.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rules.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the problem.
        message: String,
    },

    /// A time entry whose end is not strictly after its start.
    #[error("Invalid interval for worker '{worker_id}': end {end} is not after start {start}")]
    InvalidInterval {
        /// The worker the entry belongs to.
        worker_id: String,
        /// The entry start.
        start: DateTime<Utc>,
        /// The entry end.
        end: DateTime<Utc>,
    },

    /// A time entry without a worker identifier.
    #[error("Time entry '{entry_id}' has no worker id")]
    MissingWorkerId {
        /// The entry identifier, or `"<unknown>"` when the entry has none.
        entry_id: String,
    },

    /// A worker's payroll code did not match any configured jurisdiction.
    #[error("Unresolved jurisdiction for worker '{worker_id}': {code:?}")]
    UnresolvedJurisdiction {
        /// The worker whose code failed to resolve.
        worker_id: String,
        /// The raw payroll code, if one was supplied.
        code: Option<String>,
    },

    /// Rounded hour buckets do not add up to the rounded total.
    #[error(
        "Hours invariant violated for worker '{worker_id}': {regular} + {overtime} + {doubletime} != {total}"
    )]
    ComputationInvariantViolation {
        /// The worker whose summary failed the check.
        worker_id: String,
        /// Rounded regular hours.
        regular: Decimal,
        /// Rounded overtime hours.
        overtime: Decimal,
        /// Rounded double-time hours.
        doubletime: Decimal,
        /// Rounded total hours.
        total: Decimal,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
