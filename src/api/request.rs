//! Request types for the hours API.
//!
//! This module defines the JSON request structures for the `/hours` endpoint.
//! The request plays the part of the time-entry source and the worker
//! directory; open entries (no clock-out) are filtered out here before the
//! engine sees them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{TimeEntry, Worker};

/// Request body for the `/hours` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursRequest {
    /// Time-clock records for the requested period.
    pub entries: Vec<TimeEntryRequest>,
    /// Worker directory records.
    #[serde(default)]
    pub workers: Vec<WorkerRequest>,
}

/// A time-clock record in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntryRequest {
    /// Identifier from the time-clock system.
    #[serde(default)]
    pub id: Option<String>,
    /// The worker the record belongs to.
    pub worker_id: String,
    /// Clock-in timestamp.
    pub start: DateTime<Utc>,
    /// Clock-out timestamp; `null` while the shift is still open.
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl TimeEntryRequest {
    /// Converts a completed record into a [`TimeEntry`]; open records yield `None`.
    pub fn into_completed(self) -> Option<TimeEntry> {
        let end = self.end?;
        Some(TimeEntry {
            id: self.id,
            worker_id: self.worker_id,
            start: self.start,
            end,
        })
    }
}

/// A worker directory record in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRequest {
    /// Unique identifier for the worker.
    pub id: String,
    /// Name for display in exports.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Payroll classification code carrying the jurisdiction prefix.
    #[serde(default)]
    pub payroll_code: Option<String>,
}

impl From<WorkerRequest> for Worker {
    fn from(req: WorkerRequest) -> Self {
        Worker {
            id: req.id,
            display_name: req.display_name,
            payroll_code: req.payroll_code,
        }
    }
}

/// Engine inputs extracted from a request.
#[derive(Debug, Clone)]
pub struct EngineInput {
    /// Completed entries.
    pub entries: Vec<TimeEntry>,
    /// Worker directory.
    pub workers: Vec<Worker>,
    /// Number of open entries that were skipped.
    pub open_entries: usize,
}

impl From<HoursRequest> for EngineInput {
    fn from(req: HoursRequest) -> Self {
        let total = req.entries.len();
        let entries: Vec<TimeEntry> = req
            .entries
            .into_iter()
            .filter_map(TimeEntryRequest::into_completed)
            .collect();

        EngineInput {
            open_entries: total - entries.len(),
            entries,
            workers: req.workers.into_iter().map(Into::into).collect(),
        }
    }
}
