//! HTTP API module for the hours engine.
//!
//! This module hosts the engine behind a single `POST /hours` endpoint that
//! accepts a batch of time entries and the worker directory.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EngineInput, HoursRequest, TimeEntryRequest, WorkerRequest};
pub use response::{ApiError, ApiErrorResponse, HoursResponse};
pub use state::AppState;
