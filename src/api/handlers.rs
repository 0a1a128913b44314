//! HTTP request handlers for the hours API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_hours_concurrent;

use super::request::{EngineInput, HoursRequest};
use super::response::{ApiError, ApiErrorResponse, HoursResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/hours", post(hours_handler))
        .with_state(state)
}

/// Handler for POST /hours endpoint.
///
/// Accepts a batch of time entries plus the worker directory and returns the
/// per-worker hours breakdown.
async fn hours_handler(
    State(state): State<AppState>,
    payload: Result<Json<HoursRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing hours request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: rejection_to_error(correlation_id, rejection),
            }
            .into_response();
        }
    };

    let input: EngineInput = request.into();
    if input.open_entries > 0 {
        info!(
            correlation_id = %correlation_id,
            open_entries = input.open_entries,
            "Skipping entries without a clock-out"
        );
    }

    let start_time = Instant::now();
    match compute_hours_concurrent(&input.entries, &input.workers, state.shared_config()).await {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                entries_count = input.entries.len(),
                workers_count = report.summaries.len(),
                warnings_count = report.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Hours computation completed"
            );
            let response = HoursResponse::new(correlation_id, report, input.open_entries);
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Hours computation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn rejection_to_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}
