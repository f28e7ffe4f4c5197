//! `GET /api/status`

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::error::RelayError;

use super::{AppState, error_response};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StatusQuery {
    #[serde(default)]
    task_id: Option<String>,
}

/// Look up the upstream job record and return the normalized status.
pub(super) async fn status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Response {
    let Some(task_id) = query
        .task_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
    else {
        return error_response(&RelayError::invalid_input("taskId is required"));
    };

    match state.service.job_status(task_id).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(error) => error_response(&error),
    }
}
