//! `POST /api/generate`

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::types::GenerationRequest;

use super::{AppState, error_response};

/// Fixed message returned alongside a freshly created task id
pub const SUBMIT_MESSAGE: &str = "Video generation started";

/// Validate the request and create an upstream job.
pub(super) async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Response {
    if let Err(error) = request.validate() {
        return error_response(&error);
    }

    match state.service.submit_job(&request).await {
        Ok(handle) => (
            StatusCode::OK,
            Json(json!({
                "taskId": handle.task_id,
                "message": SUBMIT_MESSAGE,
            })),
        )
            .into_response(),
        Err(error) => error_response(&error),
    }
}
