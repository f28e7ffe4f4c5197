//! Relay HTTP API
//!
//! Two endpoints over an injected [`VideoJobService`]:
//! `POST /api/generate` submits a job, `GET /api/status` reads it back.
//! Both are thin pass-throughs; the only state is the shared service.

mod generate;
mod status;

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::json;

use crate::error::RelayError;
use crate::service::VideoJobService;

pub use generate::SUBMIT_MESSAGE;

/// Shared state injected into the handlers at construction time
#[derive(Clone)]
pub struct AppState {
    /// Upstream job service
    pub service: Arc<dyn VideoJobService>,
}

/// Build the relay router over the given job service.
pub fn build_router(service: Arc<dyn VideoJobService>) -> Router {
    Router::new()
        .route("/api/generate", post(generate::generate))
        .route("/api/status", get(status::status))
        .with_state(AppState { service })
}

/// Map a relay error onto an `{"error": ...}` response.
///
/// Validation errors come back as 400 with the message; everything else
/// is a 500 whose body carries only the user-visible message, with the
/// full error logged server-side.
pub(crate) fn error_response(error: &RelayError) -> Response {
    let status = match error.status_code() {
        400 => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(%error, "request handling failed");
    }
    (status, Json(json!({ "error": error.user_message() }))).into_response()
}
