//! Kie.ai jobs API adapter
//!
//! The upstream API exposes `POST /api/v1/jobs/createTask` for job
//! creation and `GET /api/v1/jobs/recordInfo?taskId=...` for record
//! lookup, both behind a bearer credential. Responses use a
//! `{code, msg, data}` envelope where `code == 200` means success.

mod client;
mod extract;
mod types;

pub use client::{IMAGE_TO_VIDEO_MODEL, KieClient, RetryOptions, TEXT_TO_VIDEO_MODEL};
