//! Video Job Service Capability
//!
//! Trait definition for the job submission and status lookup seam.
//! Video generation is an asynchronous task-based operation:
//! 1. Submit a generation job
//! 2. Poll the task status until a terminal state
//! 3. Read the result video URL from the final status
//!
//! The upstream adapter ([`KieClient`](crate::providers::kie::KieClient))
//! and the relay-API consumer ([`RelayClient`](crate::client::RelayClient))
//! both implement this trait, so the server handlers and the poller are
//! written once against it.

use async_trait::async_trait;

use crate::error::RelayError;
use crate::types::{GenerationRequest, TaskHandle, TaskStatus};

/// Video job submission and status lookup capability
#[async_trait]
pub trait VideoJobService: Send + Sync {
    /// Submit a video generation job.
    ///
    /// Returns a [`TaskHandle`] carrying the upstream-assigned task id
    /// for status polling. One outbound call, no state retained.
    async fn submit_job(&self, request: &GenerationRequest) -> Result<TaskHandle, RelayError>;

    /// Query the current status of a submitted job.
    ///
    /// The returned [`TaskStatus`] is derived from the upstream record
    /// each call; the result URL is populated only once the job has
    /// succeeded and a result payload is available.
    async fn job_status(&self, task_id: &str) -> Result<TaskStatus, RelayError>;
}
