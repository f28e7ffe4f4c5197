//! Task Polling State Machine
//!
//! Drives a submitted job to completion against any
//! [`VideoJobService`]: submit once, then query the status at a fixed
//! interval until a terminal state is observed or the attempt budget
//! runs out.
//!
//! Phases: `Idle → Submitting → Polling → done`, with the final result
//! reported as a [`PollOutcome`]. Each cycle issues exactly one status
//! call and then waits out the interval; the loop is sequential, never
//! concurrent. A [`CancelHandle`] aborts the session promptly, even
//! mid-sleep, so no timers leak.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::service::VideoJobService;
use crate::types::{GenerationRequest, TaskState};
use crate::utils::cancel::CancelHandle;

/// Fixed user-facing message for a job that failed upstream
pub const GENERATION_FAILED_MESSAGE: &str = "Video generation failed. Please try again.";

/// Fixed user-facing message for a polling session that ran out of attempts
pub const TIMEOUT_MESSAGE: &str = "Generation timeout. Please try again.";

/// Fixed user-facing message for a status call that could not complete
pub const STATUS_CHECK_FAILED_MESSAGE: &str = "Failed to check status";

/// Polling cadence and budget.
///
/// Defaults reproduce the shipped behavior: one status call every five
/// seconds, sixty attempts, roughly a five minute wall-clock budget.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Delay between consecutive status calls
    pub interval: Duration,
    /// Maximum number of non-terminal status calls before timing out
    pub max_attempts: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 60,
        }
    }
}

/// Observable phase of a polling session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollPhase {
    /// No session started yet
    Idle,
    /// Submit call in flight
    Submitting,
    /// Waiting on the job, with a coarse progress estimate
    Polling {
        /// Non-terminal status calls made so far
        attempt: u32,
        /// Cosmetic progress percentage; see [`progress_percent`]
        percent: u8,
    },
}

/// Terminal result of a polling session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The job succeeded. The URL can still be absent if the result
    /// payload did not carry one.
    Succeeded {
        /// Resolved video URL
        video_url: Option<String>,
    },
    /// The submit call or the job itself failed
    Failed {
        /// User-facing failure message
        message: String,
    },
    /// The attempt budget was exhausted without a terminal state
    TimedOut,
    /// The session was cancelled through its handle
    Cancelled,
}

impl PollOutcome {
    /// User-facing message for this outcome, if any.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Succeeded { .. } => None,
            Self::Failed { message } => Some(message),
            Self::TimedOut => Some(TIMEOUT_MESSAGE),
            Self::Cancelled => None,
        }
    }
}

/// Coarse progress estimate from the attempt count.
///
/// Purely cosmetic feedback for the user; the upstream API reports no
/// real progress signal.
pub fn progress_percent(attempts: u32) -> u8 {
    std::cmp::min(attempts.saturating_mul(2), 95) as u8
}

/// Handle to a spawned polling session
pub struct PollHandle {
    cancel: CancelHandle,
    progress: watch::Receiver<PollPhase>,
    task: JoinHandle<PollOutcome>,
}

impl PollHandle {
    /// Request cancellation of the session.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Clone of the cancel handle, shareable across tasks.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Watch receiver for phase and progress updates.
    pub fn progress(&self) -> watch::Receiver<PollPhase> {
        self.progress.clone()
    }

    /// Wait for the session to finish.
    pub async fn join(self) -> PollOutcome {
        self.task.await.unwrap_or(PollOutcome::Cancelled)
    }
}

/// Polls a video job to completion over a [`VideoJobService`]
#[derive(Clone)]
pub struct TaskPoller {
    service: Arc<dyn VideoJobService>,
    config: PollerConfig,
}

impl TaskPoller {
    /// Create a poller with the default cadence.
    pub fn new(service: Arc<dyn VideoJobService>) -> Self {
        Self {
            service,
            config: PollerConfig::default(),
        }
    }

    /// Override the polling cadence and budget.
    pub fn with_config(mut self, config: PollerConfig) -> Self {
        self.config = config;
        self
    }

    /// Run a session to completion on the current task.
    pub async fn run(&self, request: &GenerationRequest) -> PollOutcome {
        let cancel = CancelHandle::new();
        let (progress_tx, _progress_rx) = watch::channel(PollPhase::Idle);
        self.drive(request, &cancel, &progress_tx).await
    }

    /// Spawn a session on a background task, returning its handle.
    pub fn spawn(&self, request: GenerationRequest) -> PollHandle {
        let cancel = CancelHandle::new();
        let (progress_tx, progress_rx) = watch::channel(PollPhase::Idle);

        let poller = self.clone();
        let task_cancel = cancel.clone();
        let task = tokio::spawn(async move {
            poller.drive(&request, &task_cancel, &progress_tx).await
        });

        PollHandle {
            cancel,
            progress: progress_rx,
            task,
        }
    }

    async fn drive(
        &self,
        request: &GenerationRequest,
        cancel: &CancelHandle,
        progress: &watch::Sender<PollPhase>,
    ) -> PollOutcome {
        // Client-side mirror of the server's validation: invalid input
        // fails the session without a network call.
        if let Err(error) = request.validate() {
            return PollOutcome::Failed {
                message: error.user_message(),
            };
        }

        let _ = progress.send(PollPhase::Submitting);
        let handle = tokio::select! {
            _ = cancel.cancelled() => return PollOutcome::Cancelled,
            result = self.service.submit_job(request) => match result {
                Ok(handle) => handle,
                // Submit errors surface verbatim.
                Err(error) => {
                    return PollOutcome::Failed {
                        message: error.user_message(),
                    };
                }
            },
        };
        tracing::debug!(task_id = %handle.task_id, "job submitted, polling");

        let mut attempts = 0u32;
        loop {
            let status = tokio::select! {
                _ = cancel.cancelled() => return PollOutcome::Cancelled,
                result = self.service.job_status(&handle.task_id) => result,
            };

            match status {
                Ok(status) if status.state == TaskState::Success => {
                    tracing::debug!(task_id = %handle.task_id, "job succeeded");
                    return PollOutcome::Succeeded {
                        video_url: status.video_url,
                    };
                }
                Ok(status) if status.state == TaskState::Fail => {
                    tracing::debug!(task_id = %handle.task_id, "job failed upstream");
                    return PollOutcome::Failed {
                        message: GENERATION_FAILED_MESSAGE.to_string(),
                    };
                }
                // Pending, unknown, and anything else non-terminal keep polling.
                Ok(_) => {
                    attempts += 1;
                    if attempts >= self.config.max_attempts {
                        tracing::debug!(task_id = %handle.task_id, attempts, "attempt budget exhausted");
                        return PollOutcome::TimedOut;
                    }
                    let _ = progress.send(PollPhase::Polling {
                        attempt: attempts,
                        percent: progress_percent(attempts),
                    });
                    tokio::select! {
                        _ = cancel.cancelled() => return PollOutcome::Cancelled,
                        _ = tokio::time::sleep(self.config.interval) => {}
                    }
                }
                Err(error) => {
                    tracing::error!(task_id = %handle.task_id, %error, "status check failed");
                    return PollOutcome::Failed {
                        message: STATUS_CHECK_FAILED_MESSAGE.to_string(),
                    };
                }
            }
        }
    }
}
