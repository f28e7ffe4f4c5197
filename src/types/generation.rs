//! Generation Request and Task Types
//!
//! Type definitions for submitting a video generation job and reading
//! back its status. A `TaskHandle` is created by exactly one submit call
//! and consumed by status polls until a terminal state is observed or
//! the caller's attempt budget runs out.

use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// Generation mode selected by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Text-to-video
    Text,
    /// Image-to-video (requires an image URL)
    Image,
}

/// A video generation request.
///
/// Wire format: `{"mode": "text"|"image", "prompt": "...", "imageUrl": "..."}`,
/// with `imageUrl` required only for image mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Generation mode
    pub mode: GenerationMode,

    /// Text description of the desired video
    pub prompt: String,

    /// Source image URL for image-to-video generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl GenerationRequest {
    /// Create a text-to-video request.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            mode: GenerationMode::Text,
            prompt: prompt.into(),
            image_url: None,
        }
    }

    /// Create an image-to-video request.
    pub fn image(prompt: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            mode: GenerationMode::Image,
            prompt: prompt.into(),
            image_url: Some(image_url.into()),
        }
    }

    /// Validate the request.
    ///
    /// The prompt must be non-empty, and image mode requires a non-empty
    /// image URL. The same checks run on the server and in the polling
    /// client before a submit call is made.
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.prompt.trim().is_empty() {
            return Err(RelayError::invalid_input("Prompt is required"));
        }

        if self.mode == GenerationMode::Image
            && self
                .image_url
                .as_deref()
                .map(str::trim)
                .is_none_or(str::is_empty)
        {
            return Err(RelayError::invalid_input("Image URL is required"));
        }

        Ok(())
    }
}

/// Handle to a submitted job, identified by the upstream-assigned task id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskHandle {
    /// Opaque task identifier assigned by the upstream API
    pub task_id: String,
}

/// Normalized job state.
///
/// Upstream in-flight states (`waiting`, `queuing`, `generating`, ...)
/// fold into `Pending`; values this crate does not recognize
/// deserialize as `Unknown`. Both are non-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Job accepted, result not ready yet
    Pending,
    /// Job finished, result available
    Success,
    /// Job failed upstream
    Fail,
    /// Unrecognized upstream state
    #[serde(other)]
    Unknown,
}

impl TaskState {
    /// Normalize a raw upstream state string.
    pub fn from_upstream(state: &str) -> Self {
        match state {
            "success" => Self::Success,
            "fail" => Self::Fail,
            "pending" | "waiting" | "queuing" | "generating" => Self::Pending,
            _ => Self::Unknown,
        }
    }

    /// Whether this state ends a polling session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Fail)
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Success => write!(f, "success"),
            Self::Fail => write!(f, "fail"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Status of a job at one point in time.
///
/// Derived from the upstream record on every poll, never cached.
/// `videoUrl` serializes as `null` until a result URL is available.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    /// Task identifier
    pub task_id: String,

    /// Normalized job state
    pub state: TaskState,

    /// Result video URL, present only after a successful job
    #[serde(default)]
    pub video_url: Option<String>,

    /// Model the job runs on
    pub model: String,
}

impl TaskStatus {
    /// Check if the job succeeded.
    pub fn is_success(&self) -> bool {
        self.state == TaskState::Success
    }

    /// Check if the job failed.
    pub fn is_failed(&self) -> bool {
        self.state == TaskState::Fail
    }

    /// Check if the job is still in progress.
    pub fn is_in_progress(&self) -> bool {
        !self.state.is_terminal()
    }
}
