//! Kie.ai Client Implementation

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::service::VideoJobService;
use crate::types::{GenerationMode, GenerationRequest, TaskHandle, TaskState, TaskStatus};

use super::extract::extract_video_url;
use super::types::{KieCreatedTask, KieEnvelope, KieJobRecord};

/// Model identifier for the text-to-video preset
pub const TEXT_TO_VIDEO_MODEL: &str = "wan/2-5-text-to-video";

/// Model identifier for the image-to-video preset
pub const IMAGE_TO_VIDEO_MODEL: &str = "wan/2-6-image-to-video";

const CREATE_TASK_FALLBACK: &str = "Failed to create task";
const GET_STATUS_FALLBACK: &str = "Failed to get status";

/// Bounded retry for transient transport failures.
///
/// Applies only to connect and timeout errors; upstream business errors
/// and non-success HTTP statuses are never retried. Each submit or poll
/// stays a single logical exchange.
#[derive(Debug, Clone)]
pub struct RetryOptions {
    /// Total attempts per request, including the first
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub delay: Duration,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(500),
        }
    }
}

/// Client for the Kie.ai jobs API
#[derive(Debug, Clone)]
pub struct KieClient {
    config: RelayConfig,
    http_client: reqwest::Client,
    retry_options: Option<RetryOptions>,
}

impl KieClient {
    /// Create a new client.
    pub fn new(config: RelayConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
            retry_options: None,
        }
    }

    /// Enable bounded retry on transient transport failures.
    pub fn with_retry(mut self, retry_options: RetryOptions) -> Self {
        self.retry_options = Some(retry_options);
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    fn create_task_url(&self) -> String {
        format!(
            "{}/api/v1/jobs/createTask",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn record_info_url(&self) -> String {
        format!(
            "{}/api/v1/jobs/recordInfo",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn should_retry(&self, attempt: u32, error: &reqwest::Error) -> bool {
        match &self.retry_options {
            Some(retry) => {
                attempt < retry.max_attempts && (error.is_connect() || error.is_timeout())
            }
            None => false,
        }
    }

    async fn send_with_retry<F>(&self, build: F) -> Result<reqwest::Response, RelayError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match build().send().await {
                Ok(response) => return Ok(response),
                Err(error) if self.should_retry(attempt, &error) => {
                    let delay = self
                        .retry_options
                        .as_ref()
                        .map(|r| r.delay)
                        .unwrap_or_default();
                    tracing::debug!(attempt, %error, "transient upstream failure, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(error) => return Err(error.into()),
            }
        }
    }

    /// Decode a `{code, msg, data}` envelope, turning non-success codes
    /// into `UpstreamError` with the upstream message or `fallback`.
    async fn decode_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<T, RelayError> {
        let envelope: KieEnvelope<T> = response
            .json()
            .await
            .map_err(|e| RelayError::ParseError(format!("invalid upstream response: {e}")))?;

        if envelope.code != 200 {
            let message = envelope
                .message()
                .unwrap_or(fallback)
                .to_string();
            tracing::error!(code = envelope.code, %message, "upstream job API error");
            return Err(RelayError::UpstreamError {
                code: envelope.code,
                message,
            });
        }

        envelope.data.ok_or_else(|| {
            RelayError::ParseError("upstream response is missing data".to_string())
        })
    }

    /// Build the `createTask` payload for a request.
    ///
    /// Two fixed presets: the text preset never carries an image field,
    /// the image preset carries exactly the caller's URL.
    fn job_payload(request: &GenerationRequest) -> Result<Value, RelayError> {
        match request.mode {
            GenerationMode::Text => Ok(json!({
                "model": TEXT_TO_VIDEO_MODEL,
                "input": {
                    "prompt": request.prompt,
                    "duration": "5",
                    "aspect_ratio": "16:9",
                    "resolution": "720p",
                }
            })),
            GenerationMode::Image => {
                let image_url = request
                    .image_url
                    .as_deref()
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .ok_or_else(|| RelayError::invalid_input("Image URL is required"))?;
                Ok(json!({
                    "model": IMAGE_TO_VIDEO_MODEL,
                    "input": {
                        "prompt": request.prompt,
                        "image_urls": [image_url],
                        "duration": "5",
                        "resolution": "720p",
                    }
                }))
            }
        }
    }
}

#[async_trait]
impl VideoJobService for KieClient {
    async fn submit_job(&self, request: &GenerationRequest) -> Result<TaskHandle, RelayError> {
        request.validate()?;
        let payload = Self::job_payload(request)?;
        let url = self.create_task_url();

        let response = self
            .send_with_retry(|| {
                self.http_client
                    .post(&url)
                    .header("Authorization", self.config.auth_header())
                    .header("Content-Type", "application/json")
                    .json(&payload)
            })
            .await?;

        let created: KieCreatedTask =
            Self::decode_envelope(response, CREATE_TASK_FALLBACK).await?;
        tracing::debug!(task_id = %created.task_id, "created upstream job");

        Ok(TaskHandle {
            task_id: created.task_id,
        })
    }

    async fn job_status(&self, task_id: &str) -> Result<TaskStatus, RelayError> {
        let url = self.record_info_url();

        let response = self
            .send_with_retry(|| {
                self.http_client
                    .get(&url)
                    .query(&[("taskId", task_id)])
                    .header("Authorization", self.config.auth_header())
                    .header("Content-Type", "application/json")
            })
            .await?;

        let record: KieJobRecord = Self::decode_envelope(response, GET_STATUS_FALLBACK).await?;

        let state = TaskState::from_upstream(&record.state);
        let video_url = if state == TaskState::Success {
            record.result_json.as_deref().and_then(extract_video_url)
        } else {
            None
        };

        Ok(TaskStatus {
            task_id: record.task_id,
            state,
            video_url,
            model: record.model.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_payload_never_contains_an_image_field() {
        let payload =
            KieClient::job_payload(&GenerationRequest::text("a cat")).expect("payload");
        assert_eq!(payload["model"], TEXT_TO_VIDEO_MODEL);
        assert_eq!(payload["input"]["prompt"], "a cat");
        assert_eq!(payload["input"]["aspect_ratio"], "16:9");
        assert!(payload["input"].get("image_urls").is_none());
    }

    #[test]
    fn image_payload_carries_exactly_one_image_url() {
        let request = GenerationRequest::image("a cat", "https://example.com/cat.png");
        let payload = KieClient::job_payload(&request).expect("payload");
        assert_eq!(payload["model"], IMAGE_TO_VIDEO_MODEL);
        let urls = payload["input"]["image_urls"]
            .as_array()
            .expect("image_urls array");
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0], "https://example.com/cat.png");
        assert!(payload["input"].get("aspect_ratio").is_none());
    }

    #[test]
    fn image_payload_requires_an_image_url() {
        let mut request = GenerationRequest::image("a cat", "x");
        request.image_url = None;
        assert!(KieClient::job_payload(&request).is_err());
    }

    #[test]
    fn urls_tolerate_trailing_slash_in_base() {
        let config = RelayConfig::new("k").with_base_url("https://api.kie.ai/");
        let client = KieClient::new(config, reqwest::Client::new());
        assert_eq!(
            client.create_task_url(),
            "https://api.kie.ai/api/v1/jobs/createTask"
        );
        assert_eq!(
            client.record_info_url(),
            "https://api.kie.ai/api/v1/jobs/recordInfo"
        );
    }
}
