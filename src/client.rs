//! Relay API Client
//!
//! The browser side of the original system expressed as a library
//! client: [`RelayClient`] talks to a running relay server's
//! `/api/generate` and `/api/status` endpoints and implements the same
//! [`VideoJobService`] seam as the upstream adapter, so the poller can
//! run against either.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::RelayError;
use crate::service::VideoJobService;
use crate::types::{GenerationRequest, TaskHandle, TaskStatus};

/// Client for the relay HTTP API
#[derive(Debug, Clone)]
pub struct RelayClient {
    base_url: String,
    http_client: reqwest::Client,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl RelayClient {
    /// Create a client for a relay at `base_url` (e.g. `http://127.0.0.1:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    /// Create a client with a caller-supplied `reqwest` client.
    pub fn with_http_client(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http_client,
        }
    }

    /// Decode a relay response, mapping `{"error": ...}` bodies back
    /// into relay errors so messages surface verbatim.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RelayError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| RelayError::ParseError(format!("invalid relay response: {e}")));
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("Relay returned status {status}"));

        if status == reqwest::StatusCode::BAD_REQUEST {
            Err(RelayError::InvalidInput(message))
        } else {
            Err(RelayError::UpstreamError {
                code: i64::from(status.as_u16()),
                message,
            })
        }
    }
}

#[async_trait]
impl VideoJobService for RelayClient {
    async fn submit_job(&self, request: &GenerationRequest) -> Result<TaskHandle, RelayError> {
        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn job_status(&self, task_id: &str) -> Result<TaskStatus, RelayError> {
        let response = self
            .http_client
            .get(format!("{}/api/status", self.base_url))
            .query(&[("taskId", task_id)])
            .send()
            .await?;
        Self::decode(response).await
    }
}
