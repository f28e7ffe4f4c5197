//! Kie.ai wire types

use serde::Deserialize;

/// Response envelope shared by all job endpoints.
///
/// `code` is a business code, independent of the HTTP status; `data`
/// is absent on errors.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct KieEnvelope<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    pub data: Option<T>,
}

impl<T> KieEnvelope<T> {
    /// Upstream message, with empty strings treated as absent.
    pub fn message(&self) -> Option<&str> {
        self.msg.as_deref().filter(|m| !m.is_empty())
    }
}

/// `createTask` response payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct KieCreatedTask {
    pub task_id: String,
}

/// `recordInfo` response payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct KieJobRecord {
    pub task_id: String,
    pub state: String,
    /// JSON-encoded result payload, present once the job finished
    #[serde(default)]
    pub result_json: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}
