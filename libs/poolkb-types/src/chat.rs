use serde::{Deserialize, Serialize};

/// Agent answering chat requests when none is named.
pub const DEFAULT_AGENT: &str = "knowledge";

/// Chat payload. Optional fields are only sent when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub agent_name: String,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub agent_name: String,
    pub message: String,
    pub response: String,
    pub status: String,
}
