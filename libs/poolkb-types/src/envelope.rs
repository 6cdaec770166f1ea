use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope code the server uses for success.
pub const SUCCESS_CODE: i64 = 0;

/// Code reported for a response object that has no integer `code`.
pub const MISSING_CODE: i64 = -1;

/// Message reported when a failed envelope carries none.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// Uniform wrapper around every API response.
///
/// `code == 0` means success regardless of the HTTP status; any other value
/// is a failure described by `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub code: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Payload. Absent `data` deserializes as `null`.
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Message to surface for a failed envelope. Empty messages count as absent.
    pub fn failure_message(&self) -> &str {
        match self.message.as_deref() {
            Some(message) if !message.is_empty() => message,
            _ => DEFAULT_FAILURE_MESSAGE,
        }
    }
}
