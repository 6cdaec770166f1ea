use thiserror::Error;

/// SDK errors.
///
/// Every failed call resolves to one of these. Application-level failures
/// display as the server's message alone.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with an envelope whose code is not 0
    #[error("{message}")]
    Api { code: i64, message: String },

    /// Connection, timeout or body read failure (only with `client` feature)
    #[cfg(feature = "client")]
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    /// Non-2xx response without a failure envelope
    #[error("HTTP status {status}")]
    Status { status: u16, body: String },

    /// Envelope or payload could not be parsed
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Envelope code for application-level failures.
    pub fn code(&self) -> Option<i64> {
        match self {
            ApiError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Errors writing the persisted settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
