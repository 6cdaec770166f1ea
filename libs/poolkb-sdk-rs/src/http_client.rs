//! HTTP client factory with consistent timeout configuration.
//!
//! Every transport builds its `reqwest::Client` here so connect and request
//! timeouts are applied uniformly. A stalled request is aborted once the
//! request timeout elapses and surfaces as `ApiError::Network`.

use reqwest::Client;

use crate::config::ClientConfig;

const USER_AGENT: &str = concat!("poolkb-sdk/", env!("CARGO_PKG_VERSION"));

/// Build an HTTP client with the configured timeouts.
pub fn try_build_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.timeout)
        .user_agent(USER_AGENT)
        .build()
}
