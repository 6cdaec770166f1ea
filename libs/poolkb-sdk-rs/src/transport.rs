//! Base transport: sends a prepared `ApiRequest` and returns the raw response.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::request::ApiRequest;

/// Status and body of an HTTP response, before envelope handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Carries one request to the server.
///
/// Implementations must not retry and must report connection failures as
/// errors rather than as responses.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

#[cfg(feature = "client")]
pub use reqwest_transport::HttpTransport;

#[cfg(feature = "client")]
mod reqwest_transport {
    use async_trait::async_trait;
    use reqwest::{Client, Method};
    use secrecy::ExposeSecret;
    use tracing::debug;

    use super::{RawResponse, Transport};
    use crate::config::ClientConfig;
    use crate::error::ApiError;
    use crate::http_client::try_build_client;
    use crate::request::{ApiRequest, HttpMethod};

    /// `reqwest`-backed transport.
    #[derive(Clone)]
    pub struct HttpTransport {
        client: Client,
        base_url: String,
    }

    impl HttpTransport {
        pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
            let base_url = config.validate()?;
            let client = try_build_client(config)?;
            Ok(Self { client, base_url })
        }
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    #[async_trait]
    impl Transport for HttpTransport {
        async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
            let url = format!("{}{}", self.base_url, request.path);

            let mut builder = self.client.request(method(request.method), &url);

            let query = request.query_pairs();
            if !query.is_empty() {
                builder = builder.query(&query);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }
            if let Some(token) = &request.bearer_token {
                builder = builder.bearer_auth(token.expose_secret());
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;

            debug!(method = %request.method, url = %url, status, "response received");

            Ok(RawResponse { status, body })
        }
    }
}
