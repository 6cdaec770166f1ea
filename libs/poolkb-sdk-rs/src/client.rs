//! Core API client: request stage, transport, response stage.

use std::sync::{Arc, RwLock};

use poolkb_types::{ChatRequest, ChatResponse, DEFAULT_AGENT, Language};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::envelope::unwrap_envelope;
use crate::error::ApiError;
use crate::locale::{LocaleSource, effective_language, inject_language};
use crate::request::ApiRequest;
use crate::transport::Transport;

#[cfg(feature = "client")]
use crate::{config::ClientConfig, transport::HttpTransport};

/// Options for a chat call. Empty strings count as unset.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// Agent to talk to (default: "knowledge")
    pub agent_name: Option<String>,

    /// Post the question is about
    pub post_id: Option<String>,

    /// Language the answer should be in
    pub language: Option<Language>,
}

/// API client composing the request stage, a base transport and the
/// envelope-unwrapping response stage.
///
/// Without a locale source the client sends requests exactly as built; with
/// one, every request gets the effective language injected.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    locale: Option<Arc<dyn LocaleSource>>,
    token: RwLock<Option<SecretString>>,
}

impl ApiClient {
    /// Create a client talking HTTP to `config.base_url`.
    #[cfg(feature = "client")]
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            locale: None,
            token: RwLock::new(None),
        }
    }

    /// Enable locale injection, reading the preference from `source`.
    pub fn with_locale(mut self, source: Arc<dyn LocaleSource>) -> Self {
        self.locale = Some(source);
        self
    }

    pub fn injects_locale(&self) -> bool {
        self.locale.is_some()
    }

    /// Attach `Authorization: Bearer <token>` to subsequent requests.
    pub fn set_token(&self, token: SecretString) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token);
    }

    pub fn clear_token(&self) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Request stage: inject the language (if enabled) and the bearer token.
    pub fn prepare(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(source) = &self.locale {
            inject_language(&mut request, effective_language(source.as_ref()));
        }

        let guard = self.token.read().unwrap_or_else(|e| e.into_inner());
        if let Some(token) = guard.as_ref() {
            request.bearer_token = Some(SecretString::new(token.expose_secret().into()));
        }

        request
    }

    /// Send a request and return the unwrapped envelope `data`.
    pub async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let request = self.prepare(request);
        debug!(method = %request.method, path = %request.path, "dispatching request");

        let response = self.transport.send(request).await?;
        unwrap_envelope(response)
    }

    /// Like `execute`, decoding `data` into `T`.
    pub async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let data = self.execute(request).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Ask a server-side agent a question.
    ///
    /// Sends `{agent_name, message}` plus `post_id` and `language` when set.
    #[instrument(skip(self, message))]
    pub async fn chat_with_agent(
        &self,
        message: &str,
        options: &ChatOptions,
    ) -> Result<ChatResponse, ApiError> {
        let body = ChatRequest {
            agent_name: non_empty(options.agent_name.as_deref())
                .unwrap_or(DEFAULT_AGENT)
                .to_string(),
            message: message.to_string(),
            post_id: non_empty(options.post_id.as_deref()).map(str::to_string),
            language: options.language.map(|l| l.as_str().to_string()),
        };

        self.call(ApiRequest::post("/api/chat").json(&body)?).await
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
