//! In-memory transport for exercising clients without a server.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::request::{ApiRequest, HttpMethod};
use crate::transport::{RawResponse, Transport};

/// What a recorded request looked like on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer_token: Option<String>,
}

/// Records every request and answers with queued responses
/// (`{"code":0,"data":null}` once the queue is empty).
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentRequest>>,
    responses: Mutex<VecDeque<RawResponse>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a 200 response carrying `envelope`.
    pub fn respond(&self, envelope: Value) {
        self.respond_raw(200, envelope.to_string());
    }

    pub fn respond_raw(&self, status: u16, body: impl Into<String>) {
        self.responses.lock().unwrap().push_back(RawResponse {
            status,
            body: body.into(),
        });
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> SentRequest {
        self.sent().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        self.sent.lock().unwrap().push(SentRequest {
            method: request.method,
            path: request.path.clone(),
            query: request.query_pairs(),
            body: request.body.clone(),
            bearer_token: request
                .bearer_token
                .as_ref()
                .map(|token| token.expose_secret().to_string()),
        });

        let next = self.responses.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| RawResponse {
            status: 200,
            body: json!({"code": 0, "data": null}).to_string(),
        }))
    }
}
