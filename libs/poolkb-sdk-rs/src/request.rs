//! Outgoing request description, independent of the HTTP library.

use secrecy::SecretString;
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Percent-encode `id` as exactly one path segment.
///
/// `/`, `?`, `#` and `%` are escaped, so the id can neither climb to another
/// route nor add query parameters. Empty, `.` and `..` stay dot segments
/// under any encoding and are rejected.
pub fn path_segment(id: &str) -> Result<String, ApiError> {
    if matches!(id, "" | "." | "..") {
        return Err(ApiError::Config(format!("invalid id {:?}", id)));
    }

    let mut url = Url::parse("http://localhost/")
        .map_err(|e| ApiError::Config(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::Config("URL cannot hold path segments".into()))?
        .clear()
        .push(id);

    Ok(url.path().trim_start_matches('/').to_string())
}

/// Method, path, query and body of one API call.
///
/// Built by the endpoint functions, adjusted once by the request stage
/// (locale injection, bearer token) and then handed to a `Transport`.
#[derive(Debug)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Map<String, Value>,
    pub body: Option<Value>,
    pub bearer_token: Option<SecretString>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Map::new(),
            body: None,
            bearer_token: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Merge the fields of a serializable value into the query parameters.
    ///
    /// `null` fields are skipped; anything other than a JSON object is rejected.
    pub fn query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self, ApiError> {
        match serde_json::to_value(params)? {
            Value::Object(map) => {
                for (key, value) in map {
                    if !value.is_null() {
                        self.query.insert(key, value);
                    }
                }
                Ok(self)
            }
            Value::Null => Ok(self),
            other => Err(ApiError::Config(format!(
                "query parameters must serialize to an object, got {}",
                other
            ))),
        }
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Query parameters as string pairs, sorted by key.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .query
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), rendered)
            })
            .collect();
        pairs.sort();
        pairs
    }
}
