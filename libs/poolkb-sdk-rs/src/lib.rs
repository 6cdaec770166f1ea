//! Rust SDK for the Pool knowledge base API.
//!
//! Every endpoint answers with an envelope `{code, message?, data}`. This SDK
//! sends requests through a pluggable `Transport`, unwraps the envelope and
//! hands callers the `data` payload, or an `ApiError` when `code != 0` or the
//! transport fails.
//!
//! # Features
//!
//! - **Admin API** - posts, API keys, models and session management (`AdminApi`)
//! - **Web API** - public posts, semantic search and chat, with the user's
//!   language injected into every request (`WebApi`)
//! - **Locale sources** - fixed, shared in-process, or persisted in a settings file
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use poolkb_sdk::{ClientConfig, FileLocaleStore, WebApi};
//!
//! let config = ClientConfig::new("https://kb.example.com");
//! let web = WebApi::new(&config, Arc::new(FileLocaleStore::new("settings.json")))?;
//!
//! // POST /api/web/search {"query": "vector search", "top_k": 3, "language": "zh-CN"}
//! let results = web.search_posts("vector search", 3).await?;
//! println!("{} matches", results.results_count);
//! ```

mod admin;
mod client;
mod config;
mod envelope;
mod error;
#[cfg(feature = "client")]
mod http_client;
mod locale;
mod request;
mod transport;
mod web;

#[cfg(test)]
mod test_utils;

pub use admin::AdminApi;
pub use client::{ApiClient, ChatOptions};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
pub use envelope::unwrap_envelope;
pub use error::{ApiError, SettingsError};
pub use locale::{
    FileLocaleStore, FixedLocale, LocaleSource, SharedLocale, effective_language, inject_language,
};
pub use request::{ApiRequest, HttpMethod};
#[cfg(feature = "client")]
pub use transport::HttpTransport;
pub use transport::{RawResponse, Transport};
pub use web::WebApi;

// Re-export shared types for convenience
pub use poolkb_types::{
    AdminUser, ApiKey, ApiKeyCreate, ApiKeyList, ApiKeyType, ApiKeyUpdate, ChatResponse,
    DEFAULT_AGENT, DEFAULT_TOP_K, Envelope, Language, LoginResponse, Post, PostCreate, PostList,
    PostListQuery, PostUpdate, SearchResponse, SearchResult, SearchStatus,
};
