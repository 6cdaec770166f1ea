//! Public knowledge-base site endpoints.
//!
//! Every request carries the user's language so the server can localize
//! content and search.

use std::sync::Arc;

use poolkb_types::{ChatResponse, Post, PostList, PostListQuery, SearchRequest, SearchResponse};
use tracing::instrument;

use crate::client::{ApiClient, ChatOptions};
use crate::error::ApiError;
use crate::locale::LocaleSource;
use crate::request::{ApiRequest, path_segment};

#[cfg(feature = "client")]
use crate::config::ClientConfig;

/// Client for `/api/web/*` and the chat agent.
pub struct WebApi {
    client: ApiClient,
}

impl WebApi {
    #[cfg(feature = "client")]
    pub fn new(config: &ClientConfig, locale: Arc<dyn LocaleSource>) -> Result<Self, ApiError> {
        Ok(Self::from_client(ApiClient::new(config)?, locale))
    }

    pub fn from_client(client: ApiClient, locale: Arc<dyn LocaleSource>) -> Self {
        Self {
            client: client.with_locale(locale),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    #[instrument(skip(self))]
    pub async fn get_posts(&self, query: Option<&PostListQuery>) -> Result<PostList, ApiError> {
        self.client
            .call(ApiRequest::get("/api/web/posts").query(&query)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        self.client
            .call(ApiRequest::get(format!("/api/web/posts/{}", path_segment(id)?)))
            .await
    }

    /// Semantic search over the knowledge base.
    #[instrument(skip(self))]
    pub async fn search_posts(&self, query: &str, top_k: u32) -> Result<SearchResponse, ApiError> {
        let body = SearchRequest {
            top_k,
            ..SearchRequest::new(query)
        };
        self.client
            .call(ApiRequest::post("/api/web/search").json(&body)?)
            .await
    }

    pub async fn chat_with_agent(
        &self,
        message: &str,
        options: &ChatOptions,
    ) -> Result<ChatResponse, ApiError> {
        self.client.chat_with_agent(message, options).await
    }
}
