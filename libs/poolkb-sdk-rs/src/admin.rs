//! Admin dashboard endpoints.
//!
//! Requests are sent without locale injection; the admin API is
//! locale-agnostic.

use poolkb_types::{
    AdminCreate, AdminUser, ApiKey, ApiKeyCreate, ApiKeyList, ApiKeyUpdate, LoginRequest,
    LoginResponse, Post, PostCreate, PostList, PostListQuery, PostUpdate,
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::{ApiRequest, path_segment};

#[cfg(feature = "client")]
use crate::config::ClientConfig;

/// Client for `/api/admin/*`.
pub struct AdminApi {
    client: ApiClient,
}

impl AdminApi {
    #[cfg(feature = "client")]
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::from_client(ApiClient::new(config)?))
    }

    pub fn from_client(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Log in and keep the returned access token for later requests.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            username,
            password: password.expose_secret(),
        };
        let response: LoginResponse = self
            .client
            .call(ApiRequest::post("/api/admin/login").json(&body)?)
            .await?;

        self.client
            .set_token(SecretString::new(response.access_token.as_str().into()));
        info!(admin = %response.admin.username, "admin logged in");

        Ok(response)
    }

    #[instrument(skip(self))]
    pub async fn get_info(&self) -> Result<AdminUser, ApiError> {
        self.client.call(ApiRequest::get("/api/admin/me")).await
    }

    /// End the session. The stored token is dropped even if the server call fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.client.execute(ApiRequest::post("/api/admin/logout")).await;
        self.client.clear_token();
        result.map(|_| ())
    }

    #[instrument(skip(self, password))]
    pub async fn create_admin(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
        is_super_admin: bool,
    ) -> Result<AdminUser, ApiError> {
        let body = AdminCreate {
            username,
            email,
            password: password.expose_secret(),
            is_super_admin,
        };
        self.client
            .call(ApiRequest::post("/api/admin/users").json(&body)?)
            .await
    }

    // ========================================================================
    // API keys
    // ========================================================================

    /// Keys currently in effect. The shape is server-defined.
    #[instrument(skip(self))]
    pub async fn fetch_effective_keys(&self) -> Result<Value, ApiError> {
        self.client
            .execute(ApiRequest::get("/api/admin/api-keys/effective"))
            .await
    }

    #[instrument(skip(self, key), fields(key_type = %key.key_type, key_name = %key.key_name))]
    pub async fn save_api_key(&self, key: &ApiKeyCreate) -> Result<ApiKey, ApiError> {
        self.client
            .call(ApiRequest::post("/api/admin/api-keys").json(key)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_api_keys(&self) -> Result<ApiKeyList, ApiError> {
        self.client.call(ApiRequest::get("/api/admin/api-keys")).await
    }

    #[instrument(skip(self))]
    pub async fn get_api_key(&self, id: i64) -> Result<ApiKey, ApiError> {
        self.client
            .call(ApiRequest::get(format!("/api/admin/api-keys/{}", id)))
            .await
    }

    #[instrument(skip(self, update))]
    pub async fn update_api_key(&self, id: i64, update: &ApiKeyUpdate) -> Result<ApiKey, ApiError> {
        self.client
            .call(ApiRequest::put(format!("/api/admin/api-keys/{}", id)).json(update)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_api_key(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .execute(ApiRequest::delete(format!("/api/admin/api-keys/{}", id)))
            .await
            .map(|_| ())
    }

    // ========================================================================
    // Models
    // ========================================================================

    /// Available models. The shape is server-defined.
    #[instrument(skip(self))]
    pub async fn fetch_models(&self) -> Result<Value, ApiError> {
        self.client.execute(ApiRequest::get("/api/admin/models")).await
    }

    #[instrument(skip(self))]
    pub async fn switch_model(&self, model: &str) -> Result<Value, ApiError> {
        self.client
            .execute(ApiRequest::put("/api/admin/models/current").json(&json!({ "model": model }))?)
            .await
    }

    // ========================================================================
    // Posts
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn fetch_post_list(&self, query: Option<&PostListQuery>) -> Result<PostList, ApiError> {
        self.client
            .call(ApiRequest::get("/api/admin/posts").query(&query)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_post(&self, id: &str) -> Result<Post, ApiError> {
        self.client
            .call(ApiRequest::get(format!("/api/admin/posts/{}", path_segment(id)?)))
            .await
    }

    #[instrument(skip(self, post), fields(title = %post.title))]
    pub async fn create_post(&self, post: &PostCreate) -> Result<Post, ApiError> {
        self.client
            .call(ApiRequest::post("/api/admin/posts").json(post)?)
            .await
    }

    #[instrument(skip(self, update))]
    pub async fn update_post(&self, id: &str, update: &PostUpdate) -> Result<Post, ApiError> {
        self.client
            .call(ApiRequest::put(format!("/api/admin/posts/{}", path_segment(id)?)).json(update)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .execute(ApiRequest::delete(format!("/api/admin/posts/{}", path_segment(id)?)))
            .await
            .map(|_| ())
    }
}
