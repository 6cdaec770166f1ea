//! Shared types for the Pool knowledge base API.
//!
//! This crate provides:
//! - The response envelope every endpoint answers with (`Envelope`)
//! - The UI/content language preference (`Language`)
//! - Request and response payloads for posts, API keys, admin users,
//!   search and chat

mod admin;
mod api_keys;
mod chat;
mod envelope;
mod language;
mod posts;
mod search;

pub use admin::{AdminCreate, AdminUser, LoginRequest, LoginResponse};
pub use api_keys::{ApiKey, ApiKeyCreate, ApiKeyList, ApiKeyType, ApiKeyUpdate};
pub use chat::{ChatRequest, ChatResponse, DEFAULT_AGENT};
pub use envelope::{DEFAULT_FAILURE_MESSAGE, Envelope, MISSING_CODE, SUCCESS_CODE};
pub use language::{LANGUAGE_KEY, Language, ParseLanguageError};
pub use posts::{Post, PostCreate, PostList, PostListQuery, PostUpdate};
pub use search::{DEFAULT_TOP_K, SearchRequest, SearchResponse, SearchResult, SearchStatus};
