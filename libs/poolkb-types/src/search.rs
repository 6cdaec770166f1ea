use serde::{Deserialize, Serialize};

/// Number of results requested when the caller does not say.
pub const DEFAULT_TOP_K: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: u32,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Found,
    NotFound,
}

/// A post matched by semantic search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub post_id: String,
    pub title: String,
    pub relevance_score: f64,
    pub matched_content: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub status: SearchStatus,
    pub query: String,

    /// Absent when nothing matched.
    #[serde(default)]
    pub results_count: u64,

    #[serde(default)]
    pub results: Vec<SearchResult>,

    #[serde(default)]
    pub message: Option<String>,
}
