use serde::{Deserialize, Serialize};

/// A knowledge base post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Creation time (ISO 8601 format)
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last update time (ISO 8601 format)
    #[serde(default)]
    pub updated_at: Option<String>,

    pub is_active: bool,
}

/// One page of posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostList {
    pub posts: Vec<Post>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

/// Pagination parameters for post listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreate {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update; fields left as `None` are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_list_from_server_payload() {
        let payload = json!({
            "posts": [{
                "id": "6f1c",
                "title": "Vector search",
                "content": "How embeddings work",
                "tags": ["rag", "search"],
                "created_at": "2024-01-15T10:30:00",
                "updated_at": null,
                "is_active": true
            }],
            "total": 1,
            "page": 1,
            "page_size": 20
        });

        let list: PostList = serde_json::from_value(payload).unwrap();

        assert_eq!(list.total, 1);
        assert_eq!(list.posts[0].tags, vec!["rag", "search"]);
        assert_eq!(list.posts[0].created_at.as_deref(), Some("2024-01-15T10:30:00"));
        assert!(list.posts[0].updated_at.is_none());
    }

    #[test]
    fn test_post_update_omits_unset_fields() {
        let update = PostUpdate {
            is_active: Some(false),
            ..Default::default()
        };

        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"is_active": false}));
    }

    #[test]
    fn test_empty_query_serializes_to_empty_object() {
        let query = PostListQuery::default();
        assert_eq!(serde_json::to_value(&query).unwrap(), json!({}));
    }
}
