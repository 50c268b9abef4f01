use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Re-export the domain types
pub use story::{story_slug, ScoredTag, StoryRecord, Tag};

mod story;

/// Items accepted by the insert operation: a single tag or a list of tags
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagItems {
    One(Tag),
    Many(Vec<Tag>),
}

impl From<TagItems> for Vec<Tag> {
    fn from(items: TagItems) -> Self {
        match items {
            TagItems::One(tag) => vec![tag],
            TagItems::Many(tags) => tags,
        }
    }
}

/// Request structure for indexing stories
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InsertRequest {
    /// A tag or list of tags; the `text` of each tag is what gets embedded
    #[schema(value_type = Object)]
    pub items: TagItems,
}

/// Request structure for search and suggestion queries
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Free-text query matched against the indexed loglines
    #[schema(example = "A person travels Goa expecting the beach, but finds a war with Portugal")]
    pub query: String,
    /// Number of nearest items to return (default: 3)
    #[serde(default = "default_k")]
    #[schema(example = 3, minimum = 1)]
    pub k: usize,
}

/// Health check response structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Status of the service
    #[schema(example = "ok")]
    pub status: String,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: String,
}

/// Error response structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Invalid input: Query cannot be empty")]
    pub error: String,
}

fn default_k() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_request_accepts_single_tag() {
        let json = r#"{"items": {"text": "a logline", "value": {"slug": "a--b"}}}"#;
        let request: InsertRequest = serde_json::from_str(json).unwrap();
        let items: Vec<Tag> = request.items.into();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "a logline");
    }

    #[test]
    fn insert_request_accepts_tag_list() {
        let json = r#"{"items": [{"text": "one"}, {"text": "two"}]}"#;
        let request: InsertRequest = serde_json::from_str(json).unwrap();
        let items: Vec<Tag> = request.items.into();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].text, "two");
    }

    #[test]
    fn search_request_defaults_k_to_three() {
        let request: SearchRequest = serde_json::from_str(r#"{"query": "dragons"}"#).unwrap();
        assert_eq!(request.k, 3);

        let request: SearchRequest =
            serde_json::from_str(r#"{"query": "dragons", "k": 7}"#).unwrap();
        assert_eq!(request.k, 7);
    }
}
