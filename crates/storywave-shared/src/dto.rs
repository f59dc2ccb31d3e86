//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Boundary representation of a post.
///
/// Used both as the create/update payload and as the response body. On input
/// only `title` and `content` are honoured; the server owns every other field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub thumbs: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PostDto {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }
}

/// One page of a larger listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    /// 1-based page number, as the client requested it.
    pub page: u64,
    pub size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_needs_only_title_and_content() {
        let dto: PostDto =
            serde_json::from_str(r#"{"title":"Star Wars","content":"a long time ago"}"#).unwrap();
        assert_eq!(dto.title, "Star Wars");
        assert_eq!(dto.thumbs, 0);
        assert!(dto.id.is_none());
        assert!(dto.created_at.is_none());
    }

    #[test]
    fn serializes_camel_case_and_skips_missing_fields() {
        let mut dto = PostDto::new("t", "c");
        dto.user_id = Some("alice".to_string());
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["userId"], "alice");
        assert!(json.get("updatedAt").is_none());
        assert!(json.get("id").is_none());
    }
}
