use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storywave_shared::PostDto;

/// Post entity - a user-authored article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Assigned by the store on first save.
    pub id: Option<i64>,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub thumbs: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create an unsaved post owned by `user_id`.
    pub fn new(user_id: impl Into<String>, title: String, content: String) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            title,
            content,
            thumbs: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Overwrite the editable fields and stamp the edit time.
    pub fn apply_edit(&mut self, title: String, content: String) {
        self.title = title;
        self.content = content;
        self.updated_at = Some(Utc::now());
    }
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            thumbs: post.thumbs,
            user_id: Some(post.user_id),
            created_at: Some(post.created_at),
            updated_at: post.updated_at,
        }
    }
}

/// Build a post from its transfer form. Timestamps and the like counter are
/// taken as given; callers that create posts overwrite them.
pub(crate) fn post_from_dto(dto: PostDto, user_id: &str) -> Post {
    Post {
        id: dto.id,
        user_id: user_id.to_string(),
        title: dto.title,
        content: dto.content,
        thumbs: dto.thumbs,
        created_at: dto.created_at.unwrap_or_else(Utc::now),
        updated_at: dto.updated_at,
    }
}
