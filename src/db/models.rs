use serde::{Deserialize, Serialize};

/// A published piece of motivational content.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: Option<String>,
    pub body: Option<String>,
    pub content_type: String,
    pub media_url: Option<String>,
    pub media_caption: Option<String>,
    pub author_name: String,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl Post {
    #[must_use]
    pub fn content_type_enum(&self) -> Option<ContentType> {
        ContentType::from_str(&self.content_type)
    }
}

/// Content type of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Image,
    Video,
}

impl ContentType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            _ => None,
        }
    }
}

/// A comment attached to a post. Author names are freeform display
/// names with no identity binding.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub body: String,
    pub author_name: String,
    pub created_at: String,
}

/// Data for inserting a new post. Timestamps are assigned by the store
/// at write time.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: Option<String>,
    pub body: Option<String>,
    pub content_type: ContentType,
    pub media_url: Option<String>,
    pub media_caption: Option<String>,
    pub author_name: String,
}

/// Partial update for a post. Only supplied fields are overwritten;
/// `updated_at` is always refreshed.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub content_type: Option<ContentType>,
    pub media_url: Option<String>,
    pub media_caption: Option<String>,
    pub author_name: Option<String>,
}

impl PostPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.content_type.is_none()
            && self.media_url.is_none()
            && self.media_caption.is_none()
            && self.author_name.is_none()
    }
}

/// Data for inserting a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub body: String,
    pub author_name: String,
}

/// An account that can sign in. Admin capability is not stored here;
/// it is derived from the configured allow-list at request time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub created_at: String,
}

/// A login session backing the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub expires_at: String,
    pub created_at: String,
    pub last_used_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_round_trip() {
        for ct in [ContentType::Text, ContentType::Image, ContentType::Video] {
            assert_eq!(ContentType::from_str(ct.as_str()), Some(ct));
        }
        assert_eq!(ContentType::from_str("gallery"), None);
        assert_eq!(ContentType::from_str(""), None);
    }
}
