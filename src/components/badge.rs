//! Badge components for content types and engagement counts.

use maud::{html, Markup, Render};

use crate::db::ContentType;

/// A generic inline badge.
#[derive(Debug, Clone)]
pub struct Badge<'a> {
    pub text: &'a str,
    pub class: &'a str,
}

impl<'a> Badge<'a> {
    #[must_use]
    pub const fn new(text: &'a str, class: &'a str) -> Self {
        Self { text, class }
    }
}

impl Render for Badge<'_> {
    fn render(&self) -> Markup {
        html! {
            span class=(format!("badge {}", self.class)) { (self.text) }
        }
    }
}

/// Badge for a post's content type.
#[derive(Debug, Clone, Copy)]
pub struct ContentTypeBadge {
    content_type: Option<ContentType>,
}

impl ContentTypeBadge {
    #[must_use]
    pub fn from_str(raw: &str) -> Self {
        Self {
            content_type: ContentType::from_str(raw),
        }
    }

    #[must_use]
    pub const fn new(content_type: ContentType) -> Self {
        Self {
            content_type: Some(content_type),
        }
    }

    fn label(self) -> &'static str {
        match self.content_type {
            Some(ContentType::Text) => "\u{1f4ad} विचार",
            Some(ContentType::Image) => "\u{1f5bc}\u{fe0f} छवि",
            Some(ContentType::Video) => "\u{1f3a5} वीडियो",
            None => "?",
        }
    }

    fn class(self) -> &'static str {
        match self.content_type {
            Some(ContentType::Text) => "badge-text",
            Some(ContentType::Image) => "badge-image",
            Some(ContentType::Video) => "badge-video",
            None => "badge-unknown",
        }
    }
}

impl Render for ContentTypeBadge {
    fn render(&self) -> Markup {
        Badge::new(self.label(), self.class()).render()
    }
}

/// Like and comment counts for a post.
#[derive(Debug, Clone, Copy)]
pub struct EngagementBadge {
    pub like_count: i64,
    pub comment_count: i64,
}

impl EngagementBadge {
    #[must_use]
    pub const fn new(like_count: i64, comment_count: i64) -> Self {
        Self {
            like_count,
            comment_count,
        }
    }
}

impl Render for EngagementBadge {
    fn render(&self) -> Markup {
        html! {
            span class="engagement" {
                span class="engagement-likes" { "\u{2764}\u{fe0f} " (self.like_count) }
                " "
                span class="engagement-comments" { "\u{1f4ac} " (self.comment_count) }
            }
        }
    }
}
