//! Card components for displaying posts in the feed.

use maud::{html, Markup, Render};

use crate::components::badge::{ContentTypeBadge, EngagementBadge};
use crate::db::Post;

/// A post card for feed listings.
#[derive(Debug, Clone)]
pub struct PostCard<'a> {
    pub post: &'a Post,
}

impl<'a> PostCard<'a> {
    #[must_use]
    pub const fn new(post: &'a Post) -> Self {
        Self { post }
    }

    /// Author initials for the avatar circle, at most two characters.
    fn initials(&self) -> String {
        self.post
            .author_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect()
    }

    /// First lines of the body for the card excerpt.
    fn excerpt(&self) -> Option<&str> {
        let body = self.post.body.as_deref()?;
        let end = body
            .char_indices()
            .nth(160)
            .map_or(body.len(), |(index, _)| index);
        Some(&body[..end])
    }
}

impl Render for PostCard<'_> {
    fn render(&self) -> Markup {
        let post = self.post;

        html! {
            article class="post-card" {
                div class="post-card-header" {
                    span class="avatar" { (self.initials()) }
                    div {
                        h3 class="post-author" { (post.author_name) }
                        p class="post-time" { (post.created_at) }
                    }
                    (ContentTypeBadge::from_str(&post.content_type))
                }
                @if let Some(media_url) = &post.media_url {
                    @if post.content_type == "video" {
                        video class="post-media" src=(media_url) controls preload="metadata" {}
                    } @else {
                        img class="post-media" src=(media_url) alt=[post.media_caption.as_deref()];
                    }
                }
                a class="post-card-body" href=(format!("/post/{}", post.id)) {
                    @if let Some(title) = &post.title {
                        h3 { (title) }
                    }
                    @if let Some(excerpt) = self.excerpt() {
                        p { (excerpt) }
                    }
                }
                div class="post-card-footer" {
                    (EngagementBadge::new(post.like_count, post.comment_count))
                    a href=(format!("/post/{}", post.id)) { "और पढ़ें" }
                }
            }
        }
    }
}

/// A grid container for post cards.
#[derive(Debug, Clone)]
pub struct PostGrid<'a> {
    pub posts: &'a [Post],
}

impl<'a> PostGrid<'a> {
    #[must_use]
    pub const fn new(posts: &'a [Post]) -> Self {
        Self { posts }
    }
}

impl Render for PostGrid<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="post-grid" {
                @for post in self.posts {
                    (PostCard::new(post))
                }
            }
        }
    }
}

/// Empty state shown when no posts match the current filters.
#[derive(Debug, Clone)]
pub struct EmptyState<'a> {
    pub message: &'a str,
    pub reset_url: Option<&'a str>,
}

impl<'a> EmptyState<'a> {
    #[must_use]
    pub const fn new(message: &'a str) -> Self {
        Self {
            message,
            reset_url: None,
        }
    }

    /// Show a "clear filters" link pointing at the given URL.
    #[must_use]
    pub const fn with_reset(mut self, url: &'a str) -> Self {
        self.reset_url = Some(url);
        self
    }
}

impl Render for EmptyState<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="empty-state" {
                p class="empty-state-icon" { "📝" }
                h3 { "कोई पोस्ट नहीं मिली" }
                p { (self.message) }
                @if let Some(url) = self.reset_url {
                    a href=(url) class="button" { "Clear Filters" }
                }
            }
        }
    }
}
