//! Feed filter state and query construction.
//!
//! This module is the single source of truth for the three filter
//! dimensions of the public feed (host, content type, sort mode) and for
//! turning them into a [`PostFilter`] that the query layer executes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::db::{ContentType, Post};

/// Ordering applied to the post feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Newest first (creation timestamp, descending). The default.
    #[default]
    Latest,
    /// Most liked first.
    Popular,
    /// Most commented first.
    Trending,
}

impl SortMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Popular => "popular",
            Self::Trending => "trending",
        }
    }

    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "latest" => Some(Self::Latest),
            "popular" => Some(Self::Popular),
            "trending" => Some(Self::Trending),
            _ => None,
        }
    }

    /// Parse a user-supplied sort value. Anything unrecognized falls back
    /// to `Latest`.
    #[must_use]
    pub fn parse_or_latest(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }

    /// The single ORDER BY clause for this mode. Ties are left to the
    /// backend; no secondary key is imposed.
    #[must_use]
    pub fn order_clause(self) -> &'static str {
        match self {
            Self::Latest => "created_at DESC",
            Self::Popular => "like_count DESC",
            Self::Trending => "comment_count DESC",
        }
    }
}

/// Filter parameters consumed by [`crate::db::list_posts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Exact-match author name constraint, if any.
    pub host: Option<String>,
    /// Exact-match content type constraint, if any.
    pub content_type: Option<ContentType>,
    /// Ordering to apply.
    pub sort: SortMode,
}

/// In-memory filter selection for a browsing session.
///
/// Holds the current host filter, content type filter, and sort mode with
/// independent setters and a reset-to-default operation. The state is
/// process-local and never persisted; consumers re-derive their post list
/// after any change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    host: Option<String>,
    content_type: Option<ContentType>,
    sort: SortMode,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the host filter. An empty string means "no filter".
    pub fn set_host_filter(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.host = if value.is_empty() { None } else { Some(value) };
    }

    /// Overwrite the content type filter. `None` means "no filter".
    pub fn set_content_type_filter(&mut self, value: Option<ContentType>) {
        self.content_type = value;
    }

    /// Overwrite the sort mode.
    pub fn set_sort_mode(&mut self, value: SortMode) {
        self.sort = value;
    }

    /// Restore all three dimensions to their defaults: no host filter, no
    /// content type filter, latest-first ordering.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn host_filter(&self) -> Option<&str> {
        self.host.as_deref()
    }

    #[must_use]
    pub fn content_type_filter(&self) -> Option<ContentType> {
        self.content_type
    }

    #[must_use]
    pub fn sort_mode(&self) -> SortMode {
        self.sort
    }

    /// Snapshot the current selection as query-layer filter parameters.
    #[must_use]
    pub fn to_filter(&self) -> PostFilter {
        PostFilter {
            host: self.host.clone(),
            content_type: self.content_type,
            sort: self.sort,
        }
    }
}

/// De-duplicated author names from a loaded post list, in first-seen
/// order. Used to populate the host filter selector; recomputed whenever
/// the post list changes.
#[must_use]
pub fn available_hosts(posts: &[Post]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut hosts = Vec::new();
    for post in posts {
        if seen.insert(post.author_name.as_str()) {
            hosts.push(post.author_name.clone());
        }
    }
    hosts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_by(author: &str) -> Post {
        Post {
            id: 0,
            title: None,
            body: None,
            content_type: "text".to_string(),
            media_url: None,
            media_caption: None,
            author_name: author.to_string(),
            like_count: 0,
            comment_count: 0,
            created_at: "2025-01-01 00:00:00".to_string(),
            updated_at: "2025-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = FilterState::new();
        state.set_host_filter("Anita");
        state.set_content_type_filter(Some(ContentType::Video));
        state.set_sort_mode(SortMode::Popular);

        state.reset();

        assert_eq!(state.host_filter(), None);
        assert_eq!(state.content_type_filter(), None);
        assert_eq!(state.sort_mode(), SortMode::Latest);
    }

    #[test]
    fn test_empty_host_means_no_filter() {
        let mut state = FilterState::new();
        state.set_host_filter("Anita");
        assert_eq!(state.host_filter(), Some("Anita"));

        state.set_host_filter("");
        assert_eq!(state.host_filter(), None);
    }

    #[test]
    fn test_sort_parse_falls_back_to_latest() {
        assert_eq!(SortMode::parse_or_latest("popular"), SortMode::Popular);
        assert_eq!(SortMode::parse_or_latest("trending"), SortMode::Trending);
        assert_eq!(SortMode::parse_or_latest("latest"), SortMode::Latest);
        assert_eq!(SortMode::parse_or_latest("newest"), SortMode::Latest);
        assert_eq!(SortMode::parse_or_latest(""), SortMode::Latest);
    }

    #[test]
    fn test_exactly_one_order_clause_per_mode() {
        assert_eq!(SortMode::Latest.order_clause(), "created_at DESC");
        assert_eq!(SortMode::Popular.order_clause(), "like_count DESC");
        assert_eq!(SortMode::Trending.order_clause(), "comment_count DESC");
    }

    #[test]
    fn test_available_hosts_deduplicates() {
        let posts = vec![
            post_by("Anita"),
            post_by("Ravi"),
            post_by("Anita"),
            post_by("Meera"),
            post_by("Ravi"),
        ];

        let hosts = available_hosts(&posts);
        assert_eq!(hosts, vec!["Anita", "Ravi", "Meera"]);
        assert!(hosts.len() <= posts.len());
    }

    #[test]
    fn test_available_hosts_empty() {
        assert!(available_hosts(&[]).is_empty());
    }
}
