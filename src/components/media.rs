//! Image and video embeds for post pages.

use maud::{html, Markup, Render};

use crate::db::{ContentType, Post};

/// Full-width media embed for a post detail page.
///
/// Renders nothing for posts without a media URL (the unenforced
/// image/video invariant lives with the admin form, not here).
#[derive(Debug, Clone)]
pub struct MediaEmbed<'a> {
    pub post: &'a Post,
}

impl<'a> MediaEmbed<'a> {
    #[must_use]
    pub const fn new(post: &'a Post) -> Self {
        Self { post }
    }
}

impl Render for MediaEmbed<'_> {
    fn render(&self) -> Markup {
        let Some(media_url) = self.post.media_url.as_deref() else {
            return html! {};
        };

        match self.post.content_type_enum() {
            Some(ContentType::Video) => html! {
                div class="media-embed" {
                    video controls class="media-video" {
                        source src=(media_url) type="video/mp4";
                        "Your browser does not support the video tag."
                    }
                    @if let Some(caption) = &self.post.media_caption {
                        p class="media-caption" { (caption) }
                    }
                }
            },
            Some(ContentType::Image) => html! {
                div class="media-embed" {
                    img class="media-image" src=(media_url) alt=[self.post.media_caption.as_deref()];
                    @if let Some(caption) = &self.post.media_caption {
                        div class="media-caption-overlay" {
                            p { (caption) }
                        }
                    }
                }
            },
            // Text posts occasionally carry decorative media
            _ => html! {
                div class="media-embed" {
                    img class="media-image" src=(media_url) alt=[self.post.media_caption.as_deref()];
                }
            },
        }
    }
}
