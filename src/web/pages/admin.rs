//! Admin console pages: post listing and the create/edit form.

use maud::{html, Markup, Render};

use crate::components::{
    Alert, BaseLayout, ContentTypeBadge, Form, FormGroup, Input, Select, TextArea,
};
use crate::db::{Post, User};

/// Render the admin dashboard with the full post list and CRUD controls.
#[must_use]
pub fn render_admin_dashboard(user: &User, posts: &[Post]) -> Markup {
    let content = html! {
        div class="admin-header" {
            h1 { "Admin Console" }
            a href="/admin/new" class="button" { "+ New Post" }
        }

        @if posts.is_empty() {
            p { "No posts yet. Create the first one." }
        } @else {
            table class="admin-table" {
                thead {
                    tr {
                        th { "Title" }
                        th { "Type" }
                        th { "Author" }
                        th { "Likes" }
                        th { "Comments" }
                        th { "Updated" }
                        th { "Actions" }
                    }
                }
                tbody {
                    @for post in posts {
                        tr {
                            td {
                                a href=(format!("/post/{}", post.id)) {
                                    (post.title.as_deref().unwrap_or("(untitled)"))
                                }
                            }
                            td { (ContentTypeBadge::from_str(&post.content_type)) }
                            td { (post.author_name) }
                            td { (post.like_count) }
                            td { (post.comment_count) }
                            td { (post.updated_at) }
                            td class="admin-actions" {
                                a href=(format!("/admin/{}/edit", post.id)) { "Edit" }
                                (Form::post(&format!("/admin/{}/delete", post.id), html! {
                                    button type="submit" class="danger"
                                        onclick="return confirm('Delete this post?');" { "Delete" }
                                }).class("inline-form"))
                            }
                        }
                    }
                }
            }
        }
    };

    BaseLayout::new("Admin", Some(user))
        .with_admin(true)
        .render(content)
}

/// Parameters for the post create/edit form.
#[derive(Debug)]
pub struct PostFormParams<'a> {
    pub user: &'a User,
    /// Existing post when editing, `None` when creating.
    pub post: Option<&'a Post>,
    pub error: Option<&'a str>,
}

/// Render the post create/edit form.
///
/// The same form serves both operations; the action URL and prefilled
/// values differ. Media is optional: supplying a file uploads it to the
/// media host before the record is written.
#[must_use]
pub fn render_post_form(params: &PostFormParams<'_>) -> Markup {
    let post = params.post;
    let (title, action) = match post {
        Some(post) => ("Edit Post", format!("/admin/{}/edit", post.id)),
        None => ("New Post", "/admin/new".to_string()),
    };

    let form_content = html! {
        (FormGroup::new("Title", "title",
            Input::text("title")
                .id("title")
                .value_opt(post.and_then(|p| p.title.as_deref()))
                .placeholder("प्रेरणादायक शीर्षक")
                .render()))

        (FormGroup::new("Author", "author_name",
            Input::text("author_name")
                .id("author_name")
                .value_opt(post.map(|p| p.author_name.as_str()))
                .required()
                .render()))

        (FormGroup::new("Content Type", "content_type",
            Select::new("content_type")
                .id("content_type")
                .option("text", "Text")
                .option("image", "Image")
                .option("video", "Video")
                .selected_opt(post.map(|p| p.content_type.as_str()))
                .render()))

        (FormGroup::new("Body", "body",
            TextArea::new("body")
                .id("body")
                .rows(8)
                .value_opt(post.and_then(|p| p.body.as_deref()))
                .placeholder("अपने विचार यहाँ लिखें…")
                .render()))

        (FormGroup::new("Media file (image/video posts)", "media",
            Input::file("media")
                .id("media")
                .accept("image/*,video/*")
                .render()))

        @if let Some(media_url) = post.and_then(|p| p.media_url.as_deref()) {
            p class="current-media" {
                "Current media: "
                a href=(media_url) { (media_url) }
            }
        }

        (FormGroup::new("Media caption", "media_caption",
            Input::text("media_caption")
                .id("media_caption")
                .value_opt(post.and_then(|p| p.media_caption.as_deref()))
                .render()))

        button type="submit" { (if post.is_some() { "Save" } else { "Publish" }) }
    };

    let content = html! {
        a class="back-link" href="/admin" { "← Back to Admin" }
        h1 { (title) }

        @if let Some(error) = params.error {
            (Alert::error(error))
        }

        (Form::post(&action, form_content).class("post-form").multipart())
    };

    BaseLayout::new(title, Some(params.user))
        .with_admin(true)
        .render(content)
}
