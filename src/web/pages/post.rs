//! Post detail page with engagement controls and live comments.

use maud::{html, Markup, PreEscaped};

use crate::components::{BaseLayout, Form, MediaEmbed, TextArea};
use crate::db::{Comment, Post, User};

/// Script establishing the live comment stream for a post.
///
/// Subscribes to the SSE endpoint; every delivered snapshot replaces the
/// rendered list wholesale. The browser closes the EventSource when the
/// page is dismissed, which releases the server-side subscription.
fn comment_stream_script(post_id: i64) -> String {
    format!(
        r#"(function() {{
    var list = document.getElementById('comments-list');
    if (!list || !window.EventSource) return;
    var source = new EventSource('/post/{post_id}/comments/stream');
    source.onmessage = function(event) {{
        var comments = JSON.parse(event.data);
        list.innerHTML = '';
        comments.forEach(function(comment) {{
            var item = document.createElement('article');
            item.className = 'comment';
            var author = document.createElement('strong');
            author.textContent = comment.author_name;
            var time = document.createElement('span');
            time.className = 'comment-time';
            time.textContent = comment.created_at;
            var body = document.createElement('p');
            body.textContent = comment.body;
            item.appendChild(author);
            item.appendChild(time);
            item.appendChild(body);
            list.appendChild(item);
        }});
        var count = document.getElementById('comment-count');
        if (count) count.textContent = comments.length;
    }};
    window.addEventListener('beforeunload', function() {{ source.close(); }});
}})();"#
    )
}

/// Parameters for the post detail page.
#[derive(Debug)]
pub struct PostDetailParams<'a> {
    pub user: Option<&'a User>,
    pub is_admin: bool,
    pub post: &'a Post,
    pub comments: &'a [Comment],
}

/// Render the post detail page.
#[must_use]
pub fn render_post_detail_page(params: &PostDetailParams<'_>) -> Markup {
    let post = params.post;
    let title = post.title.as_deref().unwrap_or("Post");

    let comment_form = html! {
        input type="text" name="author_name" placeholder="आपका नाम / Your name" required;
        (TextArea::new("body").placeholder("अपनी बात लिखें…").rows(3).required())
        button type="submit" { "Comment" }
    };

    let content = html! {
        a class="back-link" href="/" { "← Back to Posts" }

        article class="post-detail" {
            (MediaEmbed::new(post))

            header class="post-detail-header" {
                div {
                    h3 class="post-author" { (post.author_name) }
                    p class="post-time" { (post.created_at) }
                }
                div class="post-actions" {
                    (Form::post(&format!("/post/{}/like", post.id), html! {
                        button type="submit" class="like-button" { "❤️ Like (" (post.like_count) ")" }
                    }).class("inline-form"))
                    (Form::post(&format!("/post/{}/unlike", post.id), html! {
                        button type="submit" class="like-button" { "Unlike" }
                    }).class("inline-form"))
                }
            }

            @if let Some(title) = &post.title {
                h1 { (title) }
            }

            @if let Some(body) = &post.body {
                div class="post-body" {
                    @for paragraph in body.split('\n') {
                        @if !paragraph.is_empty() {
                            p { (paragraph) }
                        }
                    }
                }
            }
        }

        section class="comments" id="comments" {
            h2 { "Comments (" span id="comment-count" { (params.comments.len()) } ")" }

            div id="comments-list" {
                @for comment in params.comments {
                    article class="comment" {
                        strong { (comment.author_name) }
                        span class="comment-time" { (comment.created_at) }
                        p { (comment.body) }
                    }
                }
            }

            (Form::post(&format!("/post/{}/comments", post.id), comment_form).class("comment-form"))
        }

        script { (PreEscaped(comment_stream_script(post.id))) }
    };

    BaseLayout::new(title, params.user)
        .with_admin(params.is_admin)
        .render(content)
}

/// Render the not-found page for a missing post.
#[must_use]
pub fn render_post_not_found(user: Option<&User>, is_admin: bool) -> Markup {
    let content = html! {
        div class="empty-state" {
            p class="empty-state-icon" { "📝" }
            h2 { "पोस्ट नहीं मिली" }
            p { "The post you're looking for doesn't exist or has been removed." }
            a href="/" class="button" { "Browse All Posts" }
        }
    };

    BaseLayout::new("Not Found", user)
        .with_admin(is_admin)
        .render(content)
}
