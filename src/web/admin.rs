use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::auth::RequireAdmin;
use crate::db::{
    delete_post, get_post, insert_post, list_posts, update_post_fields, ContentType, NewPost,
    PostPatch,
};
use crate::feed::PostFilter;
use crate::web::{pages, AppState};

/// GET /admin - The admin dashboard with the full post list.
pub async fn dashboard(State(state): State<AppState>, RequireAdmin(user): RequireAdmin) -> Response {
    // Latest-first, unfiltered; admins see everything.
    let posts = match list_posts(state.db.pool(), &PostFilter::default()).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("Failed to fetch posts for admin: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };

    Html(pages::render_admin_dashboard(&user, &posts).into_string()).into_response()
}

/// GET /admin/new - Show the create form.
pub async fn new_post_form(RequireAdmin(user): RequireAdmin) -> Response {
    let html = pages::render_post_form(&pages::PostFormParams {
        user: &user,
        post: None,
        error: None,
    });
    Html(html.into_string()).into_response()
}

/// POST /admin/new - Create a post, uploading media first if supplied.
///
/// The upload-then-write sequence is not transactional: a successful
/// upload followed by a failed insert leaves the object behind. No
/// compensating delete is attempted.
pub async fn create_post(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    multipart: Multipart,
) -> Response {
    let form = match read_post_form(multipart).await {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("Failed to read post form: {e}");
            return (StatusCode::BAD_REQUEST, "Invalid form submission").into_response();
        }
    };

    let Some(content_type) = form.content_type.as_deref().and_then(ContentType::from_str) else {
        return form_error(&user, None, "Content type must be text, image, or video");
    };

    let Some(author_name) = form.author_name.clone() else {
        return form_error(&user, None, "Author is required");
    };

    let media_url = match upload_media(&state, form.media.as_ref()).await {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("Failed to upload media: {e}");
            return form_error(&user, None, "Failed to upload media");
        }
    };

    let new_post = NewPost {
        title: form.title,
        body: form.body,
        content_type,
        media_url,
        media_caption: form.media_caption,
        author_name,
    };

    match insert_post(state.db.pool(), &new_post).await {
        Ok(id) => {
            tracing::info!(post_id = id, "Post created");
            Redirect::to("/admin").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to insert post: {e}");
            form_error(&user, None, "Failed to save post")
        }
    }
}

/// GET /admin/:id/edit - Show the edit form.
pub async fn edit_post_form(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<i64>,
) -> Response {
    let post = match get_post(state.db.pool(), id).await {
        Ok(Some(p)) => p,
        Ok(None) => return (StatusCode::NOT_FOUND, "Post not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch post for edit: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };

    let html = pages::render_post_form(&pages::PostFormParams {
        user: &user,
        post: Some(&post),
        error: None,
    });
    Html(html.into_string()).into_response()
}

/// POST /admin/:id/edit - Update a post.
///
/// Only supplied (non-empty) fields overwrite the record; the update
/// timestamp is refreshed by the store. Media follows the same
/// upload-then-attach sequencing as create.
pub async fn update_post(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Response {
    let existing = match get_post(state.db.pool(), id).await {
        Ok(Some(p)) => p,
        Ok(None) => return (StatusCode::NOT_FOUND, "Post not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch post for update: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };

    let form = match read_post_form(multipart).await {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("Failed to read post form: {e}");
            return (StatusCode::BAD_REQUEST, "Invalid form submission").into_response();
        }
    };

    let content_type = match form.content_type.as_deref() {
        Some(raw) => match ContentType::from_str(raw) {
            Some(ct) => Some(ct),
            None => {
                return form_error(
                    &user,
                    Some(&existing),
                    "Content type must be text, image, or video",
                )
            }
        },
        None => None,
    };

    let media_url = match upload_media(&state, form.media.as_ref()).await {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("Failed to upload media: {e}");
            return form_error(&user, Some(&existing), "Failed to upload media");
        }
    };

    let patch = PostPatch {
        title: form.title,
        body: form.body,
        content_type,
        media_url,
        media_caption: form.media_caption,
        author_name: form.author_name,
    };

    match update_post_fields(state.db.pool(), id, &patch).await {
        Ok(()) => {
            tracing::info!(post_id = id, "Post updated");
            Redirect::to("/admin").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to update post: {e}");
            form_error(&user, Some(&existing), "Failed to save post")
        }
    }
}

/// POST /admin/:id/delete - Delete a post. Comments go with it.
pub async fn delete_post_handler(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<i64>,
) -> Response {
    match delete_post(state.db.pool(), id).await {
        Ok(true) => {
            tracing::info!(post_id = id, "Post deleted");
            Redirect::to("/admin").into_response()
        }
        Ok(false) => (StatusCode::NOT_FOUND, "Post not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to delete post: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete post").into_response()
        }
    }
}

// ========== Form Parsing ==========

/// Fields collected from the multipart post form. Empty text inputs are
/// normalized to `None`, which leaves the stored field untouched on
/// update.
#[derive(Debug, Default)]
struct PostFormData {
    title: Option<String>,
    body: Option<String>,
    content_type: Option<String>,
    media_caption: Option<String>,
    author_name: Option<String>,
    /// Uploaded file as (filename, bytes), if one was attached.
    media: Option<(String, Vec<u8>)>,
}

async fn read_post_form(mut multipart: Multipart) -> anyhow::Result<PostFormData> {
    let mut form = PostFormData::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(String::from) else {
            continue;
        };

        match name.as_str() {
            "media" => {
                let filename = field.file_name().unwrap_or("upload.bin").to_string();
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    form.media = Some((filename, bytes.to_vec()));
                }
            }
            "title" => form.title = non_empty(field.text().await?),
            "body" => form.body = non_empty(field.text().await?),
            "content_type" => form.content_type = non_empty(field.text().await?),
            "media_caption" => form.media_caption = non_empty(field.text().await?),
            "author_name" => form.author_name = non_empty(field.text().await?),
            _ => {}
        }
    }

    Ok(form)
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Upload the attached media file, if any, returning the URL to store.
async fn upload_media(
    state: &AppState,
    media: Option<&(String, Vec<u8>)>,
) -> anyhow::Result<Option<String>> {
    match media {
        Some((filename, bytes)) => {
            let url = state.media.upload(bytes, filename).await?;
            Ok(Some(url))
        }
        None => Ok(None),
    }
}

fn form_error(
    user: &crate::db::User,
    post: Option<&crate::db::Post>,
    message: &str,
) -> Response {
    let html = pages::render_post_form(&pages::PostFormParams {
        user,
        post,
        error: Some(message),
    });
    (StatusCode::BAD_REQUEST, Html(html.into_string())).into_response()
}
