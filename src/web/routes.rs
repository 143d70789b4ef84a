use std::convert::Infallible;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Form;
use axum::Json;
use axum::Router;
use serde::Deserialize;

use super::{admin, auth, pages, AppState};
use crate::auth::MaybeUser;
use crate::db::{
    get_post, insert_comment, like_post, list_comments, list_posts, unlike_post, ContentType,
    NewComment, User,
};
use crate::feed::{available_hosts, FilterState, SortMode};

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/contact", get(contact))
        .route("/post/:id", get(post_detail))
        .route("/post/:id/like", post(like))
        .route("/post/:id/unlike", post(unlike))
        .route("/post/:id/comments", post(add_comment))
        .route("/post/:id/comments/stream", get(comment_stream))
        .route("/login", get(auth::login_page).post(auth::login_post))
        .route("/logout", post(auth::logout))
        .route("/admin", get(admin::dashboard))
        .route("/admin/new", get(admin::new_post_form).post(admin::create_post))
        .route("/admin/:id/edit", get(admin::edit_post_form).post(admin::update_post))
        .route("/admin/:id/delete", post(admin::delete_post_handler))
        .route("/api/posts", get(api_posts))
        .route("/api/posts/:id", get(api_post))
        .route("/media/*path", get(serve_media))
        .route("/healthz", get(health))
        .route("/favicon.ico", get(favicon))
}

fn is_admin(state: &AppState, user: Option<&User>) -> bool {
    user.is_some_and(|u| state.config.is_admin_email(&u.email))
}

// ========== Feed Routes ==========

/// Feed filter query parameters.
///
/// `type` is a closed enum: an unrecognized value is rejected at
/// deserialization (HTTP 400). `sort` deliberately stays a raw string so
/// unrecognized values can fall back to latest-first ordering.
#[derive(Debug, Deserialize)]
pub struct FeedParams {
    host: Option<String>,
    #[serde(rename = "type")]
    content_type: Option<ContentType>,
    sort: Option<String>,
}

impl FeedParams {
    fn into_state(self) -> FilterState {
        let mut state = FilterState::new();
        state.set_host_filter(self.host.unwrap_or_default());
        state.set_content_type_filter(self.content_type);
        state.set_sort_mode(
            self.sort
                .as_deref()
                .map_or(SortMode::Latest, SortMode::parse_or_latest),
        );
        state
    }
}

async fn home(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(params): Query<FeedParams>,
) -> Response {
    let filter_state = params.into_state();

    let posts = match list_posts(state.db.pool(), &filter_state.to_filter()).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("Failed to fetch posts: {e}");
            let html = pages::render_error_page(
                "Error Loading Posts",
                user.as_ref(),
                is_admin(&state, user.as_ref()),
            );
            return (StatusCode::INTERNAL_SERVER_ERROR, Html(html.into_string()))
                .into_response();
        }
    };

    let hosts = available_hosts(&posts);

    let html = pages::render_home_page(&pages::HomePageParams {
        user: user.as_ref(),
        is_admin: is_admin(&state, user.as_ref()),
        posts: &posts,
        hosts: &hosts,
        state: &filter_state,
    });
    Html(html.into_string()).into_response()
}

async fn post_detail(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<i64>,
) -> Response {
    let admin = is_admin(&state, user.as_ref());

    let post = match get_post(state.db.pool(), id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            let html = pages::render_post_not_found(user.as_ref(), admin);
            return (StatusCode::NOT_FOUND, Html(html.into_string())).into_response();
        }
        Err(e) => {
            tracing::error!("Failed to fetch post: {e}");
            let html = pages::render_error_page("Error Loading Post", user.as_ref(), admin);
            return (StatusCode::INTERNAL_SERVER_ERROR, Html(html.into_string()))
                .into_response();
        }
    };

    let comments = match list_comments(state.db.pool(), id).await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to fetch comments: {e}");
            Vec::new()
        }
    };

    let html = pages::render_post_detail_page(&pages::PostDetailParams {
        user: user.as_ref(),
        is_admin: admin,
        post: &post,
        comments: &comments,
    });
    Html(html.into_string()).into_response()
}

async fn about(State(state): State<AppState>, MaybeUser(user): MaybeUser) -> Response {
    let html = pages::render_about_page(user.as_ref(), is_admin(&state, user.as_ref()));
    Html(html.into_string()).into_response()
}

async fn contact(State(state): State<AppState>, MaybeUser(user): MaybeUser) -> Response {
    let html = pages::render_contact_page(user.as_ref(), is_admin(&state, user.as_ref()));
    Html(html.into_string()).into_response()
}

// ========== Engagement Routes ==========

/// Handler for liking a post (POST /post/:id/like).
async fn like(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match get_post(state.db.pool(), id).await {
        Ok(Some(_)) => {}
        Ok(None) => return (StatusCode::NOT_FOUND, "Post not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch post for like: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    }

    match like_post(state.db.pool(), id).await {
        Ok(count) => {
            tracing::debug!(post_id = id, like_count = count, "Post liked");
            Redirect::to(&format!("/post/{id}")).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to like post: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to like post").into_response()
        }
    }
}

/// Handler for unliking a post (POST /post/:id/unlike).
///
/// The counter is clamped at zero in the store; unliking a post with no
/// likes is a no-op.
async fn unlike(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match get_post(state.db.pool(), id).await {
        Ok(Some(_)) => {}
        Ok(None) => return (StatusCode::NOT_FOUND, "Post not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch post for unlike: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    }

    match unlike_post(state.db.pool(), id).await {
        Ok(count) => {
            tracing::debug!(post_id = id, like_count = count, "Post unliked");
            Redirect::to(&format!("/post/{id}")).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to unlike post: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to unlike post").into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    author_name: String,
    body: String,
}

/// Handler for adding a comment (POST /post/:id/comments).
///
/// After the insert succeeds the full refreshed comment list is published
/// to every live subscriber of the post.
async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<CommentForm>,
) -> Response {
    let author_name = form.author_name.trim();
    let body = form.body.trim();

    // The store does not validate emptiness; the boundary does.
    if author_name.is_empty() || body.is_empty() {
        return Redirect::to(&format!("/post/{id}#comments")).into_response();
    }

    match get_post(state.db.pool(), id).await {
        Ok(Some(_)) => {}
        Ok(None) => return (StatusCode::NOT_FOUND, "Post not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch post for comment: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    }

    let comment = NewComment {
        post_id: id,
        body: body.to_string(),
        author_name: author_name.to_string(),
    };

    if let Err(e) = insert_comment(state.db.pool(), &comment).await {
        tracing::error!("Failed to insert comment: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save comment").into_response();
    }

    match list_comments(state.db.pool(), id).await {
        Ok(comments) => state.streams.publish(id, &comments),
        Err(e) => tracing::error!("Failed to refresh comments for stream: {e}"),
    }

    Redirect::to(&format!("/post/{id}#comments")).into_response()
}

/// Handler for the live comment stream (GET /post/:id/comments/stream).
///
/// Server-Sent Events: the initial snapshot is delivered on connect, then
/// every change to the post's comments pushes the full refreshed list.
/// Dropping the connection drops the subscription, which removes the
/// subscriber from the registry.
async fn comment_stream(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match get_post(state.db.pool(), id).await {
        Ok(Some(_)) => {}
        Ok(None) => return (StatusCode::NOT_FOUND, "Post not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch post for comment stream: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    }

    // Subscribe before reading the initial snapshot so an insert landing
    // in between is not missed.
    let mut subscription = state.streams.subscribe(id);

    let initial = match list_comments(state.db.pool(), id).await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to fetch initial comments: {e}");
            Vec::new()
        }
    };

    let stream = async_stream::stream! {
        if let Ok(json) = serde_json::to_string(&initial) {
            yield Ok::<Event, Infallible>(Event::default().data(json));
        }
        while let Some(snapshot) = subscription.next_snapshot().await {
            if let Ok(json) = serde_json::to_string(&snapshot) {
                yield Ok(Event::default().data(json));
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default()).into_response()
}

// ========== JSON API Routes ==========

async fn api_posts(State(state): State<AppState>, Query(params): Query<FeedParams>) -> Response {
    let filter_state = params.into_state();

    match list_posts(state.db.pool(), &filter_state.to_filter()).await {
        Ok(posts) => Json(posts).into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch posts for API: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}

async fn api_post(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match get_post(state.db.pool(), id).await {
        Ok(Some(post)) => Json(post).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Post not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch post for API: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}

// ========== Media Serving ==========

/// Serve a stored media object (GET /media/*path).
///
/// Redirects to the bucket's public URL when the endpoint is public,
/// streams the object through otherwise (MinIO and friends).
async fn serve_media(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    if state.media.is_public() {
        let public_url = state.media.public_url(&path);
        return Redirect::permanent(&public_url).into_response();
    }

    let (content, content_type) = match state.media.get_object(&path).await {
        Ok(Some((bytes, ct))) => (bytes, ct),
        Ok(None) => return (StatusCode::NOT_FOUND, "File not found").into_response(),
        Err(e) => {
            tracing::error!(key = %path, error = %e, "Failed to fetch media object");
            return (StatusCode::NOT_FOUND, "File not found").into_response();
        }
    };

    let mime_type = if content_type == "application/octet-stream" || content_type.is_empty() {
        mime_guess::from_path(&path)
            .first_or_octet_stream()
            .to_string()
    } else {
        content_type
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime_type)],
        content,
    )
        .into_response()
}

// ========== Misc ==========

async fn health() -> &'static str {
    "OK"
}

async fn favicon() -> Response {
    // Return a simple SVG favicon (diya lamp emoji)
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><text y=".9em" font-size="90">🪔</text></svg>"##;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/svg+xml")],
        svg,
    )
        .into_response()
}
