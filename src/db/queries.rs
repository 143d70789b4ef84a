use anyhow::{bail, Context, Result};
use sqlx::SqlitePool;

use super::models::{Comment, NewComment, NewPost, Post, PostPatch, Session, User};
use crate::feed::PostFilter;

// ========== Posts ==========

/// List posts matching the given filter.
///
/// The query is composed from the full collection: an equality constraint
/// on author name if a host filter is set, an equality constraint on
/// content type if a type filter is set, and exactly one ORDER BY clause
/// from the sort mode. Ties are broken arbitrarily by SQLite.
pub async fn list_posts(pool: &SqlitePool, filter: &PostFilter) -> Result<Vec<Post>> {
    let mut sql = String::from("SELECT * FROM posts");

    let mut clauses: Vec<&'static str> = Vec::new();
    if filter.host.is_some() {
        clauses.push("author_name = ?");
    }
    if filter.content_type.is_some() {
        clauses.push("content_type = ?");
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    sql.push_str(" ORDER BY ");
    sql.push_str(filter.sort.order_clause());

    let mut query = sqlx::query_as::<_, Post>(&sql);
    if let Some(host) = &filter.host {
        query = query.bind(host);
    }
    if let Some(content_type) = filter.content_type {
        query = query.bind(content_type.as_str());
    }

    query.fetch_all(pool).await.context("Failed to list posts")
}

/// Get a post by ID.
pub async fn get_post(pool: &SqlitePool, id: i64) -> Result<Option<Post>> {
    sqlx::query_as("SELECT * FROM posts WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to fetch post")
}

/// Insert a new post, returning its ID. Creation and update timestamps
/// are assigned by the store.
pub async fn insert_post(pool: &SqlitePool, post: &NewPost) -> Result<i64> {
    let result = sqlx::query(
        r"
        INSERT INTO posts (title, body, content_type, media_url, media_caption, author_name)
        VALUES (?, ?, ?, ?, ?, ?)
        ",
    )
    .bind(&post.title)
    .bind(&post.body)
    .bind(post.content_type.as_str())
    .bind(&post.media_url)
    .bind(&post.media_caption)
    .bind(&post.author_name)
    .execute(pool)
    .await
    .context("Failed to insert post")?;

    Ok(result.last_insert_rowid())
}

/// Update only the supplied fields of a post, refreshing `updated_at`.
pub async fn update_post_fields(pool: &SqlitePool, id: i64, patch: &PostPatch) -> Result<()> {
    let mut sets: Vec<&'static str> = Vec::new();
    if patch.title.is_some() {
        sets.push("title = ?");
    }
    if patch.body.is_some() {
        sets.push("body = ?");
    }
    if patch.content_type.is_some() {
        sets.push("content_type = ?");
    }
    if patch.media_url.is_some() {
        sets.push("media_url = ?");
    }
    if patch.media_caption.is_some() {
        sets.push("media_caption = ?");
    }
    if patch.author_name.is_some() {
        sets.push("author_name = ?");
    }
    sets.push("updated_at = datetime('now')");

    let sql = format!("UPDATE posts SET {} WHERE id = ?", sets.join(", "));

    let mut query = sqlx::query(&sql);
    if let Some(title) = &patch.title {
        query = query.bind(title);
    }
    if let Some(body) = &patch.body {
        query = query.bind(body);
    }
    if let Some(content_type) = patch.content_type {
        query = query.bind(content_type.as_str());
    }
    if let Some(media_url) = &patch.media_url {
        query = query.bind(media_url);
    }
    if let Some(media_caption) = &patch.media_caption {
        query = query.bind(media_caption);
    }
    if let Some(author_name) = &patch.author_name {
        query = query.bind(author_name);
    }

    let result = query
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to update post")?;

    if result.rows_affected() == 0 {
        bail!("Post {id} not found");
    }

    Ok(())
}

/// Delete a post. Its comments are removed by the FK cascade.
///
/// Returns `true` if a row was deleted, `false` if the post did not
/// exist.
pub async fn delete_post(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete post")?;

    Ok(result.rows_affected() > 0)
}

/// Count total posts.
pub async fn count_posts(pool: &SqlitePool) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await
        .context("Failed to count posts")?;
    Ok(row.0)
}

// ========== Engagement ==========

/// Increment a post's like counter by exactly 1, returning the new count.
pub async fn like_post(pool: &SqlitePool, id: i64) -> Result<i64> {
    let result = sqlx::query("UPDATE posts SET like_count = like_count + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to like post")?;

    if result.rows_affected() == 0 {
        bail!("Post {id} not found");
    }

    fetch_like_count(pool, id).await
}

/// Decrement a post's like counter by 1, clamped at 0. Returns the new
/// count, which is never negative.
pub async fn unlike_post(pool: &SqlitePool, id: i64) -> Result<i64> {
    let result = sqlx::query("UPDATE posts SET like_count = MAX(like_count - 1, 0) WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to unlike post")?;

    if result.rows_affected() == 0 {
        bail!("Post {id} not found");
    }

    fetch_like_count(pool, id).await
}

async fn fetch_like_count(pool: &SqlitePool, id: i64) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT like_count FROM posts WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .context("Failed to fetch like count")?;
    Ok(row.0)
}

/// Append a comment with a store-assigned timestamp and bump the parent
/// post's denormalized comment count in the same transaction.
///
/// Returns the new comment's ID. Body emptiness is not validated here;
/// callers are expected to pre-check.
pub async fn insert_comment(pool: &SqlitePool, comment: &NewComment) -> Result<i64> {
    let mut tx = pool
        .begin()
        .await
        .context("Failed to begin comment transaction")?;

    let result = sqlx::query(
        r"
        INSERT INTO comments (post_id, body, author_name)
        VALUES (?, ?, ?)
        ",
    )
    .bind(comment.post_id)
    .bind(&comment.body)
    .bind(&comment.author_name)
    .execute(&mut *tx)
    .await
    .context("Failed to insert comment")?;

    let comment_id = result.last_insert_rowid();

    sqlx::query("UPDATE posts SET comment_count = comment_count + 1 WHERE id = ?")
        .bind(comment.post_id)
        .execute(&mut *tx)
        .await
        .context("Failed to bump comment count")?;

    tx.commit()
        .await
        .context("Failed to commit comment transaction")?;

    Ok(comment_id)
}

/// List a post's comments in arrival order.
pub async fn list_comments(pool: &SqlitePool, post_id: i64) -> Result<Vec<Comment>> {
    sqlx::query_as("SELECT * FROM comments WHERE post_id = ? ORDER BY created_at, id")
        .bind(post_id)
        .fetch_all(pool)
        .await
        .context("Failed to list comments")
}

/// Count a post's comments.
pub async fn count_comments(pool: &SqlitePool, post_id: i64) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments WHERE post_id = ?")
        .bind(post_id)
        .fetch_one(pool)
        .await
        .context("Failed to count comments")?;
    Ok(row.0)
}

// ========== Users ==========

/// Create a new user.
pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    display_name: &str,
    password_hash: &str,
) -> Result<i64> {
    let result = sqlx::query(
        r"
        INSERT INTO users (email, display_name, password_hash)
        VALUES (?, ?, ?)
        ",
    )
    .bind(email)
    .bind(display_name)
    .bind(password_hash)
    .execute(pool)
    .await
    .context("Failed to create user")?;

    Ok(result.last_insert_rowid())
}

/// Get a user by email (case-insensitive, matching the allow-list
/// semantics).
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    sqlx::query_as("SELECT * FROM users WHERE email = ? COLLATE NOCASE")
        .bind(email)
        .fetch_optional(pool)
        .await
        .context("Failed to fetch user by email")
}

/// Get a user by ID.
pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>> {
    sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to fetch user by id")
}

/// Count total users.
pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .context("Failed to count users")?;
    Ok(row.0)
}

// ========== Sessions ==========

/// Create a new session.
pub async fn create_session(
    pool: &SqlitePool,
    user_id: i64,
    token: &str,
    expires_at: &str,
) -> Result<i64> {
    let result = sqlx::query(
        r"
        INSERT INTO sessions (user_id, token, expires_at)
        VALUES (?, ?, ?)
        ",
    )
    .bind(user_id)
    .bind(token)
    .bind(expires_at)
    .execute(pool)
    .await
    .context("Failed to create session")?;

    Ok(result.last_insert_rowid())
}

/// Get a session by token.
pub async fn get_session_by_token(pool: &SqlitePool, token: &str) -> Result<Option<Session>> {
    sqlx::query_as("SELECT * FROM sessions WHERE token = ?")
        .bind(token)
        .fetch_optional(pool)
        .await
        .context("Failed to fetch session by token")
}

/// Update session last_used_at.
pub async fn update_session_last_used(pool: &SqlitePool, session_id: i64) -> Result<()> {
    sqlx::query("UPDATE sessions SET last_used_at = datetime('now') WHERE id = ?")
        .bind(session_id)
        .execute(pool)
        .await
        .context("Failed to update session last_used")?;
    Ok(())
}

/// Delete a session.
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await
        .context("Failed to delete session")?;
    Ok(())
}

/// Delete all sessions for a user.
pub async fn delete_user_sessions(pool: &SqlitePool, user_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await
        .context("Failed to delete user sessions")?;
    Ok(())
}

/// Delete all expired sessions, returning how many were removed.
pub async fn delete_expired_sessions(pool: &SqlitePool, now: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to delete expired sessions")?;
    Ok(result.rows_affected())
}
