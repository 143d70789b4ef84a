//! Integration tests for the content store.

use prerna::db::{
    count_comments, delete_post, get_post, insert_comment, insert_post, list_comments, list_posts,
    update_post_fields, ContentType, Database, NewComment, NewPost, PostPatch,
};
use prerna::feed::{FilterState, PostFilter, SortMode};
use tempfile::TempDir;

async fn setup_test_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path)
        .await
        .expect("Failed to create database");
    (db, temp_dir)
}

fn text_post(author: &str, title: &str) -> NewPost {
    NewPost {
        title: Some(title.to_string()),
        body: Some("हर सुबह एक नई सोच".to_string()),
        content_type: ContentType::Text,
        media_url: None,
        media_caption: None,
        author_name: author.to_string(),
    }
}

fn video_post(author: &str, title: &str) -> NewPost {
    NewPost {
        title: Some(title.to_string()),
        body: None,
        content_type: ContentType::Video,
        media_url: Some("/media/media/abc-clip.mp4".to_string()),
        media_caption: Some("प्रेरक वीडियो".to_string()),
        author_name: author.to_string(),
    }
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let (db, _temp_dir) = setup_test_db().await;

    let new_post = video_post("Anita", "सुबह की प्रेरणा");
    let id = insert_post(db.pool(), &new_post)
        .await
        .expect("Failed to insert post");

    let post = get_post(db.pool(), id)
        .await
        .expect("Failed to fetch post")
        .expect("Post should exist");

    // Caller-supplied fields match exactly
    assert_eq!(post.id, id);
    assert_eq!(post.title.as_deref(), Some("सुबह की प्रेरणा"));
    assert_eq!(post.content_type, "video");
    assert_eq!(post.content_type_enum(), Some(ContentType::Video));
    assert_eq!(post.media_url.as_deref(), Some("/media/media/abc-clip.mp4"));
    assert_eq!(post.media_caption.as_deref(), Some("प्रेरक वीडियो"));
    assert_eq!(post.author_name, "Anita");

    // Server-assigned fields are populated
    assert!(!post.created_at.is_empty());
    assert!(!post.updated_at.is_empty());
    assert_eq!(post.like_count, 0);
    assert_eq!(post.comment_count, 0);
}

#[tokio::test]
async fn test_get_missing_post_returns_none() {
    let (db, _temp_dir) = setup_test_db().await;

    let post = get_post(db.pool(), 424_242)
        .await
        .expect("Query should succeed");
    assert!(post.is_none());
}

#[tokio::test]
async fn test_host_and_type_filter_with_popular_sort() {
    let (db, _temp_dir) = setup_test_db().await;

    // 5 video posts by Anita with distinct like counts
    let mut anita_ids = Vec::new();
    for i in 0..5 {
        let id = insert_post(db.pool(), &video_post("Anita", &format!("Video {i}")))
            .await
            .expect("insert");
        anita_ids.push(id);
    }

    // 3 posts by others (one even a video)
    insert_post(db.pool(), &video_post("Ravi", "Other video"))
        .await
        .expect("insert");
    insert_post(db.pool(), &text_post("Meera", "Thought"))
        .await
        .expect("insert");
    insert_post(db.pool(), &text_post("Anita", "Anita text post"))
        .await
        .expect("insert");

    // Give each Anita video a different popularity: post k gets k likes
    for (likes, id) in anita_ids.iter().enumerate() {
        for _ in 0..likes {
            prerna::db::like_post(db.pool(), *id).await.expect("like");
        }
    }

    let mut state = FilterState::new();
    state.set_host_filter("Anita");
    state.set_content_type_filter(Some(ContentType::Video));
    state.set_sort_mode(SortMode::Popular);

    let posts = list_posts(db.pool(), &state.to_filter())
        .await
        .expect("Failed to list posts");

    // Exactly the 5 matching posts
    assert_eq!(posts.len(), 5);
    assert!(posts.iter().all(|p| p.author_name == "Anita"));
    assert!(posts.iter().all(|p| p.content_type == "video"));

    // Ordered by descending like count
    let likes: Vec<i64> = posts.iter().map(|p| p.like_count).collect();
    assert_eq!(likes, vec![4, 3, 2, 1, 0]);
}

#[tokio::test]
async fn test_latest_sort_orders_by_created_at() {
    let (db, _temp_dir) = setup_test_db().await;

    let old = insert_post(db.pool(), &text_post("Ravi", "Old"))
        .await
        .expect("insert");
    let new = insert_post(db.pool(), &text_post("Ravi", "New"))
        .await
        .expect("insert");

    // Push the first post into the past; datetime('now') has second
    // granularity, so same-second inserts would otherwise tie.
    sqlx::query("UPDATE posts SET created_at = datetime('now', '-1 day') WHERE id = ?")
        .bind(old)
        .execute(db.pool())
        .await
        .expect("backdate");

    let posts = list_posts(db.pool(), &PostFilter::default())
        .await
        .expect("Failed to list posts");

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, new);
    assert_eq!(posts[1].id, old);
}

#[tokio::test]
async fn test_trending_sort_orders_by_comment_count() {
    let (db, _temp_dir) = setup_test_db().await;

    let quiet = insert_post(db.pool(), &text_post("Ravi", "Quiet"))
        .await
        .expect("insert");
    let busy = insert_post(db.pool(), &text_post("Meera", "Busy"))
        .await
        .expect("insert");

    for i in 0..3 {
        insert_comment(
            db.pool(),
            &NewComment {
                post_id: busy,
                body: format!("comment {i}"),
                author_name: "पाठक".to_string(),
            },
        )
        .await
        .expect("comment");
    }

    let filter = PostFilter {
        sort: SortMode::Trending,
        ..PostFilter::default()
    };
    let posts = list_posts(db.pool(), &filter).await.expect("list");

    assert_eq!(posts[0].id, busy);
    assert_eq!(posts[0].comment_count, 3);
    assert_eq!(posts[1].id, quiet);
    assert_eq!(posts[1].comment_count, 0);
}

#[tokio::test]
async fn test_partial_update_leaves_other_fields() {
    let (db, _temp_dir) = setup_test_db().await;

    let id = insert_post(db.pool(), &text_post("Anita", "Original title"))
        .await
        .expect("insert");

    let patch = PostPatch {
        title: Some("नया शीर्षक".to_string()),
        ..PostPatch::default()
    };
    update_post_fields(db.pool(), id, &patch)
        .await
        .expect("update");

    let post = get_post(db.pool(), id).await.expect("get").expect("exists");
    assert_eq!(post.title.as_deref(), Some("नया शीर्षक"));
    // Unsupplied fields are untouched
    assert_eq!(post.body.as_deref(), Some("हर सुबह एक नई सोच"));
    assert_eq!(post.author_name, "Anita");
    assert!(!post.updated_at.is_empty());
}

#[tokio::test]
async fn test_update_missing_post_errors() {
    let (db, _temp_dir) = setup_test_db().await;

    let patch = PostPatch {
        title: Some("ghost".to_string()),
        ..PostPatch::default()
    };
    assert!(update_post_fields(db.pool(), 999, &patch).await.is_err());
}

#[tokio::test]
async fn test_delete_cascades_to_comments() {
    let (db, _temp_dir) = setup_test_db().await;

    let id = insert_post(db.pool(), &text_post("Anita", "Doomed"))
        .await
        .expect("insert");

    for body in ["first", "second"] {
        insert_comment(
            db.pool(),
            &NewComment {
                post_id: id,
                body: body.to_string(),
                author_name: "Ravi".to_string(),
            },
        )
        .await
        .expect("comment");
    }
    assert_eq!(count_comments(db.pool(), id).await.expect("count"), 2);

    let deleted = delete_post(db.pool(), id).await.expect("delete");
    assert!(deleted);

    // Post record is gone and its comments went with it
    assert!(get_post(db.pool(), id).await.expect("get").is_none());
    assert!(list_comments(db.pool(), id).await.expect("list").is_empty());

    // Deleting again reports not-found
    assert!(!delete_post(db.pool(), id).await.expect("delete"));
}

#[tokio::test]
async fn test_comment_insert_bumps_denormalized_count() {
    let (db, _temp_dir) = setup_test_db().await;

    let id = insert_post(db.pool(), &text_post("Meera", "Chatty"))
        .await
        .expect("insert");

    insert_comment(
        db.pool(),
        &NewComment {
            post_id: id,
            body: "बहुत सुंदर".to_string(),
            author_name: "गीता".to_string(),
        },
    )
    .await
    .expect("comment");

    let post = get_post(db.pool(), id).await.expect("get").expect("exists");
    assert_eq!(post.comment_count, 1);

    let comments = list_comments(db.pool(), id).await.expect("list");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].body, "बहुत सुंदर");
    assert_eq!(comments[0].author_name, "गीता");
    assert!(!comments[0].created_at.is_empty());
}
