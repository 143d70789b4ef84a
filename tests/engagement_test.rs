//! Integration tests for likes and the live comment stream.

use prerna::db::{
    get_post, insert_comment, insert_post, like_post, list_comments, unlike_post, ContentType,
    Database, NewComment, NewPost,
};
use prerna::live::CommentStreams;
use tempfile::TempDir;

async fn setup_test_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path)
        .await
        .expect("Failed to create database");
    (db, temp_dir)
}

async fn seed_post(db: &Database) -> i64 {
    insert_post(
        db.pool(),
        &NewPost {
            title: Some("मन के जीते जीत".to_string()),
            body: Some("छोटे कदम, बड़ी मंज़िल।".to_string()),
            content_type: ContentType::Text,
            media_url: None,
            media_caption: None,
            author_name: "Anita".to_string(),
        },
    )
    .await
    .expect("Failed to insert post")
}

#[tokio::test]
async fn test_like_increments_by_exactly_one() {
    let (db, _temp_dir) = setup_test_db().await;
    let id = seed_post(&db).await;

    assert_eq!(like_post(db.pool(), id).await.expect("like"), 1);
    assert_eq!(like_post(db.pool(), id).await.expect("like"), 2);

    let post = get_post(db.pool(), id).await.expect("get").expect("exists");
    assert_eq!(post.like_count, 2);
}

#[tokio::test]
async fn test_unlike_clamps_at_zero() {
    let (db, _temp_dir) = setup_test_db().await;
    let id = seed_post(&db).await;

    // Unliking a post with zero likes leaves the count at zero
    assert_eq!(unlike_post(db.pool(), id).await.expect("unlike"), 0);

    // like x2 then unlike x3: clamped at 0, never -1
    like_post(db.pool(), id).await.expect("like");
    like_post(db.pool(), id).await.expect("like");
    assert_eq!(unlike_post(db.pool(), id).await.expect("unlike"), 1);
    assert_eq!(unlike_post(db.pool(), id).await.expect("unlike"), 0);
    assert_eq!(unlike_post(db.pool(), id).await.expect("unlike"), 0);

    let post = get_post(db.pool(), id).await.expect("get").expect("exists");
    assert_eq!(post.like_count, 0);
}

#[tokio::test]
async fn test_like_missing_post_errors() {
    let (db, _temp_dir) = setup_test_db().await;

    assert!(like_post(db.pool(), 12_345).await.is_err());
    assert!(unlike_post(db.pool(), 12_345).await.is_err());
}

#[tokio::test]
async fn test_comment_stream_end_to_end() {
    let (db, _temp_dir) = setup_test_db().await;
    let id = seed_post(&db).await;

    let streams = CommentStreams::new();
    let mut subscription = streams.subscribe(id);

    // Mirror the route flow: insert, refresh, publish
    insert_comment(
        db.pool(),
        &NewComment {
            post_id: id,
            body: "वाह, क्या बात है".to_string(),
            author_name: "Ravi".to_string(),
        },
    )
    .await
    .expect("comment");
    let comments = list_comments(db.pool(), id).await.expect("list");
    streams.publish(id, &comments);

    let snapshot = subscription.next_snapshot().await.expect("snapshot");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].body, "वाह, क्या बात है");

    // Second comment delivers a full replacement snapshot
    insert_comment(
        db.pool(),
        &NewComment {
            post_id: id,
            body: "सहमत हूँ".to_string(),
            author_name: "Meera".to_string(),
        },
    )
    .await
    .expect("comment");
    let comments = list_comments(db.pool(), id).await.expect("list");
    streams.publish(id, &comments);

    let snapshot = subscription.next_snapshot().await.expect("snapshot");
    assert_eq!(snapshot.len(), 2);

    // Cancelling releases the registry entry; later publishes go nowhere
    subscription.cancel();
    assert_eq!(streams.subscriber_count(id), 0);
}
