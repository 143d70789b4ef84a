//! Integration tests for accounts and sessions.

use chrono::{Duration, Utc};
use prerna::auth::{generate_session_token, hash_password, verify_password};
use prerna::db::{
    count_users, create_session, create_user, delete_expired_sessions, delete_session,
    delete_user_sessions, get_session_by_token, get_user_by_email, get_user_by_id, Database,
};
use tempfile::TempDir;

async fn setup_test_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path)
        .await
        .expect("Failed to create database");
    (db, temp_dir)
}

#[tokio::test]
async fn test_create_and_fetch_user() {
    let (db, _temp_dir) = setup_test_db().await;

    let hash = hash_password("dhairya-aur-dheeraj").expect("hash");
    let id = create_user(db.pool(), "admin@example.com", "Admin Ji", &hash)
        .await
        .expect("create user");

    assert_eq!(count_users(db.pool()).await.expect("count"), 1);

    let user = get_user_by_id(db.pool(), id)
        .await
        .expect("query")
        .expect("user exists");
    assert_eq!(user.email, "admin@example.com");
    assert_eq!(user.display_name, "Admin Ji");
    assert!(verify_password("dhairya-aur-dheeraj", &user.password_hash).expect("verify"));
}

#[tokio::test]
async fn test_email_lookup_is_case_insensitive() {
    let (db, _temp_dir) = setup_test_db().await;

    let hash = hash_password("shraddha-saburi").expect("hash");
    create_user(db.pool(), "Editor@Example.com", "Editor", &hash)
        .await
        .expect("create user");

    let user = get_user_by_email(db.pool(), "editor@example.com")
        .await
        .expect("query");
    assert!(user.is_some());

    let user = get_user_by_email(db.pool(), "EDITOR@EXAMPLE.COM")
        .await
        .expect("query");
    assert!(user.is_some());

    let missing = get_user_by_email(db.pool(), "someone@else.com")
        .await
        .expect("query");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let (db, _temp_dir) = setup_test_db().await;

    let hash = hash_password("ek-hi-raasta").expect("hash");
    create_user(db.pool(), "admin@example.com", "First", &hash)
        .await
        .expect("create user");

    let duplicate = create_user(db.pool(), "admin@example.com", "Second", &hash).await;
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_session_lifecycle() {
    let (db, _temp_dir) = setup_test_db().await;

    let hash = hash_password("chalte-raho-chalte-raho").expect("hash");
    let user_id = create_user(db.pool(), "admin@example.com", "Admin", &hash)
        .await
        .expect("create user");

    let token = generate_session_token();
    let expires_at = (Utc::now() + Duration::hours(1)).to_rfc3339();
    create_session(db.pool(), user_id, &token, &expires_at)
        .await
        .expect("create session");

    let session = get_session_by_token(db.pool(), &token)
        .await
        .expect("query")
        .expect("session exists");
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.expires_at, expires_at);

    delete_session(db.pool(), &token).await.expect("delete");
    let gone = get_session_by_token(db.pool(), &token).await.expect("query");
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_expired_session_cleanup() {
    let (db, _temp_dir) = setup_test_db().await;

    let hash = hash_password("samay-badalta-hai").expect("hash");
    let user_id = create_user(db.pool(), "admin@example.com", "Admin", &hash)
        .await
        .expect("create user");

    let stale = generate_session_token();
    let past = (Utc::now() - Duration::hours(2)).to_rfc3339();
    create_session(db.pool(), user_id, &stale, &past)
        .await
        .expect("create session");

    let fresh = generate_session_token();
    let future = (Utc::now() + Duration::hours(2)).to_rfc3339();
    create_session(db.pool(), user_id, &fresh, &future)
        .await
        .expect("create session");

    let now = Utc::now().to_rfc3339();
    let removed = delete_expired_sessions(db.pool(), &now)
        .await
        .expect("cleanup");
    assert_eq!(removed, 1);

    assert!(get_session_by_token(db.pool(), &stale)
        .await
        .expect("query")
        .is_none());
    assert!(get_session_by_token(db.pool(), &fresh)
        .await
        .expect("query")
        .is_some());
}

#[tokio::test]
async fn test_delete_user_sessions_removes_all() {
    let (db, _temp_dir) = setup_test_db().await;

    let hash = hash_password("vishram-ka-samay").expect("hash");
    let user_id = create_user(db.pool(), "admin@example.com", "Admin", &hash)
        .await
        .expect("create user");

    let expires_at = (Utc::now() + Duration::hours(1)).to_rfc3339();
    for _ in 0..3 {
        let token = generate_session_token();
        create_session(db.pool(), user_id, &token, &expires_at)
            .await
            .expect("create session");
    }

    delete_user_sessions(db.pool(), user_id)
        .await
        .expect("delete all");

    let now = Utc::now().to_rfc3339();
    assert_eq!(
        delete_expired_sessions(db.pool(), &now)
            .await
            .expect("cleanup"),
        0
    );
}
