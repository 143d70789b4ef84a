//! Integration tests for web routes.
//!
//! Handlers are re-implemented thinly over the library's query layer so
//! the filter parameter flow can be exercised without a media store.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use prerna::db::{insert_post, ContentType, Database, NewPost};
use prerna::feed::{available_hosts, FilterState, SortMode};
use tempfile::TempDir;
use tower::ServiceExt;

/// Shared application state for tests.
#[derive(Clone)]
struct AppState {
    db: Database,
}

async fn setup_test_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path)
        .await
        .expect("Failed to create database");
    (db, temp_dir)
}

/// Create a test app with the given database.
fn create_test_app(db: Database) -> Router {
    let state = AppState { db };

    Router::new()
        .route("/", axum::routing::get(home))
        .route("/post/:id", axum::routing::get(post_detail))
        .route("/healthz", axum::routing::get(health))
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct FeedParams {
    host: Option<String>,
    #[serde(rename = "type")]
    content_type: Option<String>,
    sort: Option<String>,
}

async fn home(
    axum::extract::State(state): axum::extract::State<AppState>,
    axum::extract::Query(params): axum::extract::Query<FeedParams>,
) -> axum::response::Response {
    use axum::response::IntoResponse;
    use prerna::db::list_posts;

    let mut filter_state = FilterState::new();
    filter_state.set_host_filter(params.host.unwrap_or_default());

    // Closed enum, rejected at the boundary
    if let Some(raw) = params.content_type.as_deref() {
        match ContentType::from_str(raw) {
            Some(ct) => filter_state.set_content_type_filter(Some(ct)),
            None => {
                return (StatusCode::BAD_REQUEST, "Unknown content type").into_response();
            }
        }
    }

    // Unrecognized sort falls back to latest
    filter_state.set_sort_mode(
        params
            .sort
            .as_deref()
            .map_or(SortMode::Latest, SortMode::parse_or_latest),
    );

    let posts = match list_posts(state.db.pool(), &filter_state.to_filter()).await {
        Ok(p) => p,
        Err(_) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };

    let hosts = available_hosts(&posts);
    let titles: Vec<&str> = posts
        .iter()
        .filter_map(|p| p.title.as_deref())
        .collect();

    let html = format!(
        r#"<!DOCTYPE html><html><body><h1>Feed</h1><p>{} posts, {} hosts</p><p>{}</p></body></html>"#,
        posts.len(),
        hosts.len(),
        titles.join("|")
    );
    axum::response::Html(html).into_response()
}

async fn post_detail(
    axum::extract::State(state): axum::extract::State<AppState>,
    axum::extract::Path(id): axum::extract::Path<i64>,
) -> axum::response::Response {
    use axum::response::IntoResponse;
    use prerna::db::get_post;

    match get_post(state.db.pool(), id).await {
        Ok(Some(post)) => axum::response::Html(format!(
            r#"<!DOCTYPE html><html><body><h1>{}</h1><p>by {}</p></body></html>"#,
            post.title.as_deref().unwrap_or("Post"),
            post.author_name
        ))
        .into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Post not found").into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn seed(db: &Database) {
    for (author, title, content_type) in [
        ("Anita", "Anita video one", ContentType::Video),
        ("Anita", "Anita video two", ContentType::Video),
        ("Anita", "Anita thought", ContentType::Text),
        ("Ravi", "Ravi video", ContentType::Video),
    ] {
        insert_post(
            db.pool(),
            &NewPost {
                title: Some(title.to_string()),
                body: None,
                content_type,
                media_url: None,
                media_caption: None,
                author_name: author.to_string(),
            },
        )
        .await
        .expect("seed post");
    }
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

#[tokio::test]
async fn test_home_empty_feed() {
    let (db, _temp_dir) = setup_test_db().await;
    let app = create_test_app(db);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("0 posts, 0 hosts"));
}

#[tokio::test]
async fn test_home_filters_by_host_and_type() {
    let (db, _temp_dir) = setup_test_db().await;
    seed(&db).await;
    let app = create_test_app(db);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/?host=Anita&type=video")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("2 posts, 1 hosts"));
    assert!(body.contains("Anita video one"));
    assert!(!body.contains("Ravi video"));

    // Unfiltered feed sees every host
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("4 posts, 2 hosts"));
}

#[tokio::test]
async fn test_unknown_content_type_is_rejected() {
    let (db, _temp_dir) = setup_test_db().await;
    seed(&db).await;
    let app = create_test_app(db);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?type=gallery")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_sort_falls_back_to_latest() {
    let (db, _temp_dir) = setup_test_db().await;
    seed(&db).await;
    let app = create_test_app(db);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?sort=newest")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("4 posts"));
}

#[tokio::test]
async fn test_post_detail_not_found() {
    let (db, _temp_dir) = setup_test_db().await;
    let app = create_test_app(db);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/post/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_detail_found() {
    let (db, _temp_dir) = setup_test_db().await;
    seed(&db).await;
    let app = create_test_app(db);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/post/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("by Anita"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let (db, _temp_dir) = setup_test_db().await;
    let app = create_test_app(db);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert_eq!(body, "OK");
}
