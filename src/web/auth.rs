use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::auth::{
    generate_session_token, hash_password, validate_password_strength, verify_password, MaybeUser,
    SessionDuration,
};
use crate::db as queries;
use crate::web::{pages, AppState};

/// Login/registration form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    action: String,
    email: Option<String>,
    password: Option<String>,
    display_name: Option<String>,
    #[serde(default)]
    remember: bool,
}

/// GET /login - Show login form.
pub async fn login_page(MaybeUser(user): MaybeUser) -> Response {
    // If already signed in, go home
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    Html(pages::render_login_page(None).into_string()).into_response()
}

/// POST /login - Handle login or registration.
pub async fn login_post(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match form.action.as_str() {
        "register" => handle_registration(state, form).await,
        "login" | "" => handle_login(state, form).await,
        _ => (StatusCode::BAD_REQUEST, "Invalid action").into_response(),
    }
}

/// POST /logout - End the current session.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token_from_headers(&headers) {
        if let Err(e) = queries::delete_session(state.db.pool(), &token).await {
            tracing::error!("Failed to delete session: {e}");
        }
    }

    (
        AppendHeaders([(
            header::SET_COOKIE,
            "session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0".to_string(),
        )]),
        Redirect::to("/"),
    )
        .into_response()
}

/// Handle account registration.
///
/// Registration creates an ordinary account; admin capability depends
/// solely on the configured allow-list.
async fn handle_registration(state: AppState, form: LoginForm) -> Response {
    let email = match form.email.as_deref().map(str::trim) {
        Some(e) if !e.is_empty() && e.contains('@') => e.to_string(),
        _ => return login_error("A valid email is required"),
    };

    let display_name = match form.display_name.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => return login_error("Display name is required"),
    };

    let password = form.password.unwrap_or_default();
    if let Err(e) = validate_password_strength(&password) {
        return login_error(&e.to_string());
    }

    match queries::get_user_by_email(state.db.pool(), &email).await {
        Ok(Some(_)) => return login_error("An account with this email already exists"),
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Database error during registration: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Registration failed").into_response();
        }
    }

    let password_hash = match hash_password(&password) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Failed to hash password: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Registration failed").into_response();
        }
    };

    let user_id =
        match queries::create_user(state.db.pool(), &email, &display_name, &password_hash).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!("Failed to create user: {e}");
                return login_error("Registration failed. Please try again.");
            }
        };

    tracing::info!(user_id, "New account registered");

    start_session(&state, user_id, form.remember).await
}

/// Handle login with email and password.
async fn handle_login(state: AppState, form: LoginForm) -> Response {
    let email = match form.email.as_deref().map(str::trim) {
        Some(e) if !e.is_empty() => e.to_string(),
        _ => return login_error("Email is required"),
    };

    let password = match form.password {
        Some(p) if !p.is_empty() => p,
        _ => return login_error("Password is required"),
    };

    let user = match queries::get_user_by_email(state.db.pool(), &email).await {
        Ok(Some(u)) => u,
        Ok(None) => return login_error("Invalid email or password"),
        Err(e) => {
            tracing::error!("Database error during login: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Login failed").into_response();
        }
    };

    let password_valid = match verify_password(&password, &user.password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::error!("Password verification error: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Login failed").into_response();
        }
    };

    if !password_valid {
        return login_error("Invalid email or password");
    }

    start_session(&state, user.id, form.remember).await
}

/// Create a session row and set the session cookie.
async fn start_session(state: &AppState, user_id: i64, remember: bool) -> Response {
    let token = generate_session_token();
    let duration = if remember {
        SessionDuration::Long
    } else {
        SessionDuration::Short
    };
    let expires_at = (Utc::now() + Duration::seconds(duration.as_seconds())).to_rfc3339();

    if let Err(e) = queries::create_session(state.db.pool(), user_id, &token, &expires_at).await {
        tracing::error!("Failed to create session: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Login failed").into_response();
    }

    let cookie = format!(
        "session={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        duration.as_seconds()
    );

    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Redirect::to("/"),
    )
        .into_response()
}

fn login_error(message: &str) -> Response {
    Html(pages::render_login_page(Some(message)).into_string()).into_response()
}

/// Extract the session token from the Cookie header.
fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|cookie| {
                let cookie = cookie.trim();
                cookie.strip_prefix("session=").map(String::from)
            })
        })
}
