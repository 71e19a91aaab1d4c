use crate::accounts::AccountStore;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use console_core::config::ConsoleConfig;
use console_core::dto::{ApiReply, SessionReply};
use console_core::forms::{Credentials, RegistrationForm};
use console_core::sample;
use console_core::store::CollectionStore;
use std::sync::Arc;

pub const SESSION_COOKIE: &str = "console_session";

#[derive(Clone)]
pub struct ApiState {
    pub accounts: Arc<AccountStore>,
    pub console: Arc<ConsoleConfig>,
}

pub fn api_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/login", post(handle_login))
        .route("/api/register", post(handle_register))
        .route("/api/logout", post(handle_logout))
        .route("/api/session", get(handle_session))
        .route("/api/tickets", get(handle_tickets))
        .route("/api/messages", get(handle_messages))
        .with_state(state)
}

pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

pub fn has_live_session(state: &ApiState, headers: &HeaderMap) -> bool {
    session_token(headers).is_some_and(|token| state.accounts.session_user(&token).is_some())
}

fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

fn expired_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

async fn handle_login(State(state): State<ApiState>, Json(credentials): Json<Credentials>) -> Response {
    if !state.accounts.verify(&credentials) {
        tracing::warn!(username = %credentials.username, "rejected login");
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiReply::error("invalid username or password")),
        )
            .into_response();
    }

    let token = state.accounts.open_session(credentials.username.trim());
    tracing::info!(username = %credentials.username, "session opened");
    (
        [(header::SET_COOKIE, session_cookie(&token))],
        Json(ApiReply::ok()),
    )
        .into_response()
}

async fn handle_register(State(state): State<ApiState>, Json(form): Json<RegistrationForm>) -> Response {
    match state.accounts.register(&form) {
        Ok(()) => {
            tracing::info!(username = %form.username, "account registered");
            Json(ApiReply::ok()).into_response()
        }
        Err(reason) => {
            tracing::warn!(username = %form.username, %reason, "registration refused");
            (StatusCode::UNPROCESSABLE_ENTITY, Json(ApiReply::error(reason))).into_response()
        }
    }
}

async fn handle_logout(State(state): State<ApiState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        if state.accounts.close_session(&token) {
            tracing::info!("session closed");
        }
    }
    (
        [(header::SET_COOKIE, expired_cookie())],
        Json(ApiReply::ok()),
    )
        .into_response()
}

async fn handle_session(State(state): State<ApiState>, headers: HeaderMap) -> Json<SessionReply> {
    Json(SessionReply {
        authenticated: has_live_session(&state, &headers),
    })
}

async fn handle_tickets(State(state): State<ApiState>, headers: HeaderMap) -> Response {
    if !has_live_session(&state, &headers) {
        return unauthorized();
    }
    let store = CollectionStore::from_records("tickets", sample::tickets());
    Json(store.snapshot().to_vec()).into_response()
}

async fn handle_messages(State(state): State<ApiState>, headers: HeaderMap) -> Response {
    if !has_live_session(&state, &headers) {
        return unauthorized();
    }
    let store = CollectionStore::from_records("chat", sample::messages());
    Json(store.snapshot().to_vec()).into_response()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiReply::error("not signed in")),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn router() -> Router {
        api_router(ApiState {
            accounts: Arc::new(AccountStore::with_demo_user("user", "pass")),
            console: Arc::default(),
        })
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get_with_cookie(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).expect("request")
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("json")
    }

    fn cookie_pair(response: &Response) -> String {
        let raw = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .expect("set-cookie");
        raw.split(';').next().unwrap_or_default().to_string()
    }

    async fn sign_in(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/login",
                serde_json::json!({"username": "user", "password": "pass"}),
            ))
            .await
            .expect("login");
        assert_eq!(response.status(), StatusCode::OK);
        cookie_pair(&response)
    }

    #[tokio::test]
    async fn login_with_demo_credentials_sets_session_cookie() {
        let app = router();
        let cookie = sign_in(&app).await;
        assert!(cookie.starts_with("console_session="));

        let response = app
            .oneshot(get_with_cookie("/api/session", Some(&cookie)))
            .await
            .expect("session");
        assert_eq!(json_body(response).await, serde_json::json!({"authenticated": true}));
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let response = router()
            .oneshot(post_json(
                "/api/login",
                serde_json::json!({"username": "user", "password": "wrong"}),
            ))
            .await
            .expect("login");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let body = json_body(response).await;
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn logout_ends_session() {
        let app = router();
        let cookie = sign_in(&app).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/logout")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("logout");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(cookie_pair(&response).ends_with('='));

        let response = app
            .oneshot(get_with_cookie("/api/session", Some(&cookie)))
            .await
            .expect("session");
        assert_eq!(json_body(response).await["authenticated"], false);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_username() {
        let response = router()
            .oneshot(post_json(
                "/api/register",
                serde_json::json!({
                    "username": "user",
                    "email": "user@example.com",
                    "first_name": "Demo",
                    "last_name": "User",
                    "password": "pw",
                    "password_confirm": "pw"
                }),
            ))
            .await
            .expect("register");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["error"], "A user with that username already exists.");
    }

    #[tokio::test]
    async fn data_requires_a_session() {
        let app = router();
        let response = app
            .clone()
            .oneshot(get_with_cookie("/api/tickets", None))
            .await
            .expect("tickets");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let cookie = sign_in(&app).await;
        let response = app
            .clone()
            .oneshot(get_with_cookie("/api/tickets", Some(&cookie)))
            .await
            .expect("tickets");
        assert_eq!(response.status(), StatusCode::OK);
        let tickets = json_body(response).await;
        let tickets = tickets.as_array().expect("array");
        assert_eq!(tickets.len(), 5);
        assert_eq!(tickets[0]["id"], 1);
        assert_eq!(tickets[1]["status"], "In Progress");

        let response = app
            .oneshot(get_with_cookie("/api/messages", Some(&cookie)))
            .await
            .expect("messages");
        let messages = json_body(response).await;
        assert_eq!(messages[2]["sender"], "Support");
    }

    #[test]
    fn session_token_reads_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; console_session=abc-123; lang=en".parse().expect("header"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc-123"));

        let mut empty = HeaderMap::new();
        empty.insert(header::COOKIE, "console_session=".parse().expect("header"));
        assert!(session_token(&empty).is_none());
    }
}
