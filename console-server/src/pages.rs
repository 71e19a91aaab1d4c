//! Server-rendered page shells. Their body classes and container ids are what
//! the front end reads at start-up to decide which view it is on.

use crate::api::{has_live_session, ApiState};
use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use console_core::bootstrap::{
    CONFIG_ELEMENT_ID, DASHBOARD_CONTAINER_ID, LOGIN_BODY_CLASS, REGISTER_BODY_CLASS,
};
use console_core::config::ConsoleConfig;

pub fn page_router(state: ApiState) -> Router {
    let routes = state.console.routes.clone();
    let dashboard = routes.dashboard.clone();
    Router::new()
        .route(
            "/",
            get(move || {
                let dashboard = dashboard.clone();
                async move { Redirect::to(&dashboard) }
            }),
        )
        .route(&routes.login, get(login_page))
        .route(&routes.register, get(register_page))
        .route(&routes.dashboard, get(dashboard_page))
        .with_state(state)
}

/// JSON for the config element. `</` is escaped so the payload cannot close
/// its script tag.
fn config_blob(config: &ConsoleConfig) -> String {
    match config.to_json() {
        Ok(json) => json.replace("</", "<\\/"),
        Err(err) => {
            tracing::error!(%err, "front-end config not serializable, shipping defaults");
            "{}".into()
        }
    }
}

fn shell(title: &str, body_class: &str, dashboard: bool, config: &ConsoleConfig) -> Html<String> {
    let marker = if dashboard {
        format!(r#"<div id="{DASHBOARD_CONTAINER_ID}" hidden></div>"#)
    } else {
        String::new()
    };
    let config = config_blob(config);
    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} · Helpdesk</title>
  <link rel="stylesheet" href="/pkg/console.css">
</head>
<body class="{body_class}">
  {marker}
  <script id="{CONFIG_ELEMENT_ID}" type="application/json">{config}</script>
  <script type="module">import init from "/pkg/console_ui.js"; init();</script>
</body>
</html>
"#
    ))
}

async fn login_page(State(state): State<ApiState>) -> Html<String> {
    shell("Sign in", LOGIN_BODY_CLASS, false, &state.console)
}

async fn register_page(State(state): State<ApiState>) -> Html<String> {
    shell("Register", REGISTER_BODY_CLASS, false, &state.console)
}

async fn dashboard_page(State(state): State<ApiState>, headers: HeaderMap) -> Response {
    if !has_live_session(&state, &headers) {
        return Redirect::to(&state.console.routes.login).into_response();
    }
    shell("Dashboard", "app-shell-body", true, &state.console).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountStore;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> ApiState {
        with_config(ConsoleConfig::default())
    }

    fn with_config(console: ConsoleConfig) -> ApiState {
        ApiState {
            accounts: Arc::new(AccountStore::with_demo_user("user", "pass")),
            console: Arc::new(console),
        }
    }

    fn embedded_config(html: &str) -> ConsoleConfig {
        let open = format!(r#"<script id="{CONFIG_ELEMENT_ID}" type="application/json">"#);
        let start = html.find(&open).expect("config element") + open.len();
        let len = html[start..].find("</script>").expect("closing tag");
        ConsoleConfig::from_json(&html[start..start + len]).expect("config json")
    }

    async fn text(response: Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        String::from_utf8(bytes.to_vec()).expect("utf8")
    }

    #[tokio::test]
    async fn login_shell_carries_body_marker() {
        let response = page_router(state())
            .oneshot(Request::builder().uri("/login/").body(Body::empty()).expect("request"))
            .await
            .expect("login page");
        assert_eq!(response.status(), StatusCode::OK);
        let html = text(response).await;
        assert!(html.contains(r#"<body class="login-page-body">"#));
        assert!(!html.contains("dashboard-page"));
    }

    #[tokio::test]
    async fn shells_embed_the_front_end_config() {
        let mut console = ConsoleConfig {
            sidebar_breakpoint: 1024,
            invalid_credentials_message: "Nope </script><b>".into(),
            ..ConsoleConfig::default()
        };
        console.routes.login = "/signin/".into();

        let response = page_router(with_config(console.clone()))
            .oneshot(Request::builder().uri("/signin/").body(Body::empty()).expect("request"))
            .await
            .expect("login page");
        assert_eq!(response.status(), StatusCode::OK);
        let html = text(response).await;
        assert!(!html.contains("Nope </script>"));
        assert_eq!(embedded_config(&html), console);
    }

    #[tokio::test]
    async fn redirects_follow_configured_routes() {
        let mut console = ConsoleConfig::default();
        console.routes.login = "/signin/".into();
        let response = page_router(with_config(console))
            .oneshot(Request::builder().uri("/dashboard/").body(Body::empty()).expect("request"))
            .await
            .expect("dashboard");
        assert_eq!(
            response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some("/signin/")
        );
    }

    #[tokio::test]
    async fn dashboard_without_session_redirects_to_login() {
        let response = page_router(state())
            .oneshot(Request::builder().uri("/dashboard/").body(Body::empty()).expect("request"))
            .await
            .expect("dashboard");
        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some("/login/")
        );
    }

    #[tokio::test]
    async fn dashboard_with_session_renders_container() {
        let state = state();
        let token = state.accounts.open_session("user");
        let response = page_router(state)
            .oneshot(
                Request::builder()
                    .uri("/dashboard/")
                    .header(header::COOKIE, format!("console_session={token}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("dashboard");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(text(response).await.contains(r#"<div id="dashboard-page" hidden></div>"#));
    }
}
