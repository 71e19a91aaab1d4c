pub mod accounts;
pub mod api;
pub mod config;
pub mod pages;

use crate::accounts::AccountStore;
use crate::api::ApiState;
use crate::config::ServerConfig;
use axum::Router;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn build_state(config: &ServerConfig) -> ApiState {
    ApiState {
        accounts: Arc::new(AccountStore::with_demo_user(
            &config.demo_user,
            &config.demo_password,
        )),
        console: Arc::new(config.console.clone()),
    }
}

pub fn app(config: &ServerConfig) -> Router {
    let state = build_state(config);
    Router::new()
        .merge(api::api_router(state.clone()))
        .merge(pages::page_router(state))
        .nest_service("/pkg", ServeDir::new(&config.asset_dir))
        .layer(TraceLayer::new_for_http())
}
