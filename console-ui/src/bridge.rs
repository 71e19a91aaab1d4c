//! Typed fetch wrappers over the console server's JSON API.

use console_core::dto::{ApiReply, SessionReply};
use console_core::error::{ConsoleError, Result};
use console_core::forms::{Credentials, RegistrationForm};
use console_core::model::{ChatMessage, Ticket};
use console_core::service::{AuthService, DataService};
use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, Response};

async fn with_timeout<T>(fut: impl Future<Output = Result<T>>, ms: u32) -> Result<T> {
    match select(Box::pin(fut), Box::pin(TimeoutFuture::new(ms))).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(ConsoleError::Service(format!("timed out after {ms}ms"))),
    }
}

async fn send(method: &str, path: &str, body: Option<String>) -> std::result::Result<(u16, JsValue), String> {
    let window = web_sys::window().ok_or_else(|| "window not available".to_string())?;

    let init = RequestInit::new();
    init.set_method(method);
    init.set_credentials(RequestCredentials::SameOrigin);
    if let Some(body) = body {
        init.set_body(&JsValue::from_str(&body));
    }

    let request = Request::new_with_str_and_init(path, &init)
        .map_err(|e| format!("request build failed: {e:?}"))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| format!("header rejected: {e:?}"))?;

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("fetch rejected: {e:?}"))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| "fetch did not return a Response".to_string())?;
    let status = response.status();

    let json = response
        .json()
        .map_err(|e| format!("body unreadable: {e:?}"))?;
    let value = JsFuture::from(json)
        .await
        .map_err(|e| format!("body is not JSON: {e:?}"))?;
    Ok((status, value))
}

fn decode<R: DeserializeOwned>(value: JsValue) -> std::result::Result<R, String> {
    serde_wasm_bindgen::from_value(value).map_err(|e| e.to_string())
}

fn encode<A: Serialize>(args: &A) -> std::result::Result<String, String> {
    serde_json::to_string(args).map_err(|e| e.to_string())
}

/// Sends the request and returns the status with the `ApiReply` body.
async fn call(method: &str, path: &str, body: Option<String>, timeout_ms: u32) -> Result<(u16, ApiReply)> {
    with_timeout(
        async {
            let (status, value) = send(method, path, body).await?;
            Ok::<_, ConsoleError>((status, decode(value)?))
        },
        timeout_ms,
    )
    .await
}

async fn fetch<R: DeserializeOwned>(path: &str, timeout_ms: u32) -> Result<R> {
    with_timeout(
        async {
            let (status, value) = send("GET", path, None).await?;
            if !(200..300).contains(&status) {
                let reply: ApiReply = decode(value).unwrap_or_default();
                return Err(ConsoleError::Service(
                    reply.error.unwrap_or_else(|| format!("HTTP {status}")),
                ));
            }
            Ok::<R, ConsoleError>(decode(value)?)
        },
        timeout_ms,
    )
    .await
}

fn failure(status: u16, reply: ApiReply) -> ConsoleError {
    ConsoleError::Service(reply.error.unwrap_or_else(|| format!("HTTP {status}")))
}

#[derive(Clone, Copy, Debug)]
pub struct HttpAuth {
    timeout_ms: u32,
}

impl HttpAuth {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

#[async_trait(?Send)]
impl AuthService for HttpAuth {
    async fn login(&self, credentials: &Credentials) -> Result<()> {
        let (status, reply) = call("POST", "/api/login", Some(encode(credentials)?), self.timeout_ms).await?;
        match status {
            200..=299 => Ok(()),
            401 => Err(ConsoleError::AuthenticationFailure),
            _ => Err(failure(status, reply)),
        }
    }

    async fn register(&self, form: &RegistrationForm) -> Result<()> {
        let (status, reply) = call("POST", "/api/register", Some(encode(form)?), self.timeout_ms).await?;
        match status {
            200..=299 => Ok(()),
            409 | 422 => Err(ConsoleError::RegistrationRejected(
                reply.error.unwrap_or_else(|| "Registration was refused.".into()),
            )),
            _ => Err(failure(status, reply)),
        }
    }

    async fn logout(&self) -> Result<()> {
        let (status, reply) = call("POST", "/api/logout", None, self.timeout_ms).await?;
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(failure(status, reply))
        }
    }

    async fn current_session(&self) -> Result<bool> {
        let reply: SessionReply = fetch("/api/session", self.timeout_ms).await?;
        Ok(reply.authenticated)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct HttpData {
    timeout_ms: u32,
}

impl HttpData {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

#[async_trait(?Send)]
impl DataService for HttpData {
    async fn tickets(&self) -> Result<Vec<Ticket>> {
        fetch("/api/tickets", self.timeout_ms).await
    }

    async fn messages(&self) -> Result<Vec<ChatMessage>> {
        fetch("/api/messages", self.timeout_ms).await
    }
}
