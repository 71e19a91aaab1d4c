//! Seams to the outside world: authentication and initial data.
//!
//! The browser is single-threaded, so futures here are not required to be
//! `Send`.

use crate::error::Result;
use crate::forms::{Credentials, RegistrationForm};
use crate::model::{ChatMessage, Ticket};
use async_trait::async_trait;

#[async_trait(?Send)]
pub trait AuthService {
    /// `Err(ConsoleError::AuthenticationFailure)` for bad credentials, any
    /// other error for transport trouble.
    async fn login(&self, credentials: &Credentials) -> Result<()>;

    /// `Err(ConsoleError::RegistrationRejected)` when the service refuses the
    /// account.
    async fn register(&self, form: &RegistrationForm) -> Result<()>;

    async fn logout(&self) -> Result<()>;

    /// Whether the caller currently holds a live session.
    async fn current_session(&self) -> Result<bool>;
}

#[async_trait(?Send)]
pub trait DataService {
    async fn tickets(&self) -> Result<Vec<Ticket>>;
    async fn messages(&self) -> Result<Vec<ChatMessage>>;
}
