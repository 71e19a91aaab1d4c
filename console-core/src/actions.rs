//! Login, register, logout and send-message handlers.
//!
//! None of these return an error: every failure ends up as a state change or
//! a message in the modal. State is only touched between awaits, so other
//! events (resize, sidebar clicks) keep flowing while a call is pending.

use crate::config::{Navigation, Notice, Route};
use crate::console::{PendingAction, StateCell};
use crate::error::ConsoleError;
use crate::forms::{describe_field_errors, validate_registration, Credentials, RegistrationForm};
use crate::service::AuthService;
use chrono::NaiveTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Navigate(Navigation),
    Notified,
    Updated,
    Ignored,
}

pub async fn login<S, A>(state: &S, auth: &A, credentials: &Credentials) -> ActionOutcome
where
    S: StateCell,
    A: AuthService + ?Sized,
{
    if state.with_mut(|c| c.begin(PendingAction::Login)).is_err() {
        return ActionOutcome::Ignored;
    }

    let result = auth.login(credentials).await;

    state.with_mut(|console| {
        console.finish();
        match result {
            Ok(()) => {
                tracing::info!(username = %credentials.username, "login succeeded");
                console.session_mut().set_authenticated(true);
                ActionOutcome::Navigate(Navigation::to(Route::Dashboard))
            }
            Err(err) => {
                tracing::warn!(username = %credentials.username, %err, "login failed");
                let message = match err {
                    ConsoleError::AuthenticationFailure => {
                        console.config().invalid_credentials_message.clone()
                    }
                    other => format!("Could not sign in: {other}"),
                };
                console.modal_mut().show_message("Login Failed", message);
                ActionOutcome::Notified
            }
        }
    })
}

pub async fn register<S, A>(state: &S, auth: &A, form: &RegistrationForm) -> ActionOutcome
where
    S: StateCell,
    A: AuthService + ?Sized,
{
    if let Err(err) = validate_registration(form) {
        let message = match &err {
            ConsoleError::InvalidForm(errors) => describe_field_errors(errors),
            other => other.to_string(),
        };
        tracing::debug!(%err, "registration form rejected locally");
        state.with_mut(|c| c.modal_mut().show_message("Registration Failed", message));
        return ActionOutcome::Notified;
    }

    if state.with_mut(|c| c.begin(PendingAction::Register)).is_err() {
        return ActionOutcome::Ignored;
    }

    let result = auth.register(form).await;

    state.with_mut(|console| {
        console.finish();
        match result {
            Ok(()) => {
                tracing::info!(username = %form.username, "registration accepted");
                ActionOutcome::Navigate(Navigation::with_notice(Route::Login, Notice::Registered))
            }
            Err(err) => {
                tracing::warn!(username = %form.username, %err, "registration failed");
                let message = match err {
                    ConsoleError::RegistrationRejected(reason) => reason,
                    other => format!("Could not register: {other}"),
                };
                console.modal_mut().show_message("Registration Failed", message);
                ActionOutcome::Notified
            }
        }
    })
}

/// Ends the session. A failed call to the service still signs the page out
/// locally.
pub async fn logout<S, A>(state: &S, auth: &A) -> ActionOutcome
where
    S: StateCell,
    A: AuthService + ?Sized,
{
    if state.with_mut(|c| c.begin(PendingAction::Logout)).is_err() {
        return ActionOutcome::Ignored;
    }

    let result = auth.logout().await;

    state.with_mut(|console| {
        console.finish();
        if let Err(err) = result {
            tracing::warn!(%err, "logout call failed, signing out locally");
        }
        console.session_mut().set_authenticated(false);
        ActionOutcome::Navigate(Navigation::with_notice(Route::Login, Notice::LoggedOut))
    })
}

pub fn send_message<S: StateCell>(state: &S, text: &str, at: NaiveTime) -> ActionOutcome {
    match state.with_mut(|c| c.send_message(text, at)) {
        Some(_) => ActionOutcome::Updated,
        None => ActionOutcome::Ignored,
    }
}
