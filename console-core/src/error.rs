use crate::forms::FieldError;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConsoleError {
    #[error("invalid username or password")]
    AuthenticationFailure,
    #[error("registration rejected: {0}")]
    RegistrationRejected(String),
    #[error("service call failed: {0}")]
    Service(String),
    #[error("page already bootstrapped")]
    AlreadyBootstrapped,
    #[error("another request is still pending")]
    Busy,
    #[error("form has {} invalid field(s)", .0.len())]
    InvalidForm(Vec<FieldError>),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Bridge and transport layers report failures as plain strings.
impl From<String> for ConsoleError {
    fn from(value: String) -> Self {
        Self::Service(value)
    }
}
