use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};

const MAX_NAME_LEN: usize = 30;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Checks a registration form before it is sent anywhere. Every problem is
/// reported, not just the first one.
pub fn validate_registration(form: &RegistrationForm) -> Result<()> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("username", &form.username),
        ("email", &form.email),
        ("first_name", &form.first_name),
        ("last_name", &form.last_name),
        ("password", &form.password),
        ("password_confirm", &form.password_confirm),
    ] {
        if value.trim().is_empty() {
            errors.push(FieldError::new(field, "This field is required."));
        }
    }

    for (field, value) in [("first_name", &form.first_name), ("last_name", &form.last_name)] {
        if value.trim().chars().count() > MAX_NAME_LEN {
            errors.push(FieldError::new(
                field,
                format!("Must be at most {MAX_NAME_LEN} characters."),
            ));
        }
    }

    let email = form.email.trim();
    if !email.is_empty() && !is_plausible_email(email) {
        errors.push(FieldError::new("email", "Enter a valid email address."));
    }

    if !form.password.is_empty() && form.password != form.password_confirm {
        errors.push(FieldError::new("password_confirm", "The two passwords do not match."));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConsoleError::InvalidForm(errors))
    }
}

fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        _ => false,
    }
}

/// One line per field error, suitable for a notification body.
pub fn describe_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field.replace('_', " "), e.message))
        .collect::<Vec<_>>()
        .join("\n")
}
