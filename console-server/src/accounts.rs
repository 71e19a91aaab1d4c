use console_core::error::ConsoleError;
use console_core::forms::{describe_field_errors, validate_registration, Credentials, RegistrationForm};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Clone, Debug)]
struct Account {
    password: String,
    email: String,
}

/// In-memory accounts and live sessions for the life of the process.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: Mutex<HashMap<String, Account>>,
    sessions: Mutex<HashMap<String, String>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl AccountStore {
    pub fn with_demo_user(username: &str, password: &str) -> Self {
        let store = Self::default();
        lock(&store.accounts).insert(
            username.to_string(),
            Account {
                password: password.to_string(),
                email: String::new(),
            },
        );
        store
    }

    pub fn verify(&self, credentials: &Credentials) -> bool {
        lock(&self.accounts)
            .get(credentials.username.trim())
            .is_some_and(|account| account.password == credentials.password)
    }

    pub fn register(&self, form: &RegistrationForm) -> Result<(), String> {
        validate_registration(form).map_err(|err| match err {
            ConsoleError::InvalidForm(errors) => describe_field_errors(&errors),
            other => other.to_string(),
        })?;

        let mut accounts = lock(&self.accounts);
        let username = form.username.trim();
        if accounts.contains_key(username) {
            return Err("A user with that username already exists.".into());
        }
        let email = form.email.trim();
        if accounts.values().any(|a| a.email.eq_ignore_ascii_case(email)) {
            return Err("An account with that email already exists.".into());
        }
        accounts.insert(
            username.to_string(),
            Account {
                password: form.password.clone(),
                email: email.to_string(),
            },
        );
        Ok(())
    }

    pub fn open_session(&self, username: &str) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        lock(&self.sessions).insert(token.clone(), username.to_string());
        token
    }

    pub fn session_user(&self, token: &str) -> Option<String> {
        lock(&self.sessions).get(token).cloned()
    }

    pub fn close_session(&self, token: &str) -> bool {
        lock(&self.sessions).remove(token).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, email: &str) -> RegistrationForm {
        RegistrationForm {
            username: username.into(),
            email: email.into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            password: "engine".into(),
            password_confirm: "engine".into(),
        }
    }

    #[test]
    fn demo_user_verifies() {
        let store = AccountStore::with_demo_user("user", "pass");
        assert!(store.verify(&Credentials::new("user", "pass")));
        assert!(!store.verify(&Credentials::new("user", "wrong")));
        assert!(!store.verify(&Credentials::new("nobody", "pass")));
    }

    #[test]
    fn registered_user_can_sign_in() {
        let store = AccountStore::with_demo_user("user", "pass");
        store.register(&form("ada", "ada@example.com")).expect("register");
        assert!(store.verify(&Credentials::new("ada", "engine")));
    }

    #[test]
    fn username_whitespace_is_ignored_at_sign_in() {
        let store = AccountStore::default();
        store.register(&form("ada ", "ada@example.com")).expect("register");
        assert!(store.verify(&Credentials::new("ada ", "engine")));
        assert!(store.verify(&Credentials::new("  ada", "engine")));
        assert!(!store.verify(&Credentials::new("ada ", "engine ")));
    }

    #[test]
    fn duplicates_are_rejected() {
        let store = AccountStore::with_demo_user("user", "pass");
        store.register(&form("ada", "ada@example.com")).expect("register");
        let err = store.register(&form("ada", "other@example.com")).expect_err("dup user");
        assert!(err.contains("username already exists"));
        let err = store.register(&form("ada2", "ADA@example.com")).expect_err("dup email");
        assert!(err.contains("email already exists"));
    }

    #[test]
    fn sessions_open_and_close() {
        let store = AccountStore::default();
        let token = store.open_session("user");
        assert_eq!(store.session_user(&token).as_deref(), Some("user"));
        assert!(store.close_session(&token));
        assert!(store.session_user(&token).is_none());
        assert!(!store.close_session(&token));
    }
}
