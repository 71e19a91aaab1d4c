/// Whether the current page load belongs to a signed-in user.
///
/// Real verification lives in the auth service; this only mirrors its answer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    authenticated: bool,
}

impl SessionState {
    pub fn new(authenticated: bool) -> Self {
        Self { authenticated }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn set_authenticated(&mut self, authenticated: bool) {
        if self.authenticated != authenticated {
            tracing::info!(authenticated, "session state changed");
        }
        self.authenticated = authenticated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_signed_out() {
        assert!(!SessionState::default().is_authenticated());
    }

    #[test]
    fn flag_round_trips() {
        let mut session = SessionState::new(true);
        session.set_authenticated(false);
        assert!(!session.is_authenticated());
        session.set_authenticated(true);
        assert!(session.is_authenticated());
    }
}
