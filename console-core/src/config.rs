use crate::error::{ConsoleError, Result};
use crate::model::Participant;
use crate::sidebar::DEFAULT_BREAKPOINT;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Login,
    Register,
}

/// A one-shot message carried across a full-page redirect in the query
/// string and shown once by the page that receives it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    LoggedOut,
    Registered,
}

impl Notice {
    pub fn key(self) -> &'static str {
        match self {
            Self::LoggedOut => "logged_out",
            Self::Registered => "registered",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::LoggedOut => "Signed Out",
            Self::Registered => "Registration",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::LoggedOut => "You have been logged out successfully.",
            Self::Registered => "Registration complete. You can log in now.",
        }
    }

    /// Reads `notice=...` out of a location search string such as
    /// `?notice=logged_out&next=/`.
    pub fn from_query(query: &str) -> Option<Self> {
        query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "notice")
            .and_then(|(_, value)| match value {
                "logged_out" => Some(Self::LoggedOut),
                "registered" => Some(Self::Registered),
                _ => None,
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    pub notice: Option<Notice>,
}

impl Navigation {
    pub fn to(route: Route) -> Self {
        Self {
            route,
            notice: None,
        }
    }

    pub fn with_notice(route: Route, notice: Notice) -> Self {
        Self {
            route,
            notice: Some(notice),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Routes {
    pub dashboard: String,
    pub login: String,
    pub register: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            dashboard: "/dashboard/".into(),
            login: "/login/".into(),
            register: "/register/".into(),
        }
    }
}

impl Routes {
    pub fn path(&self, route: Route) -> &str {
        match route {
            Route::Dashboard => &self.dashboard,
            Route::Login => &self.login,
            Route::Register => &self.register,
        }
    }

    pub fn href(&self, nav: &Navigation) -> String {
        let path = self.path(nav.route);
        match nav.notice {
            Some(notice) => format!("{path}?notice={}", notice.key()),
            None => path.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub sidebar_breakpoint: u32,
    pub current_user: Participant,
    pub routes: Routes,
    pub invalid_credentials_message: String,
    /// Upper bound for a single call to the auth or data service.
    pub request_timeout_ms: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            sidebar_breakpoint: DEFAULT_BREAKPOINT,
            current_user: Participant::You,
            routes: Routes::default(),
            invalid_credentials_message: "Invalid username or password.".into(),
            request_timeout_ms: 10_000,
        }
    }
}

impl ConsoleConfig {
    /// Parses an override blob. Missing keys keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| ConsoleError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ConsoleError::Config(e.to_string()))
    }

    /// Route paths are mounted as-is by the server next to `/`, so each must
    /// be absolute, not the root, and distinct from the others.
    pub fn validate(&self) -> Result<()> {
        let routes = &self.routes;
        let paths = [&routes.dashboard, &routes.login, &routes.register];
        for (i, path) in paths.iter().enumerate() {
            if !path.starts_with('/') || path.as_str() == "/" {
                return Err(ConsoleError::Config(format!(
                    "route {path:?} must be an absolute path other than '/'"
                )));
            }
            if paths[..i].contains(path) {
                return Err(ConsoleError::Config(format!("route {path:?} is used twice")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let config = ConsoleConfig::from_json(r#"{"sidebar_breakpoint": 1024, "routes": {"login": "/signin/"}}"#)
            .expect("config");
        assert_eq!(config.sidebar_breakpoint, 1024);
        assert_eq!(config.routes.login, "/signin/");
        assert_eq!(config.routes.dashboard, "/dashboard/");
        assert_eq!(config.current_user, Participant::You);
    }

    #[test]
    fn malformed_override_is_config_error() {
        let err = ConsoleConfig::from_json("{not json").expect_err("should fail");
        assert!(matches!(err, ConsoleError::Config(_)));
    }

    #[test]
    fn serialized_config_reads_back() {
        let config = ConsoleConfig {
            sidebar_breakpoint: 900,
            current_user: Participant::Other("agent-7".into()),
            ..ConsoleConfig::default()
        };
        let raw = config.to_json().expect("serialize");
        assert_eq!(ConsoleConfig::from_json(&raw).expect("parse"), config);
    }

    #[test]
    fn unmountable_routes_are_rejected() {
        assert!(ConsoleConfig::default().validate().is_ok());
        let mut config = ConsoleConfig::default();
        config.routes.login = "login/".into();
        assert!(matches!(config.validate(), Err(ConsoleError::Config(_))));
        config.routes.login = "/".into();
        assert!(matches!(config.validate(), Err(ConsoleError::Config(_))));
        config.routes.login = "/dashboard/".into();
        assert!(matches!(config.validate(), Err(ConsoleError::Config(_))));
    }

    #[test]
    fn href_appends_notice() {
        let routes = Routes::default();
        assert_eq!(routes.href(&Navigation::to(Route::Dashboard)), "/dashboard/");
        assert_eq!(
            routes.href(&Navigation::with_notice(Route::Login, Notice::LoggedOut)),
            "/login/?notice=logged_out"
        );
    }

    #[test]
    fn notice_parses_from_query() {
        assert_eq!(Notice::from_query("?notice=registered"), Some(Notice::Registered));
        assert_eq!(Notice::from_query("?next=/&notice=logged_out"), Some(Notice::LoggedOut));
        assert_eq!(Notice::from_query("?notice=bogus"), None);
        assert_eq!(Notice::from_query(""), None);
    }
}
