use console_core::config::ConsoleConfig;
use console_core::error::Result;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub demo_user: String,
    pub demo_password: String,
    /// Directory holding the compiled front-end bundle, served under `/pkg`.
    pub asset_dir: PathBuf,
    /// Handed to the front end in every page shell.
    pub console: ConsoleConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".into(),
            demo_user: "user".into(),
            demo_password: "pass".into(),
            asset_dir: PathBuf::from("pkg"),
            console: ConsoleConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `CONSOLE_UI_CONFIG` is a JSON override for the front-end config; keys
    /// it leaves out keep their defaults.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let console = match lookup("CONSOLE_UI_CONFIG") {
            Some(raw) => ConsoleConfig::from_json(&raw)?,
            None => defaults.console,
        };
        console.validate()?;
        Ok(Self {
            bind_addr: lookup("CONSOLE_BIND_ADDR").unwrap_or(defaults.bind_addr),
            demo_user: lookup("CONSOLE_DEMO_USER").unwrap_or(defaults.demo_user),
            demo_password: lookup("CONSOLE_DEMO_PASSWORD").unwrap_or(defaults.demo_password),
            asset_dir: lookup("CONSOLE_ASSET_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.asset_dir),
            console,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_core::error::ConsoleError;
    use std::collections::HashMap;

    #[test]
    fn unset_vars_fall_back_to_defaults() {
        assert_eq!(
            ServerConfig::from_lookup(|_| None).expect("config"),
            ServerConfig::default()
        );
    }

    #[test]
    fn vars_override_defaults() {
        let env: HashMap<&str, &str> = [
            ("CONSOLE_BIND_ADDR", "127.0.0.1:9000"),
            ("CONSOLE_DEMO_PASSWORD", "hunter2"),
        ]
        .into_iter()
        .collect();
        let config =
            ServerConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).expect("config");
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.demo_user, "user");
        assert_eq!(config.demo_password, "hunter2");
    }

    #[test]
    fn ui_config_override_is_parsed() {
        let config = ServerConfig::from_lookup(|k| {
            (k == "CONSOLE_UI_CONFIG").then(|| r#"{"sidebar_breakpoint": 1024}"#.to_string())
        })
        .expect("config");
        assert_eq!(config.console.sidebar_breakpoint, 1024);
        assert_eq!(config.console.routes.login, "/login/");
    }

    #[test]
    fn bad_ui_config_is_a_config_error() {
        let malformed = ServerConfig::from_lookup(|k| {
            (k == "CONSOLE_UI_CONFIG").then(|| "{oops".to_string())
        });
        assert!(matches!(malformed, Err(ConsoleError::Config(_))));

        let relative = ServerConfig::from_lookup(|k| {
            (k == "CONSOLE_UI_CONFIG").then(|| r#"{"routes": {"login": "login"}}"#.to_string())
        });
        assert!(matches!(relative, Err(ConsoleError::Config(_))));
    }
}
