//! Deployment environment, which picks the optional `{environment}.toml`
//! layer between `default.toml` and `local.toml`.
//!
//! A typical split keeps vendor ids in `default.toml`, a test bot token in
//! `test.toml` and the real chat list in `production.toml`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local runs; the default when `SEATWATCH_APP_ENV` is unset
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub const ENV_VAR: &'static str = "SEATWATCH_APP_ENV";

    const ALL: [Environment; 3] = [
        Environment::Development,
        Environment::Test,
        Environment::Production,
    ];

    /// Environment named by `SEATWATCH_APP_ENV`.
    ///
    /// An unknown value is logged and treated as development so a typo never
    /// keeps the watcher from starting.
    pub fn from_env() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(value) => value.parse().unwrap_or_else(|e: ConfigError| {
                tracing::warn!(error = %e, "Falling back to development layer");
                Environment::Development
            }),
            Err(_) => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }

    /// File name of the layer this environment adds
    pub fn layer_file(&self) -> String {
        format!("{}.toml", self.as_str())
    }

    fn short_name(&self) -> Option<&'static str> {
        match self {
            Environment::Development => Some("dev"),
            Environment::Production => Some("prod"),
            Environment::Test => None,
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == wanted || env.short_name() == Some(wanted.as_str()))
            .ok_or_else(|| ConfigError::UnknownEnvironment(s.to_string()))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_names_and_case() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!(" Prod ".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("TEST".parse::<Environment>().unwrap(), Environment::Test);
    }

    #[test]
    fn test_unknown_environment_keeps_the_input() {
        match "staging".parse::<Environment>() {
            Err(ConfigError::UnknownEnvironment(value)) => assert_eq!(value, "staging"),
            other => panic!("Expected unknown environment, got {other:?}"),
        }
    }

    #[test]
    fn test_layer_file_names() {
        assert_eq!(Environment::default().layer_file(), "development.toml");
        assert_eq!(Environment::Production.layer_file(), "production.toml");
        assert_eq!(Environment::Test.to_string(), "test");
    }
}
