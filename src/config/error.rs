//! Errors raised while assembling `Settings`.
//!
//! All of them are startup errors: the watcher never polls with a
//! configuration it could not fully load.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// `--config` or `SEATWATCH_CONFIG_FILE` names a file that is not there
    #[error("no configuration file at {}", path.display())]
    MissingFile { path: PathBuf },

    /// Merged layers do not fit the settings schema
    #[error("configuration does not match the expected schema: {0}")]
    Schema(String),

    /// A loaded value the watcher cannot act on
    #[error("invalid {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error(
        "unknown SEATWATCH_APP_ENV value '{0}' (expected development, test or production)"
    )]
    UnknownEnvironment(String),

    /// Layered directory and single-file mode were both requested
    #[error(
        "SEATWATCH_CONFIG_DIR and SEATWATCH_CONFIG_FILE are both set; \
         use the directory for layered loading or the file for a single source"
    )]
    ConflictingLocation,

    #[error("configuration path is not valid UTF-8: {}", path.display())]
    NonUtf8Path { path: PathBuf },

    /// A TOML layer or environment variable could not be read
    #[error("failed to read configuration layers: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Settings key the error is about, used as `AppError::Configuration` key
    pub fn key(&self) -> &str {
        match self {
            ConfigError::ValidationError { field, .. } => field,
            ConfigError::MissingFile { .. } | ConfigError::NonUtf8Path { .. } => "config_file",
            ConfigError::ConflictingLocation => "config_location",
            ConfigError::UnknownEnvironment(_) => "environment",
            ConfigError::Schema(_) | ConfigError::Source(_) => "settings",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_the_offending_setting() {
        let err = ConfigError::validation("telegram.chat_ids", "at least one chat id is required");
        assert_eq!(err.key(), "telegram.chat_ids");
        assert_eq!(
            err.to_string(),
            "invalid telegram.chat_ids: at least one chat id is required"
        );

        let missing = ConfigError::MissingFile {
            path: PathBuf::from("/etc/seatwatch.toml"),
        };
        assert_eq!(missing.key(), "config_file");
        assert_eq!(
            missing.to_string(),
            "no configuration file at /etc/seatwatch.toml"
        );

        assert_eq!(ConfigError::ConflictingLocation.key(), "config_location");
        assert_eq!(
            ConfigError::UnknownEnvironment("staging".into()).key(),
            "environment"
        );
    }
}
