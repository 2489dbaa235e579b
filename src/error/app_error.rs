use thiserror::Error;

use crate::config::error::ConfigError;

/// Application-wide error type.
///
/// The variants follow the failure boundaries of the watcher:
/// configuration and validation problems are fatal at startup, while
/// `Fetch` and `Notify` are recovered by the poll loop (per vendor and per
/// recipient respectively) and only logged.
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// A ticketing vendor could not be queried or returned an unusable response
    #[error("Fetch from {vendor} failed: {message}")]
    Fetch {
        vendor: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// A message could not be delivered to one recipient
    #[error("Notification to {recipient} failed: {message}")]
    Notify {
        recipient: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Whether the error must stop the process (startup-class errors)
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AppError::Validation { .. } | AppError::Configuration { .. }
        )
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = error.key().to_string();
        AppError::Configuration {
            key,
            source: anyhow::Error::new(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
