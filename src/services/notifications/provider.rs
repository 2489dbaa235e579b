//! Core notification provider trait and types.

use crate::error::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Message to be sent via a notification provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Message title (rendered as the first line by chat providers)
    pub title: Option<String>,
    /// Message body (required)
    pub body: String,
}

impl NotificationMessage {
    /// Message with a body only
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: body.into(),
        }
    }

    /// Title and body joined the way plain-text channels display them
    pub fn render(&self) -> String {
        match &self.title {
            Some(title) if !title.is_empty() => format!("{}\n{}", title, self.body),
            _ => self.body.clone(),
        }
    }
}

/// Outcome of a successful delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    /// HTTP status code or provider-specific status
    pub status_code: Option<u16>,
    /// Time taken for the operation in milliseconds
    pub duration_ms: u64,
}

/// Trait for notification transports.
///
/// Uses `async_trait` so providers can be held as `Arc<dyn NotificationProvider>`.
/// A failed delivery is an `AppError::Notify` for that recipient only.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Sends `message` to a single recipient
    ///
    /// # Arguments
    /// * `recipient` - Provider-specific recipient id (e.g. a Telegram chat id)
    /// * `message` - The notification message to send
    ///
    /// # Returns
    /// Delivery details on success, `AppError::Notify` otherwise
    async fn send(
        &self,
        recipient: &str,
        message: &NotificationMessage,
    ) -> AppResult<NotificationResult>;

    /// Returns the provider name for logging
    fn name(&self) -> &'static str;

    /// Validates provider configuration (optional, default no-op)
    ///
    /// Called once at startup; an error is fatal.
    async fn validate_config(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_and_without_title() {
        assert_eq!(NotificationMessage::text("hello").render(), "hello");

        let message = NotificationMessage {
            title: Some("Seat Found!!!".into()),
            body: "PlaySeq: 001".into(),
        };
        assert_eq!(message.render(), "Seat Found!!!\nPlaySeq: 001");

        let empty_title = NotificationMessage {
            title: Some(String::new()),
            body: "body".into(),
        };
        assert_eq!(empty_title.render(), "body");
    }
}
