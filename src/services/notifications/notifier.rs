//! Fan-out of one message to every configured recipient.

use super::provider::{NotificationMessage, NotificationProvider};
use std::sync::Arc;

/// One recipient that could not be reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientFailure {
    pub recipient: String,
    pub error: String,
}

/// Outcome of a broadcast
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: Vec<String>,
    pub failures: Vec<RecipientFailure>,
}

impl BroadcastReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Sends messages through one provider to a fixed recipient list.
///
/// Cheap to clone; every vendor watch holds its own handle.
#[derive(Clone)]
pub struct Notifier {
    provider: Arc<dyn NotificationProvider>,
    recipients: Arc<[String]>,
}

impl Notifier {
    pub fn new(provider: Arc<dyn NotificationProvider>, recipients: Vec<String>) -> Self {
        Self {
            provider,
            recipients: recipients.into(),
        }
    }

    pub fn provider(&self) -> &dyn NotificationProvider {
        self.provider.as_ref()
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    /// Deliver `message` to every recipient in order.
    ///
    /// Each recipient is attempted independently; failures are logged and
    /// collected, never propagated.
    pub async fn broadcast(&self, message: &NotificationMessage) -> BroadcastReport {
        let mut report = BroadcastReport::default();

        for recipient in self.recipients.iter() {
            match self.provider.send(recipient, message).await {
                Ok(result) => {
                    tracing::debug!(
                        provider = self.provider.name(),
                        recipient = %recipient,
                        status = ?result.status_code,
                        duration_ms = result.duration_ms,
                        "Notification delivered"
                    );
                    report.delivered.push(recipient.clone());
                }
                Err(e) => {
                    tracing::warn!(
                        provider = self.provider.name(),
                        recipient = %recipient,
                        error = %e,
                        "Notification failed"
                    );
                    report.failures.push(RecipientFailure {
                        recipient: recipient.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::error::{AppError, AppResult};
    use crate::services::notifications::NotificationResult;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// In-memory provider recording every successful send
    #[derive(Default)]
    pub struct RecordingProvider {
        pub failing: HashSet<String>,
        pub sent: Mutex<Vec<(String, NotificationMessage)>>,
    }

    impl RecordingProvider {
        pub fn failing_for(recipients: &[&str]) -> Self {
            Self {
                failing: recipients.iter().map(|r| r.to_string()).collect(),
                ..Self::default()
            }
        }

        pub fn sent(&self) -> Vec<(String, NotificationMessage)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationProvider for RecordingProvider {
        async fn send(
            &self,
            recipient: &str,
            message: &NotificationMessage,
        ) -> AppResult<NotificationResult> {
            if self.failing.contains(recipient) {
                return Err(AppError::Notify {
                    recipient: recipient.to_string(),
                    message: "unreachable".to_string(),
                    source: None,
                });
            }
            self.sent
                .lock()
                .unwrap()
                .push((recipient.to_string(), message.clone()));
            Ok(NotificationResult {
                status_code: Some(200),
                duration_ms: 0,
            })
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }
}
