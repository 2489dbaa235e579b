//! Notification delivery with pluggable providers.
//!
//! `NotificationProvider` is the transport seam (one recipient, one message);
//! `Notifier` fans a message out to every configured recipient.

mod notifier;
mod provider;
mod telegram_provider;

pub use notifier::{BroadcastReport, Notifier, RecipientFailure};
pub use provider::{NotificationMessage, NotificationProvider, NotificationResult};
pub use telegram_provider::TelegramProvider;

#[cfg(test)]
pub(crate) use notifier::testing;
