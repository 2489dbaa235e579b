//! Telegram Bot API notification provider.
//!
//! Delivers plain-text messages with `sendMessage` and checks the bot token
//! with `getMe`. Request errors are stripped of their URL before they are
//! logged because the Bot API puts the token in the path.
//!
//! Bot API Reference: https://core.telegram.org/bots/api

use super::provider::{NotificationMessage, NotificationProvider, NotificationResult};
use crate::config::TelegramConfig;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Instant;

/// Envelope of every Bot API response
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    result: Option<T>,
}

/// `getMe` result
#[derive(Debug, Deserialize)]
struct BotUser {
    id: i64,
    #[serde(default)]
    username: Option<String>,
}

/// Telegram notification provider
///
/// # Example
/// ```ignore
/// let provider = TelegramProvider::new(client, settings.telegram.clone());
/// provider.send("123456", &NotificationMessage::text("Start checking...")).await?;
/// ```
#[derive(Clone)]
pub struct TelegramProvider {
    client: reqwest::Client,
    config: TelegramConfig,
}

impl TelegramProvider {
    /// Creates a new Telegram provider
    ///
    /// # Arguments
    /// * `client` - Shared HTTP client
    /// * `config` - Token, API base URL and startup verification flag
    pub fn new(client: reqwest::Client, config: TelegramConfig) -> Self {
        Self { client, config }
    }

    /// Builds `{api_base}/bot{token}/{method}`
    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.token.trim(),
            method
        )
    }

    /// Builds the `sendMessage` request body
    fn build_request_body(recipient: &str, message: &NotificationMessage) -> serde_json::Value {
        json!({
            "chat_id": recipient,
            "text": message.render(),
            "disable_web_page_preview": true,
        })
    }

    fn notify_error(
        recipient: &str,
        message: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> AppError {
        AppError::Notify {
            recipient: recipient.to_string(),
            message: message.into(),
            source,
        }
    }

    /// Calls `getMe` to prove the token is accepted
    ///
    /// # Returns
    /// The bot username (or numeric id when it has none)
    async fn get_me(&self) -> AppResult<String> {
        let token_error = |reason: String| AppError::Validation {
            field: "telegram.token".to_string(),
            reason,
        };

        let resp = self
            .client
            .get(self.method_url("getMe"))
            .send()
            .await
            .map_err(|e| token_error(format!("getMe request failed: {}", e.without_url())))?;

        let status = resp.status();
        let body: ApiResponse<BotUser> = resp
            .json()
            .await
            .map_err(|e| token_error(format!("getMe invalid JSON: {}", e.without_url())))?;

        match body.result {
            Some(user) if body.ok && status.is_success() => {
                Ok(user.username.unwrap_or_else(|| user.id.to_string()))
            }
            _ => Err(token_error(format!(
                "token rejected ({}): {}",
                status.as_u16(),
                body.description.as_deref().unwrap_or("no description")
            ))),
        }
    }
}

#[async_trait]
impl NotificationProvider for TelegramProvider {
    /// Sends a message via `sendMessage`
    ///
    /// A non-2xx status or `ok: false` is a delivery failure carrying the
    /// API `description`.
    async fn send(
        &self,
        recipient: &str,
        message: &NotificationMessage,
    ) -> AppResult<NotificationResult> {
        let start = Instant::now();

        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&Self::build_request_body(recipient, message))
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                Self::notify_error(
                    recipient,
                    format!("sendMessage request failed: {}", e),
                    Some(e.into()),
                )
            })?;

        let status = response.status();
        let body: ApiResponse<serde_json::Value> = response.json().await.map_err(|e| {
            let e = e.without_url();
            Self::notify_error(
                recipient,
                format!("sendMessage invalid JSON ({}): {}", status.as_u16(), e),
                Some(e.into()),
            )
        })?;

        if !status.is_success() || !body.ok {
            return Err(Self::notify_error(
                recipient,
                format!(
                    "sendMessage rejected ({}): {}",
                    status.as_u16(),
                    body.description.as_deref().unwrap_or("no description")
                ),
                None,
            ));
        }

        Ok(NotificationResult {
            status_code: Some(status.as_u16()),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn name(&self) -> &'static str {
        "telegram"
    }

    /// Validates telegram configuration
    ///
    /// Checks the token format and recipients, then calls `getMe` when
    /// `verify_token` is set.
    async fn validate_config(&self) -> AppResult<()> {
        self.config.validate()?;

        if self.config.verify_token {
            let bot = self.get_me().await?;
            tracing::info!(bot = %bot, "Telegram bot token verified");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "123456:ABC-def_ghi";

    fn provider(base: &str, verify_token: bool) -> TelegramProvider {
        TelegramProvider::new(
            reqwest::Client::new(),
            TelegramConfig {
                token: TOKEN.to_string(),
                chat_ids: vec!["42".to_string()],
                api_base_url: base.to_string(),
                verify_token,
            },
        )
    }

    #[test]
    fn test_method_url_trailing_slash() {
        let provider = provider("https://api.telegram.org/", false);
        assert_eq!(
            provider.method_url("sendMessage"),
            "https://api.telegram.org/bot123456:ABC-def_ghi/sendMessage"
        );
    }

    #[test]
    fn test_build_request_body() {
        let message = NotificationMessage {
            title: Some("Seat Found!!!".to_string()),
            body: "VIP석 x3".to_string(),
        };
        let body = TelegramProvider::build_request_body("42", &message);
        assert_eq!(body["chat_id"], "42");
        assert_eq!(body["text"], "Seat Found!!!\nVIP석 x3");
        assert_eq!(body["disable_web_page_preview"], true);
    }

    #[test]
    fn test_get_me_envelope_decoding() {
        let rejected: ApiResponse<BotUser> = serde_json::from_str(
            r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#,
        )
        .unwrap();
        assert!(!rejected.ok);
        assert!(rejected.result.is_none());
        assert_eq!(rejected.description.as_deref(), Some("Unauthorized"));

        let accepted: ApiResponse<BotUser> = serde_json::from_str(
            r#"{"ok":true,"result":{"id":7,"is_bot":true,"username":"seat_bot"}}"#,
        )
        .unwrap();
        let user = accepted.result.unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.username.as_deref(), Some("seat_bot"));
    }

    #[tokio::test]
    async fn test_send_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{}/sendMessage", TOKEN)))
            .and(body_json(json!({
                "chat_id": "42",
                "text": "hello",
                "disable_web_page_preview": true,
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ok": true, "result": {"message_id": 1}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = provider(&server.uri(), false)
            .send("42", &NotificationMessage::text("hello"))
            .await
            .unwrap();
        assert_eq!(result.status_code, Some(200));
    }

    #[tokio::test]
    async fn test_send_rejected_by_api() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&server)
            .await;

        let err = provider(&server.uri(), false)
            .send("7", &NotificationMessage::text("hello"))
            .await
            .unwrap_err();
        match err {
            AppError::Notify {
                recipient, message, ..
            } => {
                assert_eq!(recipient, "7");
                assert!(message.contains("chat not found"));
            }
            other => panic!("Expected Notify error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_error_does_not_leak_token() {
        // Nothing listens on the discard port
        let err = provider("http://127.0.0.1:9", false)
            .send("42", &NotificationMessage::text("hello"))
            .await
            .unwrap_err();
        assert!(!format!("{:?}", err).contains(TOKEN));
        assert!(!err.to_string().contains(TOKEN));
    }

    #[tokio::test]
    async fn test_validate_config_calls_get_me() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/bot{}/getMe", TOKEN)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {"id": 123456, "is_bot": true, "username": "seat_bot"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        assert!(provider(&server.uri(), true).validate_config().await.is_ok());
    }

    #[tokio::test]
    async fn test_validate_config_rejected_token_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "ok": false,
                "error_code": 401,
                "description": "Unauthorized"
            })))
            .mount(&server)
            .await;

        let err = provider(&server.uri(), true)
            .validate_config()
            .await
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("telegram.token"));
    }

    #[tokio::test]
    async fn test_validate_config_skips_get_me_when_disabled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        assert!(provider(&server.uri(), false).validate_config().await.is_ok());
    }
}
