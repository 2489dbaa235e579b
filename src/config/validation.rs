//! Configuration validation logic
//!
//! Everything checked here is a fatal startup error: the watcher refuses to
//! enter the poll loop with a configuration it cannot act on.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{
    HttpConfig, InterparkSourceConfig, LoggerSettings, MonitorConfig, Settings, SourcesConfig,
    TelegramConfig, TicketlinkSourceConfig,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// `<numeric bot id>:<secret>` as issued by BotFather
static BOT_TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+:[A-Za-z0-9_-]+$").expect("valid bot token regex"));

fn validate_base_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| {
        ConfigError::validation(field, format!("Invalid URL '{}': {}", value, e))
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::validation(
            field,
            "URL must use http or https protocol",
        ));
    }
    Ok(())
}

/// Ids end up in request paths and chat targets verbatim
fn validate_id_list(field: &str, ids: &[String]) -> Result<(), ConfigError> {
    match ids.iter().find(|id| id.is_empty() || id.trim() != id.as_str()) {
        Some(id) => Err(ConfigError::validation(
            field,
            format!("Entry '{}' is blank or has surrounding whitespace", id),
        )),
        None => Ok(()),
    }
}

impl MonitorConfig {
    /// # Validation Rules
    /// - Interval, cooldown and fetch timeout must all be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_secs == 0 {
            return Err(ConfigError::validation(
                "monitor.interval_secs",
                "Poll interval must be greater than 0 seconds.",
            ));
        }

        if self.cooldown_secs == 0 {
            return Err(ConfigError::validation(
                "monitor.cooldown_secs",
                "Renotify cooldown must be greater than 0 seconds.",
            ));
        }

        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::validation(
                "monitor.fetch_timeout_secs",
                "Fetch timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl HttpConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::validation(
                "http.request_timeout_secs",
                "Request timeout must be greater than 0 seconds.",
            ));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::validation(
                "http.connect_timeout_secs",
                "Connect timeout must be greater than 0 seconds.",
            ));
        }
        Ok(())
    }
}

impl TelegramConfig {
    /// # Validation Rules
    /// - Token is required and must look like `<digits>:<secret>`
    /// - At least one chat id, none blank or padded
    /// - API base URL must be http(s)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::validation(
                "telegram.token",
                "Telegram bot token is required. Set SEATWATCH_TELEGRAM__TOKEN.",
            ));
        }

        if !BOT_TOKEN_PATTERN.is_match(self.token.trim()) {
            return Err(ConfigError::validation(
                "telegram.token",
                "Telegram bot token is malformed. Expected '<bot id>:<secret>'.",
            ));
        }

        if self.chat_ids.is_empty() {
            return Err(ConfigError::validation(
                "telegram.chat_ids",
                "At least one chat id is required. Set SEATWATCH_TELEGRAM__CHAT_IDS.",
            ));
        }
        validate_id_list("telegram.chat_ids", &self.chat_ids)?;

        validate_base_url("telegram.api_base_url", &self.api_base_url)
    }
}

impl InterparkSourceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        if self.goods_id.trim().is_empty() {
            return Err(ConfigError::validation(
                "sources.interpark.goods_id",
                "Goods id is required when the Interpark source is enabled.",
            ));
        }

        // The play sequence is rendered as three digits in the request path.
        if self.play_seq_count == 0 || self.play_seq_count > 999 {
            return Err(ConfigError::validation(
                "sources.interpark.play_seq_count",
                "Play sequence count must be between 1 and 999.",
            ));
        }

        validate_base_url("sources.interpark.api_base_url", &self.api_base_url)
    }
}

impl TicketlinkSourceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        if self.product_id.trim().is_empty() {
            return Err(ConfigError::validation(
                "sources.ticketlink.product_id",
                "Product id is required when the Ticketlink source is enabled.",
            ));
        }

        if self.schedule_ids.is_empty() {
            return Err(ConfigError::validation(
                "sources.ticketlink.schedule_ids",
                "At least one schedule id is required when the Ticketlink source is enabled.",
            ));
        }
        validate_id_list("sources.ticketlink.schedule_ids", &self.schedule_ids)?;

        validate_base_url("sources.ticketlink.api_base_url", &self.api_base_url)
    }
}

impl SourcesConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled_count() == 0 {
            return Err(ConfigError::validation(
                "sources",
                "No ticketing source is enabled. Enable sources.interpark or sources.ticketlink.",
            ));
        }

        self.interpark.validate()?;
        self.ticketlink.validate()
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Filter directives such as "seatwatch=debug" are handed to EnvFilter as-is.
        let level = self.level.to_lowercase();
        if !level.contains('=') && !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        if self.file.enabled {
            if self.file.path.trim().is_empty() {
                return Err(ConfigError::validation(
                    "logger.file.path",
                    "Log file path cannot be empty when file output is enabled.",
                ));
            }
            if !VALID_LOG_FORMATS.contains(&self.file.format.to_lowercase().as_str()) {
                return Err(ConfigError::ValidationError {
                    field: "logger.file.format".to_string(),
                    message: format!(
                        "Invalid log format '{}'. Valid formats are: {}",
                        self.file.format,
                        VALID_LOG_FORMATS.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Settings {
    /// Validate the complete configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logger.validate()?;
        self.http.validate()?;
        self.monitor.validate()?;
        self.telegram.validate()?;
        self.sources.validate()
    }

    /// Validation for commands that only read the vendors (`check`)
    pub fn validate_sources(&self) -> Result<(), ConfigError> {
        self.logger.validate()?;
        self.http.validate()?;
        self.monitor.validate()?;
        self.sources.validate()
    }
}
