//! Configuration settings structures for seatwatch
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig, RotationConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "seatwatch".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/seatwatch.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_max_size() -> u64 {
    10 * 1024 * 1024 // 10MB
}

fn default_max_files() -> usize {
    5
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_interval() -> u64 {
    5
}

fn default_cooldown() -> u64 {
    30
}

fn default_fetch_timeout() -> u64 {
    20
}

fn default_telegram_api() -> String {
    "https://api.telegram.org".to_string()
}

fn default_play_seq_count() -> u32 {
    2
}

fn default_interpark_api() -> String {
    "https://api-ticketfront.interpark.com".to_string()
}

fn default_ticketlink_api() -> String {
    "https://mapi.ticketlink.co.kr".to_string()
}

/// Trims every id and drops blank ones, so `"1001, 1002,"` reads as
/// `["1001", "1002"]`
fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let ids = Vec::<String>::deserialize(deserializer)?;
    Ok(ids
        .into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect())
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// HTTP Client Configuration
// ============================================================================

/// Shared HTTP client settings used by every vendor source and the notifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

// ============================================================================
// Monitor Configuration
// ============================================================================

/// Poll loop timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Sleep between ticks, in seconds
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Minimum time before the same seat may be announced again, in seconds
    #[serde(default = "default_cooldown")]
    pub cooldown_secs: u64,

    /// Upper bound for one vendor's fetch within a tick, in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Broadcast a "Start checking..." message before the first tick
    #[serde(default = "default_true")]
    pub announce_start: bool,
}

impl MonitorConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// A seat still on offer is then re-announced on every tick
    pub fn cooldown_shorter_than_interval(&self) -> bool {
        self.cooldown_secs < self.interval_secs
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            cooldown_secs: default_cooldown(),
            fetch_timeout_secs: default_fetch_timeout(),
            announce_start: true,
        }
    }
}

// ============================================================================
// Telegram Configuration
// ============================================================================

/// Telegram Bot API delivery settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather (`<bot id>:<secret>`)
    #[serde(default)]
    pub token: String,

    /// Chat identifiers that receive every notification
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub chat_ids: Vec<String>,

    #[serde(default = "default_telegram_api")]
    pub api_base_url: String,

    /// Call `getMe` at startup and refuse to start on failure
    #[serde(default = "default_true")]
    pub verify_token: bool,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            chat_ids: Vec::new(),
            api_base_url: default_telegram_api(),
            verify_token: true,
        }
    }
}

// The token is a credential, keep it out of debug output.
impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &if self.token.is_empty() { "" } else { "***" })
            .field("chat_ids", &self.chat_ids)
            .field("api_base_url", &self.api_base_url)
            .field("verify_token", &self.verify_token)
            .finish()
    }
}

// ============================================================================
// Source Configuration
// ============================================================================

/// Interpark remaining-seat API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterparkSourceConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Goods (performance) identifier, e.g. `24011105`
    #[serde(default)]
    pub goods_id: String,

    /// Number of play sequences to query, starting at 1
    #[serde(default = "default_play_seq_count")]
    pub play_seq_count: u32,

    #[serde(default = "default_interpark_api")]
    pub api_base_url: String,
}

impl Default for InterparkSourceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            goods_id: String::new(),
            play_seq_count: default_play_seq_count(),
            api_base_url: default_interpark_api(),
        }
    }
}

/// Ticketlink schedule grade API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketlinkSourceConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub product_id: String,

    /// One request is issued per schedule per tick
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub schedule_ids: Vec<String>,

    #[serde(default = "default_ticketlink_api")]
    pub api_base_url: String,
}

impl Default for TicketlinkSourceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            product_id: String::new(),
            schedule_ids: Vec::new(),
            api_base_url: default_ticketlink_api(),
        }
    }
}

/// All vendor sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SourcesConfig {
    #[serde(default)]
    pub interpark: InterparkSourceConfig,

    #[serde(default)]
    pub ticketlink: TicketlinkSourceConfig,
}

impl SourcesConfig {
    pub fn enabled_count(&self) -> usize {
        usize::from(self.interpark.enabled) + usize::from(self.ticketlink.enabled)
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Maximum file size in bytes before rotation
    #[serde(default = "default_max_size")]
    pub max_size: u64,

    /// Maximum number of rotated files to keep
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: true,
            format: default_log_format(),
            max_size: default_max_size(),
            max_files: default_max_files(),
        }
    }
}

/// Logger configuration as it appears in config files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level or filter directive ("info", "seatwatch=debug,warn", ...)
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert the file representation into the runtime `LoggerConfig`
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level)
            .map_err(|e| ConfigError::validation("logger", e.to_string()))
    }
}

impl FileSettings {
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format", e.to_string()))?;
        let rotation = RotationConfig::new(self.max_size, self.max_files)
            .map_err(|e| ConfigError::validation("logger.file", e.to_string()))?;

        Ok(FileConfig {
            enabled: self.enabled,
            path: PathBuf::from(self.path),
            append: self.append,
            format,
            rotation,
        })
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub logger: LoggerSettings,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub monitor: MonitorConfig,

    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub sources: SourcesConfig,
}
