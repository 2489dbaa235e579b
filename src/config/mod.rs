//! Configuration management for seatwatch
//!
//! Settings are loaded in layers, lowest priority first:
//! 1. `default.toml` - base configuration (optional, the watcher can run from env alone)
//! 2. `{environment}.toml` - environment-specific configuration
//! 3. `local.toml` - local overrides (not committed to version control)
//! 4. `SEATWATCH_*` environment variables
//!
//! CLI flags are merged on top by `cli::ConfigurationMerger`.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use loader::ConfigLoader;
pub use settings::{
    HttpConfig, InterparkSourceConfig, MonitorConfig, Settings, SourcesConfig, TelegramConfig,
    TicketlinkSourceConfig,
};
