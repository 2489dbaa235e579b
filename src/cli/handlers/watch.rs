//! Watch command handler
//!
//! Handles the watch command including dry-run validation and the poll loop.

use crate::app::App;
use crate::config::Settings;
use crate::error::AppResult;

/// Handler for the watch command
pub struct WatchCommandHandler {
    config: Settings,
}

impl WatchCommandHandler {
    /// Create a new watch command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the watch command with optional dry-run support
    ///
    /// # Arguments
    /// * `dry_run` - If true, validates configuration and exits without polling
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Startup errors such as a rejected bot token (if not dry-run)
    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            self.validate_only()
        } else {
            self.validate_configuration()?;
            App::new(self.config).run().await
        }
    }

    /// Validate configuration and print what would be watched
    pub fn validate_only(&self) -> AppResult<()> {
        self.validate_configuration()?;

        for line in self.summary() {
            println!("✓ {}", line);
        }
        println!("Dry run completed successfully - configuration is ready to watch");
        Ok(())
    }

    fn summary(&self) -> Vec<String> {
        let config = &self.config;
        let mut lines = vec!["Configuration is valid".to_string()];

        let interpark = &config.sources.interpark;
        if interpark.enabled {
            lines.push(format!(
                "Interpark goods {} ({} play sequences)",
                interpark.goods_id, interpark.play_seq_count
            ));
        }
        let ticketlink = &config.sources.ticketlink;
        if ticketlink.enabled {
            lines.push(format!(
                "Ticketlink product {} (schedules: {})",
                ticketlink.product_id,
                ticketlink.schedule_ids.join(", ")
            ));
        }

        lines.push(format!(
            "Polling every {}s, re-alerting after {}s",
            config.monitor.interval_secs, config.monitor.cooldown_secs
        ));
        if config.monitor.cooldown_shorter_than_interval() {
            lines.push("Warning: cooldown is shorter than the interval".to_string());
        }
        lines.push(format!(
            "Alerts go to {} Telegram chat(s)",
            config.telegram.chat_ids.len()
        ));
        lines
    }

    fn validate_configuration(&self) -> AppResult<()> {
        self.config.validate().map_err(Into::into)
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}
