//! Configuration merger for CLI arguments and config files
//!
//! Applies CLI overrides on top of file and environment configuration, then
//! validates the result for the command about to run.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};
use std::path::Path;

/// Configuration merger that handles CLI argument integration with file-based configuration
///
/// CLI arguments take precedence over configuration file and environment values.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base configuration without validating it
    ///
    /// # Arguments
    /// * `config_path` - Single configuration file; `None` uses the layered loader
    /// * `environment` - Overrides `SEATWATCH_APP_ENV` when set
    ///
    /// # Errors
    /// Returns ConfigError if a file cannot be read or parsed
    pub fn from_config_path(
        config_path: Option<&Path>,
        environment: Option<crate::config::Environment>,
    ) -> Result<Self, ConfigError> {
        let loader = match config_path {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::new()?,
        };
        let loader = match environment {
            Some(env) => loader.with_environment(env),
            None => loader,
        };

        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// Precedence: command flags > global flags > environment > files.
    /// The merged settings are validated for the selected command: `check`
    /// does not need Telegram settings.
    ///
    /// # Arguments
    /// * `cli` - Parsed CLI arguments
    ///
    /// # Returns
    /// A new Settings instance with CLI overrides applied
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        self.apply_global_overrides(&mut config, cli);

        if let Some(ref command) = cli.command {
            self.apply_command_overrides(&mut config, command);
        }

        match cli.command {
            Some(Commands::Check { .. }) => config.validate_sources()?,
            _ => config.validate()?,
        }

        Ok(config)
    }

    fn apply_global_overrides(&self, config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    fn apply_command_overrides(&self, config: &mut Settings, command: &Commands) {
        match command {
            Commands::Watch {
                interval,
                cooldown,
                log_level,
                dry_run: _,
            } => {
                if let Some(secs) = interval {
                    config.monitor.interval_secs = *secs;
                }
                if let Some(secs) = cooldown {
                    config.monitor.cooldown_secs = *secs;
                }
                // Command-specific level wins over --verbose/--quiet
                if let Some(level) = log_level {
                    config.logger.level = (*level).into();
                }
            }
            Commands::Check { source: _ } => {}
        }
    }

    /// Get the base configuration (before CLI overrides)
    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parser::Cli;
    use crate::config::loader::tests::TEST_MUTEX;
    use clap::Parser;

    fn create_valid_base_config() -> Settings {
        let mut config = Settings::default();
        config.telegram.token = "123456:ABC-def".to_string();
        config.telegram.chat_ids = vec!["1001".to_string()];
        config.sources.interpark.enabled = true;
        config.sources.interpark.goods_id = "24011105".to_string();
        config
    }

    #[test]
    fn test_configuration_merger_new() {
        let base_config = Settings::default();
        let merger = ConfigurationMerger::new(base_config.clone());
        assert_eq!(merger.config(), &base_config);
    }

    #[test]
    fn test_merge_verbose_flag() {
        let merger = ConfigurationMerger::new(create_valid_base_config());
        let cli = Cli::try_parse_from(["seatwatch", "--verbose"]).unwrap();
        assert_eq!(merger.merge_cli_args(&cli).unwrap().logger.level, "debug");
    }

    #[test]
    fn test_merge_quiet_flag() {
        let merger = ConfigurationMerger::new(create_valid_base_config());
        let cli = Cli::try_parse_from(["seatwatch", "--quiet"]).unwrap();
        assert_eq!(merger.merge_cli_args(&cli).unwrap().logger.level, "error");
    }

    #[test]
    fn test_merge_watch_interval_and_cooldown() {
        let merger = ConfigurationMerger::new(create_valid_base_config());
        let cli = Cli::try_parse_from([
            "seatwatch", "watch", "--interval", "3", "--cooldown", "90",
        ])
        .unwrap();
        let merged = merger.merge_cli_args(&cli).unwrap();
        assert_eq!(merged.monitor.interval_secs, 3);
        assert_eq!(merged.monitor.cooldown_secs, 90);
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let merger = ConfigurationMerger::new(create_valid_base_config());
        let cli = Cli::try_parse_from(["seatwatch", "--verbose", "watch", "--log-level", "warn"])
            .unwrap();
        assert_eq!(merger.merge_cli_args(&cli).unwrap().logger.level, "warn");
    }

    #[test]
    fn test_watch_requires_telegram_but_check_does_not() {
        let mut base = create_valid_base_config();
        base.telegram.token.clear();
        let merger = ConfigurationMerger::new(base);

        let watch = Cli::try_parse_from(["seatwatch", "watch"]).unwrap();
        assert!(merger.merge_cli_args(&watch).is_err());

        let check = Cli::try_parse_from(["seatwatch", "check"]).unwrap();
        assert!(merger.merge_cli_args(&check).is_ok());
    }

    #[test]
    fn test_from_config_path_single_file() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("seatwatch.toml");
        std::fs::write(
            &path,
            r#"
[monitor]
interval_secs = 7

[telegram]
token = "123456:ABC-def"
chat_ids = ["1001"]

[sources.ticketlink]
enabled = true
product_id = "51234"
schedule_ids = ["100", "200"]
"#,
        )
        .unwrap();

        let merger = ConfigurationMerger::from_config_path(Some(&path), None).unwrap();
        assert_eq!(merger.config().monitor.interval_secs, 7);

        let cli = Cli::try_parse_from(["seatwatch"]).unwrap();
        let merged = merger.merge_cli_args(&cli).unwrap();
        assert_eq!(merged.sources.ticketlink.schedule_ids, vec!["100", "200"]);
    }
}
