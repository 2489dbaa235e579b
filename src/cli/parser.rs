//! CLI argument parsing with clap
//!
//! Defines the command-line interface: the global flags, the `watch` and
//! `check` subcommands and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::external::ticketing::Vendor;

/// Ticket seat availability watcher
#[derive(Parser, Debug)]
#[command(name = "seatwatch")]
#[command(about = "Poll ticketing sites for open seats and alert Telegram chats")]
#[command(long_about = "
seatwatch polls ticketing vendor APIs on a fixed interval and sends a Telegram
message to every configured chat when seats open up. Repeated alerts for the
same seat grade are suppressed for a cooldown window.

EXAMPLES:
    # Watch with the layered configuration in ./config
    seatwatch

    # Poll every 3 seconds, re-alert at most once a minute
    seatwatch watch --interval 3 --cooldown 60

    # Use a single configuration file
    seatwatch --config /etc/seatwatch/seatwatch.toml watch

    # Validate configuration without polling
    seatwatch watch --dry-run

    # Print the current seat counts once, without sending anything
    seatwatch check --source interpark

Every setting can also be given through SEATWATCH_* environment variables,
e.g. SEATWATCH_TELEGRAM__TOKEN or SEATWATCH_TELEGRAM__CHAT_IDS=1001,1002.
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Use one TOML file instead of the layered `config/` directory.
    /// The file must exist and be readable.
    ///
    /// Example: --config /etc/seatwatch/seatwatch.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `config/{environment}.toml` layer is loaded.
    ///
    /// Available values: development (dev), production (prod), test
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Raises the log level to debug. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Lowers the log level to error. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll the enabled vendors and send alerts (default)
    ///
    /// Runs until interrupted with Ctrl+C or SIGTERM.
    ///
    /// Examples:
    ///   seatwatch watch                          # Start with configured cadence
    ///   seatwatch watch --interval 3             # Poll every 3 seconds
    ///   seatwatch watch --dry-run                # Validate config without polling
    Watch {
        /// Seconds between polls
        ///
        /// Overrides `monitor.interval_secs`. Must be between 1 and 86400.
        #[arg(short, long, value_name = "SECS", value_parser = super::validation::validate_seconds)]
        interval: Option<u64>,

        /// Seconds before the same seat grade may alert again
        ///
        /// Overrides `monitor.cooldown_secs`. Must be between 1 and 86400.
        #[arg(long, value_name = "SECS", value_parser = super::validation::validate_seconds)]
        cooldown: Option<u64>,

        /// Log level override
        ///
        /// Takes precedence over the configuration file and --verbose/--quiet.
        ///
        /// Available levels: error, warn, info, debug, trace
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        ///
        /// Prints a summary of what would be watched. Returns exit code 0 if
        /// the configuration is valid, non-zero otherwise.
        #[arg(long)]
        dry_run: bool,
    },
    /// Fetch the current seat counts once and print them
    ///
    /// No alerts are sent and the Telegram settings are not required.
    ///
    /// Examples:
    ///   seatwatch check                          # Every enabled vendor
    ///   seatwatch check --source ticketlink      # One vendor
    Check {
        /// Only query this vendor (must be enabled)
        #[arg(short, long, value_enum)]
        source: Option<SourceArg>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "production", alias = "prod")]
    Production,
    #[value(name = "test")]
    Test,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

/// Vendors selectable with `check --source`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceArg {
    Interpark,
    Ticketlink,
}

impl Cli {
    /// Validate argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }

    /// Get detailed help for validation errors
    pub fn get_validation_help() -> &'static str {
        r#"
Common validation errors and solutions:

Interval and cooldown:
  - Both are whole seconds between 1 and 86400
  - A cooldown shorter than the interval is logged as a warning
  - Example: watch --interval 5 --cooldown 30

Configuration file validation:
  - File must exist and be readable
  - File must be in TOML format
  - Example: --config /path/to/seatwatch.toml

Telegram:
  - telegram.token must look like <bot id>:<secret>
  - telegram.chat_ids needs at least one chat

For more help, use: seatwatch help <subcommand>
"#
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Production => crate::config::Environment::Production,
            Environment::Test => crate::config::Environment::Test,
        }
    }
}

impl From<SourceArg> for Vendor {
    fn from(source: SourceArg) -> Self {
        match source {
            SourceArg::Interpark => Vendor::Interpark,
            SourceArg::Ticketlink => Vendor::Ticketlink,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["seatwatch", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["seatwatch", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["seatwatch"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
    }

    #[test]
    fn test_watch_command() {
        let cli = Cli::try_parse_from([
            "seatwatch", "watch", "--interval", "3", "--cooldown", "60", "--log-level", "debug",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Watch {
                interval,
                cooldown,
                log_level,
                dry_run,
            }) => {
                assert_eq!(interval, Some(3));
                assert_eq!(cooldown, Some(60));
                assert!(matches!(log_level, Some(LogLevel::Debug)));
                assert!(!dry_run);
            }
            other => panic!("Expected Watch command, got {:?}", other),
        }
    }

    #[test]
    fn test_watch_rejects_zero_interval() {
        assert!(Cli::try_parse_from(["seatwatch", "watch", "--interval", "0"]).is_err());
    }

    #[test]
    fn test_check_command_with_source() {
        let cli = Cli::try_parse_from(["seatwatch", "check", "--source", "ticketlink"]).unwrap();
        match cli.command {
            Some(Commands::Check { source }) => {
                assert_eq!(source, Some(SourceArg::Ticketlink));
                assert_eq!(Vendor::from(SourceArg::Ticketlink), Vendor::Ticketlink);
            }
            other => panic!("Expected Check command, got {:?}", other),
        }
    }

    #[test]
    fn test_env_alias() {
        let cli = Cli::try_parse_from(["seatwatch", "--env", "prod"]).unwrap();
        assert!(matches!(cli.env, Some(Environment::Production)));
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["seatwatch", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_short_cooldown_is_left_to_monitor_config() {
        let cli = Cli::try_parse_from([
            "seatwatch", "watch", "--interval", "10", "--cooldown", "5",
        ])
        .unwrap();
        assert!(cli.validate().is_ok());
    }
}
