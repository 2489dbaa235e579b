//! Command executor for dispatching CLI commands
//!
//! Entry point for running a parsed command once configuration is loaded.

use super::handlers::{CheckCommandHandler, WatchCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::error::{AppError, AppResult};

/// Execute a CLI command with the given settings
///
/// No subcommand means `watch` with configured values.
///
/// # Arguments
/// * `cli` - Parsed CLI arguments
/// * `settings` - Merged and validated settings
///
/// # Errors
/// Returns errors from command handlers or argument validation
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    validate_command_args(cli)?;

    match &cli.command {
        Some(Commands::Watch { dry_run, .. }) => {
            WatchCommandHandler::new(settings).execute(*dry_run).await
        }
        None => WatchCommandHandler::new(settings).execute(false).await,
        Some(Commands::Check { source }) => {
            CheckCommandHandler::new(settings, source.map(Into::into))
                .execute()
                .await
        }
    }
}

/// Validate argument combinations before execution
fn validate_command_args(cli: &Cli) -> AppResult<()> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })
}
