//! Watcher lifecycle: startup checks, the poll loop and graceful shutdown.

use std::sync::Arc;

use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::config::{Environment, Settings};
use crate::error::AppResult;
use crate::external::build_http_client;
use crate::external::ticketing::build_sources;
use crate::services::monitor::{build_poll_loop, start_message};
use crate::services::notifications::{NotificationProvider, Notifier, TelegramProvider};

/// Seat watcher manager
pub struct App {
    settings: Settings,
}

impl App {
    /// Create a new watcher with validated settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Run until Ctrl+C or SIGTERM
    pub async fn run(self) -> AppResult<()> {
        let shutdown = CancellationToken::new();
        let signal_token = shutdown.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            signal_token.cancel();
        });

        self.run_until(shutdown).await
    }

    /// Start the watcher and poll until `shutdown` is cancelled
    ///
    /// This method:
    /// 1. Logs startup information
    /// 2. Builds the shared HTTP client
    /// 3. Verifies the Telegram configuration
    /// 4. Builds one watch per enabled vendor
    /// 5. Announces the start to every chat
    /// 6. Runs the poll loop
    ///
    /// # Errors
    /// Startup failures only (HTTP client, rejected bot token). Once polling
    /// has started, errors are logged and never end the loop.
    pub async fn run_until(self, shutdown: CancellationToken) -> AppResult<()> {
        let settings = &self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            environment = %Environment::from_env().as_str(),
            "Application starting"
        );

        tracing::info!(
            interval_secs = settings.monitor.interval_secs,
            cooldown_secs = settings.monitor.cooldown_secs,
            fetch_timeout_secs = settings.monitor.fetch_timeout_secs,
            "Monitor configuration loaded"
        );
        if settings.monitor.cooldown_shorter_than_interval() {
            tracing::warn!(
                interval_secs = settings.monitor.interval_secs,
                cooldown_secs = settings.monitor.cooldown_secs,
                "Cooldown is shorter than the poll interval; open seats will alert on every tick"
            );
        }

        tracing::info!(
            level = %settings.logger.level,
            console_enabled = %settings.logger.console.enabled,
            file_enabled = %settings.logger.file.enabled,
            "Logger configuration loaded"
        );

        // Token itself stays out of the logs
        tracing::info!(
            recipients = settings.telegram.chat_ids.len(),
            token_configured = %(!settings.telegram.token.is_empty()),
            verify_token = settings.telegram.verify_token,
            "Telegram configuration loaded"
        );

        let client = build_http_client(&settings.http)?;

        let provider = TelegramProvider::new(client.clone(), settings.telegram.clone());
        provider.validate_config().await.inspect_err(|e| {
            tracing::error!(error = %e, "Telegram configuration validation failed");
        })?;
        let notifier = Notifier::new(Arc::new(provider), settings.telegram.chat_ids.clone());

        let sources = build_sources(&settings.sources, &client);
        for source in &sources {
            tracing::info!(vendor = %source.vendor(), "Source enabled");
        }
        let mut poller = build_poll_loop(sources, &notifier, &settings.monitor);

        tracing::info!("Start checking...");
        if settings.monitor.announce_start {
            let report = notifier.broadcast(&start_message()).await;
            if !report.is_complete() {
                tracing::warn!(
                    failed = report.failures.len(),
                    "Start announcement did not reach every chat"
                );
            }
        }

        poller.run(shutdown).await;

        tracing::info!("Watcher shutdown complete");
        Ok(())
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
