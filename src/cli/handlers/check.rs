//! Check command handler
//!
//! Fetches every selected vendor once and prints the records. Nothing is
//! cached and no alert is sent.

use futures::future::join_all;

use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::external::build_http_client;
use crate::external::ticketing::{SeatRecord, SeatSource, Vendor, build_sources};
use crate::services::monitor::describe_record;

/// Handler for the check command
pub struct CheckCommandHandler {
    config: Settings,
    only: Option<Vendor>,
}

impl CheckCommandHandler {
    /// Create a new check command handler
    ///
    /// # Arguments
    /// * `config` - Validated settings
    /// * `only` - Restrict the check to one vendor
    pub fn new(config: Settings, only: Option<Vendor>) -> Self {
        Self { config, only }
    }

    /// Fetch and print the current seat counts
    ///
    /// # Errors
    /// - The selected vendor is not enabled
    /// - Any vendor fetch failed (after every result has been printed)
    pub async fn execute(&self) -> AppResult<()> {
        let client = build_http_client(&self.config.http)?;
        let sources = self.select_sources(build_sources(&self.config.sources, &client))?;

        let results = join_all(sources.iter().map(|source| async move {
            (source.vendor(), source.fetch().await)
        }))
        .await;

        let mut first_error = None;
        for (vendor, result) in results {
            match result {
                Ok(records) => print_records(vendor, &records),
                Err(e) => {
                    eprintln!("✗ {}: {}", vendor, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn select_sources(
        &self,
        sources: Vec<Box<dyn SeatSource>>,
    ) -> AppResult<Vec<Box<dyn SeatSource>>> {
        let Some(vendor) = self.only else {
            return Ok(sources);
        };

        let selected: Vec<_> = sources
            .into_iter()
            .filter(|source| source.vendor() == vendor)
            .collect();
        if selected.is_empty() {
            return Err(AppError::Validation {
                field: "source".to_string(),
                reason: format!("{} is not enabled in the configuration", vendor),
            });
        }
        Ok(selected)
    }
}

fn print_records(vendor: Vendor, records: &[SeatRecord]) {
    let available = records.iter().filter(|r| r.is_available()).count();
    println!(
        "✓ {}: {} record(s), {} with seats",
        vendor,
        records.len(),
        available
    );
    for record in records {
        println!("  {}", describe_record(record));
    }
}
