use std::time::Duration;

use tokio::time::Instant;

use super::dedup::DedupCache;
use super::format::{describe_record, render_alert};
use crate::error::AppError;
use crate::external::ticketing::{SeatRecord, SeatSource, Vendor};
use crate::services::notifications::Notifier;

/// Outcome of one vendor within a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorTickReport {
    pub vendor: Vendor,
    /// Records returned by the fetch (0 when it failed)
    pub records: usize,
    /// Records that passed the dedup cache and were broadcast
    pub notified: usize,
    /// Recipients that could not be reached, summed over every alert
    pub delivery_failures: usize,
    /// Fetch error, if the vendor contributed nothing this tick
    pub error: Option<String>,
}

impl VendorTickReport {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// One vendor source together with the dedup cache it exclusively owns
pub struct VendorWatch {
    source: Box<dyn SeatSource>,
    cache: DedupCache,
    notifier: Notifier,
    fetch_timeout: Duration,
}

impl VendorWatch {
    pub fn new(
        source: Box<dyn SeatSource>,
        notifier: Notifier,
        cooldown: Duration,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            source,
            cache: DedupCache::new(cooldown),
            notifier,
            fetch_timeout,
        }
    }

    pub fn vendor(&self) -> Vendor {
        self.source.vendor()
    }

    pub fn cache(&self) -> &DedupCache {
        &self.cache
    }

    async fn fetch(&self) -> Result<Vec<SeatRecord>, AppError> {
        match tokio::time::timeout(self.fetch_timeout, self.source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Fetch {
                vendor: self.vendor().to_string(),
                message: format!("timed out after {}s", self.fetch_timeout.as_secs_f32()),
                source: None,
            }),
        }
    }

    /// Fetch, log every record, dedup, and broadcast alerts.
    ///
    /// Never fails: a fetch error is logged and reported, and delivery
    /// failures are handled per recipient by the notifier.
    pub async fn run_tick(&mut self) -> VendorTickReport {
        let vendor = self.vendor();
        let mut report = VendorTickReport {
            vendor,
            records: 0,
            notified: 0,
            delivery_failures: 0,
            error: None,
        };

        let records = match self.fetch().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(vendor = %vendor, error = %e, "Failed to check seats");
                report.error = Some(e.to_string());
                return report;
            }
        };
        report.records = records.len();

        let now = Instant::now();
        let checked_at = jiff::Zoned::now();
        for record in &records {
            let notify = self.cache.should_notify(record, now);
            tracing::info!(
                vendor = %vendor,
                scope = %record.identity.scope,
                grade = %record.identity.grade,
                name = %record.display_name,
                remaining = record.remaining,
                notify,
                "{}",
                describe_record(record)
            );

            if notify {
                let outcome = self
                    .notifier
                    .broadcast(&render_alert(record, &checked_at))
                    .await;
                report.notified += 1;
                report.delivery_failures += outcome.failures.len();
            }
        }

        report
    }
}
