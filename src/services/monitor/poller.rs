use std::time::Duration;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use super::watch::{VendorTickReport, VendorWatch};
use crate::external::ticketing::Vendor;

/// Outcome of one pass over every vendor
#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick_id: Uuid,
    pub vendors: Vec<VendorTickReport>,
}

impl TickReport {
    pub fn vendor(&self, vendor: Vendor) -> Option<&VendorTickReport> {
        self.vendors.iter().find(|report| report.vendor == vendor)
    }

    pub fn notified(&self) -> usize {
        self.vendors.iter().map(|report| report.notified).sum()
    }

    pub fn failed_vendors(&self) -> usize {
        self.vendors.iter().filter(|report| report.failed()).count()
    }
}

/// Fixed-interval scheduler over a fixed set of vendor watches.
///
/// Each tick polls every vendor concurrently and waits for all of them
/// before sleeping. Watches are borrowed mutably for the duration of a tick,
/// so each dedup cache has exactly one writer.
pub struct PollLoop {
    watches: Vec<VendorWatch>,
    interval: Duration,
}

impl PollLoop {
    pub fn new(watches: Vec<VendorWatch>, interval: Duration) -> Self {
        Self { watches, interval }
    }

    pub fn watches(&self) -> &[VendorWatch] {
        &self.watches
    }

    pub async fn tick(&mut self) -> TickReport {
        let tick_id = Uuid::new_v4();
        let span = tracing::info_span!("tick", tick_id = %tick_id);

        let vendors = join_all(self.watches.iter_mut().map(|watch| watch.run_tick()))
            .instrument(span.clone())
            .await;

        let report = TickReport { tick_id, vendors };
        span.in_scope(|| {
            tracing::debug!(
                notified = report.notified(),
                failed_vendors = report.failed_vendors(),
                "Tick complete"
            );
        });
        report
    }

    /// Tick until `shutdown` is cancelled.
    ///
    /// Cancellation is observed between ticks and during the sleep; a tick
    /// in progress always runs to completion.
    pub async fn run(&mut self, shutdown: CancellationToken) {
        tracing::info!(
            vendors = self.watches.len(),
            interval_secs = self.interval.as_secs_f32(),
            "Poll loop started"
        );

        while !shutdown.is_cancelled() {
            self.tick().await;

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        tracing::info!("Poll loop stopped");
    }
}
