//! Seat monitoring: dedup cache, per-vendor watches and the poll loop.

mod dedup;
mod format;
mod poller;
mod watch;

pub use dedup::{DedupCache, Decision};
pub use format::{describe_record, render_alert, start_message};
pub use poller::{PollLoop, TickReport};
pub use watch::{VendorTickReport, VendorWatch};

use crate::config::MonitorConfig;
use crate::external::ticketing::SeatSource;
use crate::services::notifications::Notifier;

/// Wrap every source in a watch with its own cache, sharing one notifier
pub fn build_poll_loop(
    sources: Vec<Box<dyn SeatSource>>,
    notifier: &Notifier,
    config: &MonitorConfig,
) -> PollLoop {
    let watches = sources
        .into_iter()
        .map(|source| {
            VendorWatch::new(
                source,
                notifier.clone(),
                config.cooldown(),
                config.fetch_timeout(),
            )
        })
        .collect();
    PollLoop::new(watches, config.interval())
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::error::{AppError, AppResult};
    use crate::external::ticketing::{SeatRecord, SeatSource, Vendor};

    /// Source replaying queued responses; empty once the queue is drained
    pub struct ScriptedSource {
        vendor: Vendor,
        responses: Mutex<VecDeque<AppResult<Vec<SeatRecord>>>>,
        delay: Option<Duration>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedSource {
        pub fn new(vendor: Vendor) -> Self {
            Self {
                vendor,
                responses: Mutex::new(VecDeque::new()),
                delay: None,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn then_ok(self, records: Vec<SeatRecord>) -> Self {
            self.responses.lock().unwrap().push_back(Ok(records));
            self
        }

        pub fn then_err(self, error: AppError) -> Self {
            self.responses.lock().unwrap().push_back(Err(error));
            self
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn calls(&self) -> Arc<AtomicUsize> {
            self.calls.clone()
        }
    }

    #[async_trait]
    impl SeatSource for ScriptedSource {
        fn vendor(&self) -> Vendor {
            self.vendor
        }

        async fn fetch(&self) -> AppResult<Vec<SeatRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let next = self.responses.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Ok(Vec::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::ticketing::Vendor;
    use crate::services::notifications::testing::RecordingProvider;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_build_poll_loop_one_watch_per_source() {
        let notifier = Notifier::new(Arc::new(RecordingProvider::default()), vec![]);
        let sources: Vec<Box<dyn SeatSource>> = vec![
            Box::new(testing::ScriptedSource::new(Vendor::Interpark)),
            Box::new(testing::ScriptedSource::new(Vendor::Ticketlink)),
        ];
        let config = MonitorConfig {
            cooldown_secs: 60,
            ..MonitorConfig::default()
        };

        let poller = build_poll_loop(sources, &notifier, &config);
        let watches = poller.watches();
        assert_eq!(watches.len(), 2);
        assert_eq!(watches[0].vendor(), Vendor::Interpark);
        assert_eq!(watches[1].cache().cooldown(), Duration::from_secs(60));
        assert!(watches[1].cache().is_empty());
    }
}
