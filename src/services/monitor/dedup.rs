//! Per-vendor notification dedup cache.
//!
//! Maps a seat identity to the instant it was last stamped. An identity is
//! stamped the first time it is seen (whatever its count) and again each time
//! the cooldown has elapsed since the previous stamp, independent of count.
//! Only a stamping observation with seats remaining notifies. Entries are
//! never evicted; the key space is the handful of grades per schedule.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::external::ticketing::{SeatIdentity, SeatRecord};

/// How an observation relates to the identity's last stamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// No entry yet
    FirstSighting,
    /// Entry older than (or exactly) the cooldown
    CooldownElapsed,
    /// Entry younger than the cooldown
    Suppressed,
}

impl Decision {
    /// Whether the observation stamps the cache and may notify
    pub fn proceeds(self) -> bool {
        !matches!(self, Decision::Suppressed)
    }
}

#[derive(Debug, Clone)]
pub struct DedupCache {
    cooldown: Duration,
    entries: HashMap<SeatIdentity, Instant>,
}

impl DedupCache {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            entries: HashMap::new(),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Classify an observation without touching the cache
    pub fn decide(&self, identity: &SeatIdentity, now: Instant) -> Decision {
        match self.entries.get(identity) {
            None => Decision::FirstSighting,
            Some(stamp) if now.saturating_duration_since(*stamp) >= self.cooldown => {
                Decision::CooldownElapsed
            }
            Some(_) => Decision::Suppressed,
        }
    }

    /// Classify an observation and stamp the identity when it proceeds
    pub fn observe(&mut self, identity: &SeatIdentity, now: Instant) -> Decision {
        let decision = self.decide(identity, now);
        if decision.proceeds() {
            self.entries.insert(identity.clone(), now);
        }
        decision
    }

    /// Record the observation and report whether it warrants a notification
    pub fn should_notify(&mut self, record: &SeatRecord, now: Instant) -> bool {
        self.observe(&record.identity, now).proceeds() && record.is_available()
    }

    pub fn last_stamp(&self, identity: &SeatIdentity) -> Option<Instant> {
        self.entries.get(identity).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
