//! Challenge Timing Tracker
//!
//! Keeps a local first-seen / last-update timestamp per challenge id,
//! independent of anything the backend reports.
//!
//! - A challenge is first seen on the first list fetch that contains it.
//! - Repeated fetches keep the original timestamps.
//! - Ids missing from the latest fetch are forgotten; if they come back they
//!   start a fresh record.
//! - A progress update after more than a day of silence restarts the
//!   challenge's tracked lifetime.

use crate::clock::{Clock, MonotonicClock};
use crate::error::TrackerError;
use crate::types::Challenge;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Gap after which a progress update resets first-seen (24 hours)
pub const STALE_AFTER_SECS: i64 = 24 * 60 * 60;

/// Timing state for one tracked challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimingRecord {
    pub first_seen: i64,
    pub last_update: i64,
}

/// Point-in-time view of one record with derived durations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimingSnapshot {
    pub id: String,
    pub first_seen: i64,
    pub last_update: i64,
    pub elapsed_secs: i64,
    pub since_update_secs: i64,
}

/// Tracks when challenges were first seen and last updated
pub struct TimingTracker {
    clock: Arc<dyn Clock>,
    /// Challenge id -> timing, replaced wholesale on reconcile
    records: RwLock<HashMap<String, TimingRecord>>,
}

impl TimingTracker {
    /// Create an empty tracker reading time from `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Merge a freshly fetched challenge set into the tracked set.
    ///
    /// Known ids keep their record, new ids start at `now()`, ids absent
    /// from `challenges` are dropped. Calling this twice with the same set
    /// changes nothing.
    pub fn reconcile(&self, challenges: &[Challenge]) {
        let now = self.clock.now();
        let mut records = self.records.write();

        let mut updated = HashMap::with_capacity(challenges.len());
        let mut added = 0usize;
        for challenge in challenges {
            if updated.contains_key(&challenge.id) {
                continue;
            }
            let record = match records.get(&challenge.id) {
                Some(existing) => *existing,
                None => {
                    added += 1;
                    TimingRecord {
                        first_seen: now,
                        last_update: now,
                    }
                }
            };
            updated.insert(challenge.id.clone(), record);
        }

        let dropped = records.keys().filter(|id| !updated.contains_key(*id)).count();
        *records = updated;

        debug!(
            "Reconciled {} challenges ({} new, {} dropped)",
            records.len(),
            added,
            dropped
        );
    }

    /// Seconds since the challenge was first seen
    pub fn elapsed_time(&self, id: &str) -> Result<i64, TrackerError> {
        let record = self.lookup(id)?;
        Ok(self.clock.now() - record.first_seen)
    }

    /// Seconds since the last confirmed progress update
    pub fn time_since_last_update(&self, id: &str) -> Result<i64, TrackerError> {
        let record = self.lookup(id)?;
        Ok(self.clock.now() - record.last_update)
    }

    /// Record a confirmed progress update.
    ///
    /// If the previous update is older than [`STALE_AFTER_SECS`] the
    /// challenge counts as re-engaged and its first-seen time moves to now.
    pub fn mark_update(&self, id: &str) -> Result<(), TrackerError> {
        let now = self.clock.now();
        let mut records = self.records.write();

        let Some(record) = records.get_mut(id) else {
            return Err(not_tracked(id));
        };

        if now - record.last_update > STALE_AFTER_SECS {
            debug!(
                "Challenge {} idle for {}s, restarting its timing",
                id,
                now - record.last_update
            );
            record.first_seen = now;
        }
        record.last_update = now;

        Ok(())
    }

    /// Get the timing record for a challenge
    pub fn record(&self, id: &str) -> Option<TimingRecord> {
        self.records.read().get(id).copied()
    }

    /// Check if a challenge has a timing record
    pub fn is_tracked(&self, id: &str) -> bool {
        self.records.read().contains_key(id)
    }

    /// Get the number of tracked challenges
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if nothing is tracked
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Tracked ids in sorted order
    pub fn tracked_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.records.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Snapshot of every record, sorted by id
    pub fn report(&self) -> Vec<TimingSnapshot> {
        let now = self.clock.now();
        let mut snapshots: Vec<TimingSnapshot> = self
            .records
            .read()
            .iter()
            .map(|(id, record)| TimingSnapshot {
                id: id.clone(),
                first_seen: record.first_seen,
                last_update: record.last_update,
                elapsed_secs: now - record.first_seen,
                since_update_secs: now - record.last_update,
            })
            .collect();
        snapshots.sort_by(|a, b| a.id.cmp(&b.id));
        snapshots
    }

    /// Forget every record
    pub fn clear(&self) {
        self.records.write().clear();
    }

    fn lookup(&self, id: &str) -> Result<TimingRecord, TrackerError> {
        self.record(id).ok_or_else(|| not_tracked(id))
    }
}

impl Default for TimingTracker {
    fn default() -> Self {
        Self::new(Arc::new(MonotonicClock::new()))
    }
}

fn not_tracked(id: &str) -> TrackerError {
    warn!("Challenge {} was not added to timing tracking", id);
    TrackerError::NotTracked(id.to_string())
}
