//! Time sources for challenge timing
//!
//! All timestamps are whole seconds since a clock-specific epoch. Only
//! differences between readings of the same clock are meaningful.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Instant;

/// Monotonic seconds source
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Seconds elapsed since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose epoch is now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> i64 {
        // floor of elapsed seconds
        self.origin.elapsed().as_secs() as i64
    }
}

/// Clock driven by hand, for tests and simulations
#[derive(Debug, Default)]
pub struct ManualClock {
    secs: AtomicI64,
}

impl ManualClock {
    /// Create a clock reading `start`
    pub fn new(start: i64) -> Self {
        Self {
            secs: AtomicI64::new(start),
        }
    }

    /// Jump to an absolute reading
    pub fn set(&self, secs: i64) {
        self.secs.store(secs, Ordering::SeqCst);
    }

    /// Move forward by `secs`
    pub fn advance(&self, secs: i64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.secs.load(Ordering::SeqCst)
    }
}
