//! Challenge Store
//!
//! Client-facing operations over the challenge feed. Owns the player
//! context, the last fetched list and the [`TimingTracker`] fed by it.
//!
//! Transport failures never escape as panics:
//! - `fetch_list` returns an empty list
//! - `fetch_single` returns `None`
//! - `update_progress` / `claim` return `Err` (or run `on_failure`)
//!
//! Local state only changes after the backend confirms.
//!
//! `fetch_single` results are not added to timing tracking; only list
//! fetches decide which challenges are tracked.

use crate::clock::{Clock, MonotonicClock};
use crate::error::TransportError;
use crate::tracker::TimingTracker;
use crate::transport::ChallengeTransport;
use crate::types::{clamp_progress, Challenge, PlayerInfo};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

type Continuation<'a> = Box<dyn FnOnce() + Send + 'a>;

/// Optional success / failure callbacks for the callback-style operations.
///
/// Exactly one of them runs per call. A missing callback is skipped.
#[derive(Default)]
pub struct Continuations<'a> {
    on_success: Option<Continuation<'a>>,
    on_failure: Option<Continuation<'a>>,
}

impl<'a> Continuations<'a> {
    /// Create with no callbacks
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` when the operation succeeds
    pub fn on_success(mut self, f: impl FnOnce() + Send + 'a) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    /// Run `f` when the operation fails
    pub fn on_failure(mut self, f: impl FnOnce() + Send + 'a) -> Self {
        self.on_failure = Some(Box::new(f));
        self
    }

    fn settle<T, E>(self, result: &Result<T, E>) {
        let continuation = match result {
            Ok(_) => self.on_success,
            Err(_) => self.on_failure,
        };
        if let Some(f) = continuation {
            f();
        }
    }
}

/// Challenge operations for a single player
pub struct ChallengeStore<T> {
    transport: T,
    player: PlayerInfo,
    tracker: TimingTracker,
    /// Last successfully fetched list
    challenges: RwLock<Vec<Challenge>>,
}

impl<T: ChallengeTransport> ChallengeStore<T> {
    /// Create a store timed by a monotonic clock
    pub fn new(transport: T, player: PlayerInfo) -> Self {
        Self::with_clock(transport, player, Arc::new(MonotonicClock::new()))
    }

    /// Create a store timed by the given clock
    pub fn with_clock(transport: T, player: PlayerInfo, clock: Arc<dyn Clock>) -> Self {
        Self {
            transport,
            player,
            tracker: TimingTracker::new(clock),
            challenges: RwLock::new(Vec::new()),
        }
    }

    /// Get the player context sent with every call
    pub fn player(&self) -> &PlayerInfo {
        &self.player
    }

    /// Replace the player context
    pub fn set_player(&mut self, player: PlayerInfo) {
        self.player = player;
    }

    /// Get the timing tracker fed by list fetches
    pub fn tracker(&self) -> &TimingTracker {
        &self.tracker
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Copy of the last fetched list
    pub fn challenges(&self) -> Vec<Challenge> {
        self.challenges.read().clone()
    }

    /// Challenge from the last fetched list
    pub fn cached(&self, id: &str) -> Option<Challenge> {
        self.challenges.read().iter().find(|c| c.id == id).cloned()
    }

    /// Fetch the player's challenges and reconcile timing tracking.
    ///
    /// Returns an empty list when the backend is unreachable or refuses;
    /// tracking and the cached list are left as they were.
    pub async fn fetch_list(&self) -> Vec<Challenge> {
        match self.transport.list_challenges(&self.player).await {
            Ok(challenges) => {
                self.tracker.reconcile(&challenges);
                *self.challenges.write() = challenges.clone();
                info!(
                    "Fetched {} challenges for player {}",
                    challenges.len(),
                    self.player.player_id
                );
                challenges
            }
            Err(e) => {
                warn!("Failed to fetch challenge list: {}", e);
                Vec::new()
            }
        }
    }

    /// Fetch one challenge by id. Any failure yields `None`.
    pub async fn fetch_single(&self, id: &str) -> Option<Challenge> {
        match self.transport.get_challenge(&self.player, id).await {
            Ok(challenge) => Some(challenge),
            Err(e) => {
                debug!("Challenge {} unavailable: {}", id, e);
                None
            }
        }
    }

    /// Report progress for `challenge`, clamped to 0 - 100.
    ///
    /// On success the update is marked in timing tracking and the clamped
    /// value is written to `challenge` and to the cached list. On failure
    /// nothing local changes.
    pub async fn update_progress(
        &self,
        challenge: &mut Challenge,
        progress: i32,
    ) -> Result<(), TransportError> {
        let progress = clamp_progress(progress);

        if let Err(e) = self
            .transport
            .post_progress(&self.player, &challenge.id, progress)
            .await
        {
            warn!("Progress update for {} failed: {}", challenge.id, e);
            return Err(e);
        }

        if let Err(e) = self.tracker.mark_update(&challenge.id) {
            debug!("Progress for {} applied without timing: {}", challenge.id, e);
        }

        challenge.progress = progress;
        if let Some(cached) = self
            .challenges
            .write()
            .iter_mut()
            .find(|c| c.id == challenge.id)
        {
            cached.progress = progress;
        }

        debug!("Challenge {} progress set to {}", challenge.id, progress);
        Ok(())
    }

    /// Mark `challenge` as claimed. Progress and tracking are untouched.
    pub async fn claim(&self, challenge: &Challenge) -> Result<(), TransportError> {
        match self.transport.post_claim(&self.player, &challenge.id).await {
            Ok(()) => {
                info!("Challenge {} claimed", challenge.id);
                Ok(())
            }
            Err(e) => {
                warn!("Claim for {} failed: {}", challenge.id, e);
                Err(e)
            }
        }
    }

    /// [`update_progress`](Self::update_progress) with callbacks
    pub async fn update_progress_then(
        &self,
        challenge: &mut Challenge,
        progress: i32,
        continuations: Continuations<'_>,
    ) {
        let result = self.update_progress(challenge, progress).await;
        continuations.settle(&result);
    }

    /// [`claim`](Self::claim) with callbacks
    pub async fn claim_then(&self, challenge: &Challenge, continuations: Continuations<'_>) {
        let result = self.claim(challenge).await;
        continuations.settle(&result);
    }
}
