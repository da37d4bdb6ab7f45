//! Transport seam between the store and the challenge backend

use crate::error::TransportError;
use crate::types::{Challenge, PlayerInfo};
use async_trait::async_trait;

/// Remote operations the store depends on.
///
/// Every call carries the player's metadata. Any non-success outcome is an
/// `Err`; timeouts are the implementation's concern.
#[async_trait]
pub trait ChallengeTransport: Send + Sync {
    /// Challenges currently available to the player
    async fn list_challenges(&self, player: &PlayerInfo) -> Result<Vec<Challenge>, TransportError>;

    /// A single challenge by id
    async fn get_challenge(&self, player: &PlayerInfo, id: &str)
        -> Result<Challenge, TransportError>;

    /// Report progress (already clamped to 0 - 100)
    async fn post_progress(
        &self,
        player: &PlayerInfo,
        id: &str,
        progress: i32,
    ) -> Result<(), TransportError>;

    /// Mark a challenge as claimed
    async fn post_claim(&self, player: &PlayerInfo, id: &str) -> Result<(), TransportError>;
}
