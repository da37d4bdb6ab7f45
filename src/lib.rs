//! Challenge feed client for Platform Network games
//!
//! Fetches the challenges available to a player, reports progress, claims
//! finished challenges and keeps local timing analytics for each challenge
//! (when it was first seen, when it was last updated).
//!
//! ## Module Structure
//!
//! - `types`: Payload types (Challenge, Asset, PlayerInfo)
//! - `clock`: Injectable monotonic time sources
//! - `tracker`: First-seen / last-update reconciliation
//! - `transport`: Backend seam used by the store
//! - `client`: HTTP implementation of the transport
//! - `store`: Client-facing fetch / progress / claim operations
//! - `config`: Backend connection settings
//! - `error`: Error types
//!
//! ```rust,no_run
//! use challenge_sync::{ChallengeStore, ClientConfig, HttpTransport, PlayerInfo};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new(&ClientConfig::from_env())?;
//! let store = ChallengeStore::new(transport, PlayerInfo::new("Country", 18, "action", "user"));
//!
//! let mut challenges = store.fetch_list().await;
//! if let Some(challenge) = challenges.first_mut() {
//!     store.update_progress(challenge, 50).await?;
//!     println!("tracked for {}s", store.tracker().elapsed_time(&challenge.id)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod store;
pub mod tracker;
pub mod transport;
pub mod types;

pub use client::HttpTransport;
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::ClientConfig;
pub use error::{TrackerError, TransportError};
pub use store::{ChallengeStore, Continuations};
pub use tracker::{TimingRecord, TimingSnapshot, TimingTracker, STALE_AFTER_SECS};
pub use transport::ChallengeTransport;
pub use types::{clamp_progress, Asset, Challenge, PlayerInfo, MAX_PROGRESS, MIN_PROGRESS};
