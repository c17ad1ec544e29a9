//! Durable event storage boundary.
//!
//! The engine only ever appends, in order, and reads full histories back.
//! The actual storage engine lives behind [`PersistenceSink`]; writes that
//! fail are retried by the forwarder and never block gameplay.

pub mod forwarder;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::events::{Event, GameId};

pub use forwarder::{spawn_forwarder, ForwarderHandle};
pub use memory::InMemorySink;

#[derive(Debug, Clone, Error)]
#[error("persistence write failed: {detail}")]
pub struct PersistenceError {
    pub detail: String,
}

impl PersistenceError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Durable, lossless, in-order event store for completed and in-flight
/// games.
#[async_trait]
pub trait PersistenceSink: Send + Sync + 'static {
    async fn append(&self, game_id: GameId, event: Event) -> Result<(), PersistenceError>;

    /// Full ordered history for a game; the replay source of truth.
    async fn load_history(&self, game_id: GameId) -> Result<Vec<Event>, PersistenceError>;
}
