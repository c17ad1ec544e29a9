//! Engine error taxonomy.
//!
//! These are the errors surfaced synchronously to callers of the registry.
//! Agent timeouts/failures and persistence write failures are absorbed
//! inside the engine (default actions, retries) and never appear here;
//! stale agent responses are fenced off silently.

use thiserror::Error;

use crate::events::GameId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Invalid game configuration (e.g. player count out of range).
    #[error("configuration error: {detail}")]
    Config { detail: String },

    /// Admission control: the registry is at its concurrent-session limit.
    #[error("capacity exceeded: at most {limit} concurrent games")]
    Capacity { limit: usize },

    /// Unknown (or already evicted) game id.
    #[error("game not found: {game_id}")]
    NotFound { game_id: GameId },

    /// Action submitted in the wrong phase or by an ineligible actor;
    /// rejected with no state change.
    #[error("invalid state: {detail}")]
    State { detail: String },
}

impl EngineError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn capacity(limit: usize) -> Self {
        Self::Capacity { limit }
    }

    pub fn not_found(game_id: GameId) -> Self {
        Self::NotFound { game_id }
    }

    pub fn state(detail: impl Into<String>) -> Self {
        Self::State {
            detail: detail.into(),
        }
    }
}
