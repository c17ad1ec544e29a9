//! In-memory sink: the default store for tests and single-process use.

use async_trait::async_trait;
use dashmap::DashMap;

use super::{PersistenceError, PersistenceSink};
use crate::events::{Event, GameId};

#[derive(Debug, Default)]
pub struct InMemorySink {
    histories: DashMap<GameId, Vec<Event>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of games with at least one stored event.
    pub fn game_count(&self) -> usize {
        self.histories.len()
    }
}

#[async_trait]
impl PersistenceSink for InMemorySink {
    async fn append(&self, game_id: GameId, event: Event) -> Result<(), PersistenceError> {
        let mut history = self.histories.entry(game_id).or_default();
        if let Some(last) = history.last() {
            if event.seq != last.seq + 1 {
                return Err(PersistenceError::new(format!(
                    "out-of-order append for game {game_id}: got seq {} after {}",
                    event.seq, last.seq
                )));
            }
        } else if event.seq != 0 {
            return Err(PersistenceError::new(format!(
                "history for game {game_id} must start at seq 0, got {}",
                event.seq
            )));
        }
        history.push(event);
        Ok(())
    }

    async fn load_history(&self, game_id: GameId) -> Result<Vec<Event>, PersistenceError> {
        Ok(self
            .histories
            .get(&game_id)
            .map(|h| h.clone())
            .unwrap_or_default())
    }
}
