//! Speaking rotation for day discussion.

use crate::domain::{PlayerId, Roster};

/// Drives one speaking round at a time over a rotation order fixed at game
/// start. The cursor only ever advances; timeouts substitute a default
/// action upstream but never skip or reorder a queue position.
#[derive(Debug)]
pub struct TurnScheduler {
    order: Vec<PlayerId>,
    cursor: usize,
}

impl TurnScheduler {
    pub fn new(order: Vec<PlayerId>) -> Self {
        Self { order, cursor: 0 }
    }

    /// Reset the cursor for a fresh round.
    pub fn begin_round(&mut self) {
        self.cursor = 0;
    }

    /// Next living speaker, advancing past seats whose players have died.
    /// `None` once the cursor wraps: the round is complete.
    pub fn next_speaker(&mut self, roster: &Roster) -> Option<PlayerId> {
        while self.cursor < self.order.len() {
            let id = self.order[self.cursor];
            self.cursor += 1;
            if roster.is_alive(id) {
                return Some(id);
            }
        }
        None
    }
}
