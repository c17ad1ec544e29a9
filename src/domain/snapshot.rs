//! Replayable session snapshot.
//!
//! Outcomes must be reproducible from the event log alone: folding a game's
//! ordered history through [`SessionSnapshot::replay`] reconstructs the same
//! final state the live session reached.

use serde::{Deserialize, Serialize};

use crate::domain::phase::{Phase, Winner};
use crate::domain::player::Player;
use crate::events::{Event, EventBody};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub day_count: u32,
    pub players: Vec<Player>,
    pub winner: Option<Winner>,
}

impl SessionSnapshot {
    pub fn empty() -> Self {
        Self {
            phase: Phase::Lobby,
            day_count: 0,
            players: Vec::new(),
            winner: None,
        }
    }

    /// Fold one event into the snapshot. Speaker turns and player actions
    /// carry no state beyond what eliminations and phase changes already
    /// record.
    pub fn apply(&mut self, event: &Event) {
        match &event.body {
            EventBody::GameStarted { players } => {
                self.players = players.clone();
            }
            EventBody::PhaseChange {
                new_phase,
                day_count,
            } => {
                self.phase = *new_phase;
                self.day_count = *day_count;
            }
            EventBody::PlayerEliminated { player_id, .. } => {
                if let Some(p) = self.players.get_mut(*player_id as usize) {
                    p.alive = false;
                }
            }
            EventBody::GameOver {
                winner,
                role_reveal,
            } => {
                self.phase = Phase::GameOver;
                self.winner = Some(*winner);
                self.players = role_reveal.clone();
            }
            EventBody::SpeakerTurn { .. } | EventBody::PlayerAction { .. } => {}
        }
    }

    /// Reconstruct the final snapshot from an ordered event history.
    pub fn replay<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        let mut snapshot = Self::empty();
        for event in events {
            snapshot.apply(event);
        }
        snapshot
    }
}
