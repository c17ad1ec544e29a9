//! Per-game event protocol: the totally-ordered record every state mutation
//! becomes, consumed by live subscribers and the persistence sink alike.

pub mod broadcaster;
pub mod log;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{Phase, Player, PlayerId, Winner};

pub use broadcaster::{Broadcaster, Subscription};
pub use log::EventLog;

pub type GameId = Uuid;

/// One entry in a game's append-only history.
///
/// `seq` starts at 0 and is gapless and strictly increasing within a game;
/// no ordering is guaranteed or required across games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub seq: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(flatten)]
    pub body: EventBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventBody {
    /// Game left the lobby. Carries the full roster so that replaying the
    /// history alone reconstructs the final state.
    GameStarted { players: Vec<Player> },
    PhaseChange {
        new_phase: Phase,
        day_count: u32,
    },
    SpeakerTurn {
        player_id: PlayerId,
    },
    PlayerAction {
        player_id: PlayerId,
        action: ActionPayload,
    },
    PlayerEliminated {
        player_id: PlayerId,
        cause: EliminationCause,
    },
    GameOver {
        winner: Winner,
        role_reveal: Vec<Player>,
    },
}

/// What a player did on their turn.
///
/// `defaulted` marks actions the engine substituted after an agent timeout
/// or failure; the substitution itself is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionPayload {
    Speak {
        text: String,
        defaulted: bool,
    },
    Vote {
        /// `None` records an abstention, excluded from the tally.
        target: Option<PlayerId>,
        defaulted: bool,
    },
    NightProposal {
        target: Option<PlayerId>,
        defaulted: bool,
    },
}

impl ActionPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            ActionPayload::Speak { .. } => "speak",
            ActionPayload::Vote { .. } => "vote",
            ActionPayload::NightProposal { .. } => "night_proposal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EliminationCause {
    Vote,
    Night,
}
