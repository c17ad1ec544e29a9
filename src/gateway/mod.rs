//! Agent decision gateway.
//!
//! The engine treats the capability that produces utterances, votes, and
//! night proposals as a black box behind this trait. Implementations are
//! invoked once per turn/vote/proposal; the engine owns the timeout and the
//! fencing of late responses.

pub mod random;
pub mod scripted;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Phase, PlayerId};
use crate::events::GameId;

pub use random::RandomGateway;
pub use scripted::ScriptedGateway;

#[derive(Debug, Clone, Error)]
pub enum AgentError {
    /// The agent reported it could not decide in time. The engine also
    /// enforces its own deadline; either way the default action is used.
    #[error("agent decision timed out")]
    Timeout,
    #[error("agent failure: {0}")]
    Failure(String),
}

/// What the engine can see of a game when asking an agent to decide.
/// Wolf-private context travels in [`RequestKind::NightProposal`], never
/// here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game_id: GameId,
    pub phase: Phase,
    pub day_count: u32,
    pub alive_players: Vec<PlayerRef>,
    /// Recent public transcript lines (speeches, votes, eliminations).
    pub transcript: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub display_name: String,
}

/// One entry in a night's wolf-only coordination channel. Constructed per
/// night and shown only to wolves queried later the same night.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WolfMessage {
    pub wolf: PlayerId,
    pub target: Option<PlayerId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RequestKind {
    Speak,
    Vote {
        candidates: Vec<PlayerId>,
    },
    NightProposal {
        candidates: Vec<PlayerId>,
        prior: Vec<WolfMessage>,
    },
}

impl RequestKind {
    pub fn name(&self) -> &'static str {
        match self {
            RequestKind::Speak => "speak",
            RequestKind::Vote { .. } => "vote",
            RequestKind::NightProposal { .. } => "night_proposal",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AgentAction {
    Speak(String),
    /// `None` is an explicit abstention.
    Vote(Option<PlayerId>),
    NightProposal(Option<PlayerId>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub action: AgentAction,
    pub confidence: Option<f32>,
}

impl Decision {
    pub fn new(action: AgentAction) -> Self {
        Self {
            action,
            confidence: None,
        }
    }
}

/// External decision-making capability, one call per suspension point.
#[async_trait]
pub trait AgentGateway: Send + Sync + 'static {
    async fn decide(
        &self,
        snapshot: GameSnapshot,
        player_id: PlayerId,
        request: RequestKind,
    ) -> Result<Decision, AgentError>;
}
