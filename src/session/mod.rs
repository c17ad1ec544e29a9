//! Per-game session actor.
//!
//! Each game runs as one spawned task that owns every piece of mutable game
//! state: phase, roster, votes, proposals, the speaking cursor, and the
//! event log. All mutation flows through that task (single-writer
//! discipline); the rest of the process interacts only through the
//! [`SessionHandle`].

mod agent_calls;
mod phases;
mod scheduler;

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::{Phase, Player, Roster, SessionSnapshot, Winner};
use crate::errors::EngineError;
use crate::events::{Broadcaster, EventLog, GameId, Subscription};
use crate::gateway::AgentGateway;
use crate::persistence::{spawn_forwarder, ForwarderHandle, PersistenceSink};

pub use scheduler::TurnScheduler;

use agent_calls::FencedResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Lobby,
    Running,
    /// Terminal; entered only after the final event is acknowledged by the
    /// persistence sink.
    Completed,
    /// Terminal; the session was destroyed before finishing.
    Cancelled,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Cancelled)
    }

    /// Whether the session occupies a capacity slot.
    pub fn occupies_slot(self) -> bool {
        matches!(self, SessionStatus::Lobby | SessionStatus::Running)
    }
}

/// Shared-side view of a running session.
pub struct SessionHandle {
    id: GameId,
    players: Vec<Player>,
    broadcaster: Broadcaster,
    start_tx: Mutex<Option<oneshot::Sender<()>>>,
    cancel: CancellationToken,
    status_rx: watch::Receiver<SessionStatus>,
    final_snapshot: Arc<Mutex<Option<SessionSnapshot>>>,
}

impl SessionHandle {
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Roster snapshot taken at creation (roles are fixed for the game's
    /// lifetime; alive flags here are the initial ones).
    pub fn roster(&self) -> &[Player] {
        &self.players
    }

    pub fn status(&self) -> SessionStatus {
        *self.status_rx.borrow()
    }

    /// Live events from this point forward; history lives in the sink.
    pub fn subscribe(&self) -> Subscription {
        self.broadcaster.subscribe()
    }

    /// Kick the session out of the lobby. Exactly one start succeeds.
    pub fn start(&self) -> Result<(), EngineError> {
        let sender = self.start_tx.lock().take();
        match sender {
            Some(tx) => tx
                .send(())
                .map_err(|_| EngineError::state("game is no longer running")),
            None => Err(EngineError::state("game already started")),
        }
    }

    /// Request cancellation: outstanding agent calls are abandoned and all
    /// subscriber queues close once the task unwinds. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait until the session reaches a terminal status.
    pub async fn wait_terminal(&self) -> SessionStatus {
        let mut rx = self.status_rx.clone();
        loop {
            let status = *rx.borrow();
            if status.is_terminal() {
                return status;
            }
            if rx.changed().await.is_err() {
                return *rx.borrow();
            }
        }
    }

    /// Final state of a completed game, for replay verification.
    pub fn final_snapshot(&self) -> Option<SessionSnapshot> {
        self.final_snapshot.lock().clone()
    }
}

/// The actor's private state. Lives inside the spawned task only.
pub(crate) struct GameSession {
    id: GameId,
    config: EngineConfig,
    roster: Roster,
    phase: Phase,
    day_count: u32,
    scheduler: TurnScheduler,
    log: EventLog,
    gateway: Arc<dyn AgentGateway>,
    cancel: CancellationToken,
    status_tx: watch::Sender<SessionStatus>,
    forwarder: ForwarderHandle,
    transcript: Vec<String>,
    winner: Option<Winner>,
    next_fence: u64,
    response_tx: mpsc::UnboundedSender<FencedResponse>,
    response_rx: mpsc::UnboundedReceiver<FencedResponse>,
    final_snapshot: Arc<Mutex<Option<SessionSnapshot>>>,
}

impl GameSession {
    /// Build the actor, spawn its task, and hand back the shared side.
    pub(crate) fn spawn(
        id: GameId,
        roster: Roster,
        config: &EngineConfig,
        gateway: Arc<dyn AgentGateway>,
        sink: Arc<dyn PersistenceSink>,
    ) -> SessionHandle {
        let broadcaster = Broadcaster::new(config.subscriber_buffer);
        let (persist_tx, persist_rx) = mpsc::unbounded_channel();
        let forwarder = spawn_forwarder(
            id,
            sink,
            persist_rx,
            config.persist_retry_base,
            config.persist_retry_max,
        );
        let (status_tx, status_rx) = watch::channel(SessionStatus::Lobby);
        let (start_tx, start_rx) = oneshot::channel();
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let final_snapshot = Arc::new(Mutex::new(None));

        let session = GameSession {
            id,
            config: config.clone(),
            scheduler: TurnScheduler::new(roster.rotation_order()),
            log: EventLog::new(broadcaster.clone(), persist_tx),
            phase: Phase::Lobby,
            day_count: 0,
            gateway,
            cancel: cancel.clone(),
            status_tx,
            forwarder,
            transcript: Vec::new(),
            winner: None,
            next_fence: 0,
            response_tx,
            response_rx,
            final_snapshot: Arc::clone(&final_snapshot),
            roster: roster.clone(),
        };

        let handle = SessionHandle {
            id,
            players: roster.players().to_vec(),
            broadcaster,
            start_tx: Mutex::new(Some(start_tx)),
            cancel,
            status_rx,
            final_snapshot,
        };

        tokio::spawn(session.run(start_rx));
        debug!(game_id = %id, "session spawned in lobby");

        handle
    }

    pub(crate) fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            day_count: self.day_count,
            players: self.roster.players().to_vec(),
            winner: self.winner,
        }
    }
}
