//! Game registry: the only globally shared mutable state.
//!
//! An arena of sessions keyed by game id with owned lifecycle; every piece
//! of session state is reached through a lookup here, never through a
//! process-wide singleton.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::domain::roster::{MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::{Player, Roster};
use crate::errors::EngineError;
use crate::events::{Event, GameId, Subscription};
use crate::gateway::AgentGateway;
use crate::persistence::{PersistenceError, PersistenceSink};
use crate::session::{GameSession, SessionHandle};

pub struct GameRegistry {
    config: EngineConfig,
    gateway: Arc<dyn AgentGateway>,
    sink: Arc<dyn PersistenceSink>,
    sessions: Arc<DashMap<GameId, Arc<SessionHandle>>>,
    /// Serializes the capacity check against the insert in `create`;
    /// concurrent creates must not overshoot `max_games`.
    admission: Mutex<()>,
}

impl GameRegistry {
    pub fn new(
        config: EngineConfig,
        gateway: Arc<dyn AgentGateway>,
        sink: Arc<dyn PersistenceSink>,
    ) -> Self {
        Self {
            config,
            gateway,
            sink,
            sessions: Arc::new(DashMap::new()),
            admission: Mutex::new(()),
        }
    }

    /// Create a new game in the lobby: validates the player count, applies
    /// admission control, assigns roles, and spawns the session actor.
    /// Returns the game id and the roster snapshot.
    pub fn create(&self, num_players: usize) -> Result<(GameId, Vec<Player>), EngineError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(EngineError::config(format!(
                "number of players must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {num_players}"
            )));
        }
        let id = GameId::new_v4();
        let roster = Roster::generate(num_players, rand::random());

        let handle = {
            let _slot = self.admission.lock();
            if self.occupied_slots() >= self.config.max_games {
                return Err(EngineError::capacity(self.config.max_games));
            }
            let handle = Arc::new(GameSession::spawn(
                id,
                roster.clone(),
                &self.config,
                Arc::clone(&self.gateway),
                Arc::clone(&self.sink),
            ));
            self.sessions.insert(id, Arc::clone(&handle));
            handle
        };

        // Self-eviction: a completed session leaves the arena only after
        // its final event has been acknowledged by the sink (the session
        // does not report a terminal status before that).
        let sessions = Arc::clone(&self.sessions);
        tokio::spawn(async move {
            let status = handle.wait_terminal().await;
            sessions.remove(&id);
            debug!(game_id = %id, ?status, "session evicted from registry");
        });

        info!(game_id = %id, num_players, "game created");
        Ok((id, roster.players().to_vec()))
    }

    pub fn get(&self, id: GameId) -> Result<Arc<SessionHandle>, EngineError> {
        self.sessions
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| EngineError::not_found(id))
    }

    /// Start a created game's day/night loop.
    pub fn start(&self, id: GameId) -> Result<(), EngineError> {
        self.get(id)?.start()
    }

    /// Cancel and evict a session. Idempotent: destroying an unknown or
    /// already-destroyed game is a no-op.
    pub fn destroy(&self, id: GameId) {
        if let Some((_, handle)) = self.sessions.remove(&id) {
            handle.cancel();
            info!(game_id = %id, "game destroyed");
        }
    }

    /// Live event stream for spectators, from this moment forward.
    pub fn subscribe(&self, id: GameId) -> Result<Subscription, EngineError> {
        Ok(self.get(id)?.subscribe())
    }

    /// Full ordered history from the persistence sink.
    pub async fn load_history(&self, id: GameId) -> Result<Vec<Event>, PersistenceError> {
        self.sink.load_history(id).await
    }

    /// Sessions currently holding a capacity slot (lobby or running).
    pub fn occupied_slots(&self) -> usize {
        self.sessions
            .iter()
            .filter(|entry| entry.value().status().occupies_slot())
            .count()
    }
}
