//! Scripted gateway for tests: decisions come from a closure, optionally
//! behind an artificial per-call latency (for exercising timeouts and
//! stale-response fencing).

use std::time::Duration;

use async_trait::async_trait;

use super::{AgentError, AgentGateway, Decision, GameSnapshot, RequestKind};
use crate::domain::PlayerId;

type DecideFn =
    dyn Fn(&GameSnapshot, PlayerId, &RequestKind) -> Result<Decision, AgentError> + Send + Sync;
type LatencyFn = dyn Fn(PlayerId, &RequestKind) -> Duration + Send + Sync;

pub struct ScriptedGateway {
    decide: Box<DecideFn>,
    latency: Box<LatencyFn>,
}

impl ScriptedGateway {
    pub fn new(
        decide: impl Fn(&GameSnapshot, PlayerId, &RequestKind) -> Result<Decision, AgentError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            decide: Box::new(decide),
            latency: Box::new(|_, _| Duration::ZERO),
        }
    }

    /// Delay every response by `delay` before returning it.
    pub fn with_latency(mut self, delay: Duration) -> Self {
        self.latency = Box::new(move |_, _| delay);
        self
    }

    /// Per-player/per-request latency, for mixing prompt and slow agents.
    pub fn with_latency_for(
        mut self,
        latency: impl Fn(PlayerId, &RequestKind) -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.latency = Box::new(latency);
        self
    }
}

#[async_trait]
impl AgentGateway for ScriptedGateway {
    async fn decide(
        &self,
        snapshot: GameSnapshot,
        player_id: PlayerId,
        request: RequestKind,
    ) -> Result<Decision, AgentError> {
        let delay = (self.latency)(player_id, &request);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        (self.decide)(&snapshot, player_id, &request)
    }
}
