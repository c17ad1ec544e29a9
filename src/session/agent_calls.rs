//! Fenced agent calls.
//!
//! Every suspension point is one spawned `decide` call tagged with a fence
//! token. The actor races the response against its deadline and the
//! session's cancellation; once a deadline has forced the default action,
//! any response still in flight carries a stale token and is discarded
//! instead of applied.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::GameSession;
use crate::domain::PlayerId;
use crate::gateway::{AgentError, Decision, GameSnapshot, PlayerRef, RequestKind};

/// How many public transcript lines agents get as context.
const TRANSCRIPT_WINDOW: usize = 20;

pub(crate) struct FencedResponse {
    pub fence: u64,
    pub player_id: PlayerId,
    pub result: Result<Decision, AgentError>,
}

pub(crate) enum DecisionOutcome {
    Decided(Decision),
    /// Timeout or failure: the caller substitutes the deterministic default
    /// action and annotates the resulting event.
    Defaulted,
    /// The session is being destroyed; unwind without touching state.
    Cancelled,
}

impl GameSession {
    /// Public game context handed to every agent call. Wolf-private data
    /// never goes in here; it rides inside `RequestKind::NightProposal`.
    pub(crate) fn public_snapshot(&self) -> GameSnapshot {
        let transcript_start = self.transcript.len().saturating_sub(TRANSCRIPT_WINDOW);
        GameSnapshot {
            game_id: self.id,
            phase: self.phase,
            day_count: self.day_count,
            alive_players: self
                .roster
                .alive_participants()
                .map(|p| PlayerRef {
                    id: p.id,
                    display_name: p.display_name.clone(),
                })
                .collect(),
            transcript: self.transcript[transcript_start..].to_vec(),
        }
    }

    /// Issue one gateway call and wait for it, the deadline, or
    /// cancellation, whichever comes first.
    pub(crate) async fn request_decision(
        &mut self,
        player_id: PlayerId,
        request: RequestKind,
        timeout: Duration,
    ) -> DecisionOutcome {
        let fence = self.next_fence;
        self.next_fence += 1;

        let kind = request.name();
        let snapshot = self.public_snapshot();
        let gateway = Arc::clone(&self.gateway);
        let tx = self.response_tx.clone();
        tokio::spawn(async move {
            let result = gateway.decide(snapshot, player_id, request).await;
            let _ = tx.send(FencedResponse {
                fence,
                player_id,
                result,
            });
        });

        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => return DecisionOutcome::Cancelled,
                _ = &mut deadline => {
                    warn!(
                        game_id = %self.id,
                        player_id,
                        kind,
                        "agent deadline exceeded; substituting default action"
                    );
                    return DecisionOutcome::Defaulted;
                }
                response = self.response_rx.recv() => {
                    // We hold a sender, so the channel cannot close under us.
                    let Some(response) = response else {
                        return DecisionOutcome::Cancelled;
                    };
                    if response.fence != fence {
                        debug!(
                            game_id = %self.id,
                            player_id = response.player_id,
                            stale_fence = response.fence,
                            current_fence = fence,
                            "discarding stale agent response"
                        );
                        continue;
                    }
                    return match response.result {
                        Ok(decision) => DecisionOutcome::Decided(decision),
                        Err(err) => {
                            warn!(
                                game_id = %self.id,
                                player_id,
                                kind,
                                error = %err,
                                "agent call failed; substituting default action"
                            );
                            DecisionOutcome::Defaulted
                        }
                    };
                }
            }
        }
    }
}
