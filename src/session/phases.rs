//! The session state machine: lobby wait, day/night loop, terminal flush.

use std::collections::BTreeMap;

use tokio::sync::oneshot;
use tracing::{debug, info};

use super::{GameSession, SessionStatus};
use crate::domain::{
    check_win, resolve_night, resolve_votes, NightProposal, Phase, PlayerId, Winner,
};
use crate::events::{ActionPayload, EliminationCause, EventBody};
use crate::gateway::{AgentAction, RequestKind, WolfMessage};
use crate::session::agent_calls::DecisionOutcome;

/// Deterministic default substituted for a speaker that timed out or failed.
const DEFAULT_PASS_UTTERANCE: &str = "(passes)";

/// Signal that the session was destroyed mid-phase; unwinds the loop
/// without emitting further events.
struct SessionStopped;

impl GameSession {
    pub(crate) async fn run(mut self, start_rx: oneshot::Receiver<()>) {
        // Lobby: nothing happens until the explicit start command. A dropped
        // handle counts as destroyed.
        let started = tokio::select! {
            _ = self.cancel.cancelled() => false,
            started = start_rx => started.is_ok(),
        };
        if !started {
            self.finish_cancelled();
            return;
        }

        let _ = self.status_tx.send(SessionStatus::Running);
        info!(game_id = %self.id, players = self.roster.len(), "game started");

        self.log.append(EventBody::GameStarted {
            players: self.roster.players().to_vec(),
        });
        self.day_count = 1;
        self.change_phase(Phase::DayDiscussion);

        match self.game_loop().await {
            Ok(winner) => self.finish_completed(winner).await,
            Err(SessionStopped) => self.finish_cancelled(),
        }
    }

    async fn game_loop(&mut self) -> Result<Winner, SessionStopped> {
        loop {
            self.run_discussion().await?;

            // Voting is disabled on the first day.
            if self.day_count > 1 {
                self.change_phase(Phase::DayVoting);
                if let Some(winner) = self.run_voting().await? {
                    return Ok(winner);
                }
            }

            self.change_phase(Phase::Night);
            if let Some(winner) = self.run_night().await? {
                return Ok(winner);
            }

            self.day_count += 1;
            self.change_phase(Phase::DayDiscussion);
        }
    }

    fn change_phase(&mut self, phase: Phase) {
        self.phase = phase;
        debug!(game_id = %self.id, ?phase, day = self.day_count, "phase change");
        self.log.append(EventBody::PhaseChange {
            new_phase: phase,
            day_count: self.day_count,
        });
    }

    fn display_name(&self, id: PlayerId) -> String {
        self.roster
            .get(id)
            .map(|p| p.display_name.clone())
            .unwrap_or_else(|| format!("Player #{id}"))
    }

    /// One full speaking round: every living non-moderator speaks exactly
    /// once, in the rotation order fixed at game start.
    async fn run_discussion(&mut self) -> Result<(), SessionStopped> {
        self.scheduler.begin_round();
        while let Some(speaker) = self.scheduler.next_speaker(&self.roster) {
            self.log.append(EventBody::SpeakerTurn { player_id: speaker });

            let outcome = self
                .request_decision(speaker, RequestKind::Speak, self.config.speak_timeout)
                .await;
            let (text, defaulted) = match outcome {
                DecisionOutcome::Cancelled => return Err(SessionStopped),
                DecisionOutcome::Decided(decision) => match decision.action {
                    AgentAction::Speak(text) => (text, false),
                    other => {
                        debug!(
                            game_id = %self.id,
                            player_id = speaker,
                            action = ?other,
                            "agent answered a speak request with a non-speak action"
                        );
                        (DEFAULT_PASS_UTTERANCE.to_string(), true)
                    }
                },
                DecisionOutcome::Defaulted => (DEFAULT_PASS_UTTERANCE.to_string(), true),
            };

            self.transcript
                .push(format!("{}: {}", self.display_name(speaker), text));
            self.log.append(EventBody::PlayerAction {
                player_id: speaker,
                action: ActionPayload::Speak { text, defaulted },
            });
        }
        Ok(())
    }

    /// Collect one vote per eligible voter, then resolve the elimination.
    async fn run_voting(&mut self) -> Result<Option<Winner>, SessionStopped> {
        let voters: Vec<PlayerId> = self.roster.alive_participants().map(|p| p.id).collect();
        // Legal targets are the living non-moderators, self included.
        let candidates = voters.clone();

        let mut votes: BTreeMap<PlayerId, PlayerId> = BTreeMap::new();
        for voter in voters {
            let outcome = self
                .request_decision(
                    voter,
                    RequestKind::Vote {
                        candidates: candidates.clone(),
                    },
                    self.config.vote_timeout,
                )
                .await;

            let (target, defaulted) = match outcome {
                DecisionOutcome::Cancelled => return Err(SessionStopped),
                DecisionOutcome::Decided(decision) => match decision.action {
                    AgentAction::Vote(Some(target)) if candidates.contains(&target) => {
                        (Some(target), false)
                    }
                    AgentAction::Vote(Some(target)) => {
                        debug!(
                            game_id = %self.id,
                            player_id = voter,
                            target,
                            "vote for an ineligible target; recording abstention"
                        );
                        (None, true)
                    }
                    AgentAction::Vote(None) => (None, false),
                    other => {
                        debug!(
                            game_id = %self.id,
                            player_id = voter,
                            action = ?other,
                            "agent answered a vote request with a non-vote action"
                        );
                        (None, true)
                    }
                },
                DecisionOutcome::Defaulted => (None, true),
            };

            if let Some(target) = target {
                votes.insert(voter, target);
                self.transcript.push(format!(
                    "{} voted for {}",
                    self.display_name(voter),
                    self.display_name(target)
                ));
            } else {
                self.transcript
                    .push(format!("{} abstained", self.display_name(voter)));
            }
            self.log.append(EventBody::PlayerAction {
                player_id: voter,
                action: ActionPayload::Vote { target, defaulted },
            });
        }

        match resolve_votes(&votes).eliminated() {
            Some(target) => Ok(self.apply_elimination(target, EliminationCause::Vote)),
            None => {
                info!(game_id = %self.id, day = self.day_count, "vote tied or empty; no elimination");
                self.transcript
                    .push("No one was eliminated by vote".to_string());
                Ok(None)
            }
        }
    }

    /// Query each living wolf in registration order over the night's
    /// wolf-only channel, then resolve the victim.
    async fn run_night(&mut self) -> Result<Option<Winner>, SessionStopped> {
        let wolves: Vec<PlayerId> = self.roster.alive_wolves().map(|p| p.id).collect();
        let candidates: Vec<PlayerId> = self.roster.alive_civilians().map(|p| p.id).collect();

        // Private coordination channel, scoped to this night's wolves only.
        let mut channel: Vec<WolfMessage> = Vec::new();
        let mut proposals: Vec<(PlayerId, NightProposal)> = Vec::new();

        for wolf in wolves {
            let outcome = self
                .request_decision(
                    wolf,
                    RequestKind::NightProposal {
                        candidates: candidates.clone(),
                        prior: channel.clone(),
                    },
                    self.config.night_timeout,
                )
                .await;

            let (proposal, target, defaulted) = match outcome {
                DecisionOutcome::Cancelled => return Err(SessionStopped),
                DecisionOutcome::Decided(decision) => match decision.action {
                    AgentAction::NightProposal(Some(target)) if candidates.contains(&target) => {
                        (NightProposal::Target(target), Some(target), false)
                    }
                    AgentAction::NightProposal(Some(target)) => {
                        debug!(
                            game_id = %self.id,
                            player_id = wolf,
                            target,
                            "night proposal for an ineligible target; treating as abstention"
                        );
                        (NightProposal::Abstain, None, true)
                    }
                    AgentAction::NightProposal(None) => (NightProposal::Abstain, None, false),
                    other => {
                        debug!(
                            game_id = %self.id,
                            player_id = wolf,
                            action = ?other,
                            "agent answered a night request with a non-proposal action"
                        );
                        (NightProposal::Abstain, None, true)
                    }
                },
                DecisionOutcome::Defaulted => (NightProposal::NoResponse, None, true),
            };

            proposals.push((wolf, proposal));
            channel.push(WolfMessage { wolf, target });
            self.log.append(EventBody::PlayerAction {
                player_id: wolf,
                action: ActionPayload::NightProposal { target, defaulted },
            });
        }

        match resolve_night(&proposals) {
            Some(victim) => {
                self.transcript.push(format!(
                    "{} was killed during the night",
                    self.display_name(victim)
                ));
                Ok(self.apply_elimination(victim, EliminationCause::Night))
            }
            None => {
                info!(game_id = %self.id, day = self.day_count, "wolves reached no kill tonight");
                Ok(None)
            }
        }
    }

    /// Apply an elimination and evaluate the win condition in the same
    /// engine step; no extra round is played once a side has won.
    fn apply_elimination(&mut self, target: PlayerId, cause: EliminationCause) -> Option<Winner> {
        self.roster.eliminate(target);
        if cause == EliminationCause::Vote {
            self.transcript.push(format!(
                "{} was eliminated by vote",
                self.display_name(target)
            ));
        }
        info!(game_id = %self.id, player_id = target, ?cause, "player eliminated");
        self.log.append(EventBody::PlayerEliminated {
            player_id: target,
            cause,
        });

        let winner = check_win(&self.roster);
        if let Some(winner) = winner {
            self.winner = Some(winner);
        }
        winner
    }

    /// Emit the terminal event, then hold the Completed transition until
    /// the sink has acknowledged it.
    async fn finish_completed(&mut self, winner: Winner) {
        self.phase = Phase::GameOver;
        let terminal = self.log.append(EventBody::GameOver {
            winner,
            role_reveal: self.roster.players().to_vec(),
        });
        self.log.close();
        *self.final_snapshot.lock() = Some(self.snapshot());

        let flushed = tokio::select! {
            _ = self.forwarder.wait_for(terminal.seq) => true,
            _ = self.cancel.cancelled() => false,
        };
        if flushed {
            let _ = self.status_tx.send(SessionStatus::Completed);
            info!(game_id = %self.id, ?winner, final_seq = terminal.seq, "game completed");
        } else {
            // Destroyed while flushing; the forwarder keeps draining in the
            // background but this game never reports Completed.
            self.finish_cancelled();
        }
    }

    fn finish_cancelled(&mut self) {
        self.log.close();
        let _ = self.status_tx.send(SessionStatus::Cancelled);
        info!(game_id = %self.id, "session cancelled");
    }
}
