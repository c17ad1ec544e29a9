//! Shared test support: configs, gateways, event collection.

use std::time::Duration;

use werewolf_engine::events::{Event, EventBody, Subscription};
use werewolf_engine::gateway::{AgentAction, Decision};
use werewolf_engine::EngineConfig;

#[ctor::ctor]
fn init_test_logging() {
    werewolf_engine::logging::init();
}

pub fn test_config() -> EngineConfig {
    EngineConfig {
        max_games: 8,
        speak_timeout: Duration::from_millis(500),
        vote_timeout: Duration::from_millis(500),
        night_timeout: Duration::from_millis(500),
        subscriber_buffer: 1024,
        persist_retry_base: Duration::from_millis(1),
        persist_retry_max: Duration::from_millis(10),
    }
}

pub fn speak(text: impl Into<String>) -> Result<Decision, werewolf_engine::gateway::AgentError> {
    Ok(Decision::new(AgentAction::Speak(text.into())))
}

pub fn vote(target: Option<u8>) -> Result<Decision, werewolf_engine::gateway::AgentError> {
    Ok(Decision::new(AgentAction::Vote(target)))
}

pub fn night(target: Option<u8>) -> Result<Decision, werewolf_engine::gateway::AgentError> {
    Ok(Decision::new(AgentAction::NightProposal(target)))
}

/// Drain a live subscription until (and including) `game_over`.
pub async fn collect_until_game_over(sub: &mut Subscription) -> Vec<Event> {
    let mut events = Vec::new();
    let deadline = Duration::from_secs(10);
    loop {
        let event = tokio::time::timeout(deadline, sub.recv())
            .await
            .expect("game did not finish in time")
            .expect("stream closed before game_over");
        let terminal = matches!(event.body, EventBody::GameOver { .. });
        events.push(event);
        if terminal {
            return events;
        }
    }
}

/// Assert `seq` is gapless from 0 and timestamps never decrease.
pub fn assert_well_ordered(events: &[Event]) {
    for (i, event) in events.iter().enumerate() {
        assert_eq!(event.seq, i as u64, "seq must be gapless from 0");
    }
    assert!(
        events.windows(2).all(|w| w[0].timestamp <= w[1].timestamp),
        "timestamps must be non-decreasing in seq order"
    );
}
