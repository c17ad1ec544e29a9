use time::OffsetDateTime;

use crate::domain::player::{Player, Role};
use crate::domain::snapshot::SessionSnapshot;
use crate::domain::{Phase, Winner};
use crate::events::{EliminationCause, Event, EventBody};

fn history() -> Vec<Event> {
    let players = vec![
        Player::new(0, "Player 1".into(), Role::Wolf),
        Player::new(1, "Player 2".into(), Role::Civilian),
        Player::new(2, "Player 3".into(), Role::Civilian),
        Player::new(3, "Player 4".into(), Role::Moderator),
    ];
    let bodies = vec![
        EventBody::GameStarted {
            players: players.clone(),
        },
        EventBody::PhaseChange {
            new_phase: Phase::DayDiscussion,
            day_count: 1,
        },
        EventBody::PhaseChange {
            new_phase: Phase::Night,
            day_count: 1,
        },
        EventBody::PlayerEliminated {
            player_id: 1,
            cause: EliminationCause::Night,
        },
        EventBody::GameOver {
            winner: Winner::Wolves,
            role_reveal: {
                let mut reveal = players;
                reveal[1].alive = false;
                reveal
            },
        },
    ];
    bodies
        .into_iter()
        .enumerate()
        .map(|(seq, body)| Event {
            seq: seq as u64,
            timestamp: OffsetDateTime::UNIX_EPOCH,
            body,
        })
        .collect()
}

#[test]
fn replay_reaches_the_terminal_state() {
    let snapshot = SessionSnapshot::replay(&history());
    assert_eq!(snapshot.phase, Phase::GameOver);
    assert_eq!(snapshot.day_count, 1);
    assert_eq!(snapshot.winner, Some(Winner::Wolves));
    assert!(!snapshot.players[1].alive);
    assert!(snapshot.players[0].alive);
}

#[test]
fn replay_is_idempotent_over_the_same_history() {
    let events = history();
    assert_eq!(
        SessionSnapshot::replay(&events),
        SessionSnapshot::replay(&events)
    );
}

#[test]
fn partial_replay_tracks_the_live_phase() {
    let events = history();
    let snapshot = SessionSnapshot::replay(events.iter().take(3));
    assert_eq!(snapshot.phase, Phase::Night);
    assert_eq!(snapshot.winner, None);
    assert!(snapshot.players.iter().all(|p| p.alive));
}
