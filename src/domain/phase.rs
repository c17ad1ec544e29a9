use serde::{Deserialize, Serialize};

use crate::domain::roster::Roster;

/// Overall game progression phases.
///
/// Transitions follow the fixed order `Lobby -> DayDiscussion -> DayVoting ->
/// Night -> DayDiscussion -> ... -> GameOver`, with day 1 skipping
/// `DayVoting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Lobby,
    DayDiscussion,
    DayVoting,
    Night,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Wolves,
    Civilians,
}

/// Win condition, evaluated after every elimination.
///
/// No wolves alive -> civilians win; wolves alive >= civilians alive ->
/// wolves win. Returns `None` while the game continues.
pub fn check_win(roster: &Roster) -> Option<Winner> {
    let wolves = roster.alive_wolves().count();
    let civilians = roster.alive_civilians().count();

    if wolves == 0 {
        Some(Winner::Civilians)
    } else if wolves >= civilians {
        Some(Winner::Wolves)
    } else {
        None
    }
}
