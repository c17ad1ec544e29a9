use crate::domain::phase::{check_win, Winner};
use crate::domain::player::{Player, Role};
use crate::domain::roster::Roster;

fn roster(roles: &[(Role, bool)]) -> Roster {
    let players = roles
        .iter()
        .enumerate()
        .map(|(i, (role, alive))| {
            let mut p = Player::new(i as u8, format!("Player {}", i + 1), *role);
            p.alive = *alive;
            p
        })
        .collect();
    Roster::from_players(players)
}

#[test]
fn no_wolves_left_means_civilians_win() {
    let r = roster(&[
        (Role::Wolf, false),
        (Role::Civilian, true),
        (Role::Civilian, true),
        (Role::Moderator, true),
    ]);
    assert_eq!(check_win(&r), Some(Winner::Civilians));
}

#[test]
fn wolves_matching_civilians_means_wolves_win() {
    // 2 wolves vs 2 civilians alive: parity is enough.
    let r = roster(&[
        (Role::Wolf, true),
        (Role::Wolf, true),
        (Role::Civilian, true),
        (Role::Civilian, true),
        (Role::Civilian, false),
        (Role::Moderator, true),
    ]);
    assert_eq!(check_win(&r), Some(Winner::Wolves));
}

#[test]
fn game_continues_while_civilians_outnumber_wolves() {
    let r = roster(&[
        (Role::Wolf, true),
        (Role::Civilian, true),
        (Role::Civilian, true),
        (Role::Moderator, true),
    ]);
    assert_eq!(check_win(&r), None);
}

#[test]
fn the_moderator_never_counts_toward_the_win_condition() {
    // 1 wolf vs 1 civilian; the living moderator does not save the town.
    let r = roster(&[
        (Role::Wolf, true),
        (Role::Civilian, true),
        (Role::Civilian, false),
        (Role::Moderator, true),
    ]);
    assert_eq!(check_win(&r), Some(Winner::Wolves));
}
