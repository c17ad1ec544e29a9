use proptest::prelude::*;

use crate::domain::player::Role;
use crate::domain::roster::{assign_roles, wolf_count, Roster, MAX_PLAYERS, MIN_PLAYERS};

#[test]
fn wolf_count_matches_formula_table() {
    // max(1, round(0.2 * (N - 1))) for every supported table size.
    let expected = [
        (6, 1),
        (7, 1),
        (8, 1),
        (9, 2),
        (10, 2),
        (11, 2),
        (12, 2),
        (13, 2),
        (14, 3),
        (15, 3),
    ];
    for (n, wolves) in expected {
        assert_eq!(wolf_count(n), wolves, "N={n}");
    }
}

#[test]
fn twelve_players_split_two_wolves_nine_civilians_one_moderator() {
    let roles = assign_roles(12, 42);
    assert_eq!(roles.iter().filter(|r| **r == Role::Wolf).count(), 2);
    assert_eq!(roles.iter().filter(|r| **r == Role::Civilian).count(), 9);
    assert_eq!(roles.iter().filter(|r| **r == Role::Moderator).count(), 1);
}

#[test]
fn six_players_split_one_wolf_four_civilians_one_moderator() {
    let roles = assign_roles(6, 7);
    assert_eq!(roles.iter().filter(|r| **r == Role::Wolf).count(), 1);
    assert_eq!(roles.iter().filter(|r| **r == Role::Civilian).count(), 4);
    assert_eq!(roles.iter().filter(|r| **r == Role::Moderator).count(), 1);
}

#[test]
fn assignment_is_deterministic_under_a_seed() {
    assert_eq!(assign_roles(10, 123), assign_roles(10, 123));
}

#[test]
fn rotation_order_excludes_the_moderator_and_is_registration_ordered() {
    let roster = Roster::generate(8, 1);
    let order = roster.rotation_order();
    assert_eq!(order.len(), 7);
    assert!(order.windows(2).all(|w| w[0] < w[1]));
    let moderator = roster.moderator().expect("one moderator").id;
    assert!(!order.contains(&moderator));
}

#[test]
fn eliminate_only_shrinks_the_alive_set() {
    let mut roster = Roster::generate(6, 9);
    let victim = roster.alive_participants().next().expect("has players").id;
    assert!(roster.eliminate(victim));
    assert!(!roster.is_alive(victim));
    // Second elimination of the same player is a no-op.
    assert!(!roster.eliminate(victim));
    assert_eq!(roster.alive_players().count(), 5);
}

proptest! {
    #[test]
    fn role_counts_hold_for_all_supported_sizes(
        n in MIN_PLAYERS..=MAX_PLAYERS,
        seed in any::<u64>(),
    ) {
        let roles = assign_roles(n, seed);
        let wolves = roles.iter().filter(|r| **r == Role::Wolf).count();
        let moderators = roles.iter().filter(|r| **r == Role::Moderator).count();
        let civilians = roles.iter().filter(|r| **r == Role::Civilian).count();

        prop_assert_eq!(roles.len(), n);
        prop_assert_eq!(moderators, 1);
        prop_assert_eq!(wolves, wolf_count(n));
        prop_assert_eq!(civilians, n - wolves - 1);
        prop_assert!(wolves >= 1);
    }
}
