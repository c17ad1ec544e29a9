use std::collections::BTreeMap;

use crate::domain::tally::{resolve_votes, VoteOutcome};

fn votes(pairs: &[(u8, u8)]) -> BTreeMap<u8, u8> {
    pairs.iter().copied().collect()
}

#[test]
fn strict_plurality_eliminates() {
    // 8 votes for player 0, 2 for player 1.
    let mut v = BTreeMap::new();
    for voter in 1..=8 {
        v.insert(voter, 0);
    }
    v.insert(9, 1);
    v.insert(10, 1);

    let outcome = resolve_votes(&v);
    assert_eq!(outcome.eliminated(), Some(0));
    match outcome {
        VoteOutcome::Eliminated { counts, .. } => {
            assert_eq!(counts[&0], 8);
            assert_eq!(counts[&1], 2);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn top_tie_means_no_elimination() {
    // 4-4 split between players 0 and 1.
    let v = votes(&[
        (2, 0),
        (3, 0),
        (4, 0),
        (5, 0),
        (6, 1),
        (7, 1),
        (8, 1),
        (9, 1),
    ]);
    assert_eq!(resolve_votes(&v).eliminated(), None);
}

#[test]
fn empty_tally_means_no_elimination() {
    assert_eq!(resolve_votes(&BTreeMap::new()).eliminated(), None);
}

#[test]
fn single_vote_is_enough_for_a_strict_plurality() {
    let v = votes(&[(1, 3)]);
    assert_eq!(resolve_votes(&v).eliminated(), Some(3));
}

#[test]
fn self_votes_count_like_any_other() {
    let v = votes(&[(0, 0), (1, 0), (2, 1)]);
    assert_eq!(resolve_votes(&v).eliminated(), Some(0));
}

#[test]
fn tie_below_the_top_does_not_block_elimination() {
    let v = votes(&[(0, 2), (1, 2), (2, 3), (3, 4), (4, 2)]);
    // 3 votes for player 2, one each for 3 and 4.
    assert_eq!(resolve_votes(&v).eliminated(), Some(2));
}
