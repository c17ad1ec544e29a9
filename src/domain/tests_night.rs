use crate::domain::night::{resolve_night, NightProposal};

use NightProposal::{Abstain, NoResponse, Target};

#[test]
fn last_responder_decides() {
    let proposals = [(0, Target(5)), (1, Target(6)), (2, Target(7))];
    assert_eq!(resolve_night(&proposals), Some(7));
}

#[test]
fn trailing_timeouts_are_skipped_when_finding_the_last_responder() {
    let proposals = [(0, Target(5)), (1, Target(6)), (2, NoResponse)];
    assert_eq!(resolve_night(&proposals), Some(6));
}

#[test]
fn abstaining_last_responder_falls_back_to_first_explicit_target() {
    let proposals = [(0, Target(5)), (1, Target(6)), (2, Abstain)];
    assert_eq!(resolve_night(&proposals), Some(5));
}

#[test]
fn fallback_skips_leading_abstentions() {
    let proposals = [(0, Abstain), (1, Target(6)), (2, Abstain)];
    assert_eq!(resolve_night(&proposals), Some(6));
}

#[test]
fn all_abstain_means_no_kill() {
    let proposals = [(0, Abstain), (1, Abstain)];
    assert_eq!(resolve_night(&proposals), None);
}

#[test]
fn all_timeouts_mean_no_kill() {
    let proposals = [(0, NoResponse), (1, NoResponse)];
    assert_eq!(resolve_night(&proposals), None);
}

#[test]
fn empty_wolf_pack_means_no_kill() {
    assert_eq!(resolve_night(&[]), None);
}

#[test]
fn lone_wolf_target_stands() {
    assert_eq!(resolve_night(&[(3, Target(1))]), Some(1));
}
