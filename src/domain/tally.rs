//! Day-vote resolution.

use std::collections::BTreeMap;

use crate::domain::player::PlayerId;

/// Outcome of counting a day's votes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// One target held the strictly highest count.
    Eliminated {
        target: PlayerId,
        counts: BTreeMap<PlayerId, u32>,
    },
    /// Tie for the highest count, or nobody voted: no elimination that day.
    NoElimination { counts: BTreeMap<PlayerId, u32> },
}

impl VoteOutcome {
    pub fn eliminated(&self) -> Option<PlayerId> {
        match self {
            VoteOutcome::Eliminated { target, .. } => Some(*target),
            VoteOutcome::NoElimination { .. } => None,
        }
    }
}

/// Resolve recorded votes into an elimination.
///
/// `votes` maps voter -> target; abstentions are simply absent. The target
/// with the strictly highest count is eliminated. Any tie for the top count
/// means no elimination (explicit policy; ties never pick randomly so that
/// outcomes replay identically from the event log).
pub fn resolve_votes(votes: &BTreeMap<PlayerId, PlayerId>) -> VoteOutcome {
    let mut counts: BTreeMap<PlayerId, u32> = BTreeMap::new();
    for target in votes.values() {
        *counts.entry(*target).or_insert(0) += 1;
    }

    let Some(max) = counts.values().copied().max() else {
        return VoteOutcome::NoElimination { counts };
    };

    let mut leaders = counts.iter().filter(|(_, c)| **c == max);
    let first = leaders.next().map(|(id, _)| *id);
    let contested = leaders.next().is_some();

    match first {
        Some(target) if !contested => VoteOutcome::Eliminated { target, counts },
        _ => VoteOutcome::NoElimination { counts },
    }
}
