//! Night-kill consensus among the wolves.

use crate::domain::player::PlayerId;

/// One wolf's contribution to the night, in query order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NightProposal {
    /// Wolf proposed a victim.
    Target(PlayerId),
    /// Wolf responded but declined to name anyone.
    Abstain,
    /// Wolf timed out or failed; treated as silence, not as a response.
    NoResponse,
}

/// Resolve the night's victim from the ordered proposal list.
///
/// The last wolf that actually responded decides: its target is the victim.
/// If that wolf abstained, the first explicit target proposed that night is
/// used instead. If nobody named a target, no kill occurs.
pub fn resolve_night(proposals: &[(PlayerId, NightProposal)]) -> Option<PlayerId> {
    let last_response = proposals
        .iter()
        .rev()
        .find_map(|(_, p)| match p {
            NightProposal::NoResponse => None,
            other => Some(*other),
        })?;

    match last_response {
        NightProposal::Target(victim) => Some(victim),
        _ => proposals.iter().find_map(|(_, p)| match p {
            NightProposal::Target(victim) => Some(*victim),
            _ => None,
        }),
    }
}
