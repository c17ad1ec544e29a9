//! Domain layer: pure game logic types and helpers.
//!
//! Nothing in here performs I/O or suspends; the session actor composes these
//! pieces and owns all mutation.

pub mod night;
pub mod phase;
pub mod player;
pub mod roster;
pub mod snapshot;
pub mod tally;

#[cfg(test)]
mod tests_night;
#[cfg(test)]
mod tests_phase;
#[cfg(test)]
mod tests_roster;
#[cfg(test)]
mod tests_snapshot;
#[cfg(test)]
mod tests_tally;

pub use night::{resolve_night, NightProposal};
pub use phase::{check_win, Phase, Winner};
pub use player::{Player, PlayerId, Role, RoleCapabilities};
pub use roster::{assign_roles, wolf_count, Roster};
pub use snapshot::SessionSnapshot;
pub use tally::{resolve_votes, VoteOutcome};
