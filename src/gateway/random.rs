//! Random gateway - the baseline [`AgentGateway`] implementation.
//!
//! Picks uniformly among legal options. Useful for smoke-running whole games
//! without a real decision backend, and as a template for custom gateways:
//! thread-safe interior mutability for the RNG, optional seeding for
//! deterministic behavior, no panics.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::prelude::*;

use super::{AgentAction, AgentError, AgentGateway, Decision, GameSnapshot, RequestKind};
use crate::domain::PlayerId;

pub struct RandomGateway {
    /// `Mutex` because trait methods take `&self` but the RNG needs `&mut`.
    rng: Mutex<StdRng>,
}

impl RandomGateway {
    /// `Some(seed)` gives reproducible decisions; `None` uses OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

const SPEECH_POOL: &[&str] = &[
    "I have nothing concrete yet, but someone is too quiet.",
    "Last night made me suspicious of the early accusers.",
    "I'm watching the voting patterns before committing.",
    "We should pressure whoever changes their story.",
];

#[async_trait]
impl AgentGateway for RandomGateway {
    async fn decide(
        &self,
        _snapshot: GameSnapshot,
        player_id: PlayerId,
        request: RequestKind,
    ) -> Result<Decision, AgentError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AgentError::Failure("rng lock poisoned".into()))?;

        let action = match request {
            RequestKind::Speak => {
                let line = SPEECH_POOL
                    .choose(&mut *rng)
                    .copied()
                    .unwrap_or("I pass.");
                AgentAction::Speak(line.to_string())
            }
            RequestKind::Vote { candidates } => {
                // Never vote for yourself at random.
                let pool: Vec<PlayerId> = candidates
                    .into_iter()
                    .filter(|c| *c != player_id)
                    .collect();
                AgentAction::Vote(pool.choose(&mut *rng).copied())
            }
            RequestKind::NightProposal { candidates, prior } => {
                // Follow the pack when a proposal already exists.
                let followed = prior.iter().rev().find_map(|m| m.target);
                match followed {
                    Some(target) => AgentAction::NightProposal(Some(target)),
                    None => AgentAction::NightProposal(candidates.choose(&mut *rng).copied()),
                }
            }
        };

        Ok(Decision::new(action))
    }
}
