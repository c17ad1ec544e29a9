//! Roster construction and queries.
//!
//! Role assignment happens exactly once at creation; afterwards the roster
//! only shrinks (alive flags flip to false, never back).

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::player::{Player, PlayerId, Role};

/// Allowed table sizes, moderator included.
pub const MIN_PLAYERS: usize = 6;
pub const MAX_PLAYERS: usize = 15;

/// Wolves per table: `max(1, round(0.2 * (N - 1)))` where N includes the
/// moderator. Integer arithmetic; `0.2 * k` never lands on an exact half so
/// no rounding-mode ambiguity exists in the supported range.
pub fn wolf_count(num_players: usize) -> usize {
    let k = num_players - 1;
    ((2 * k + 5) / 10).max(1)
}

/// Build the shuffled role list for a table of `num_players`.
///
/// Exactly one moderator, `wolf_count` wolves, civilians for the remainder.
/// The shuffle is deterministic under `seed`.
pub fn assign_roles(num_players: usize, seed: u64) -> Vec<Role> {
    let wolves = wolf_count(num_players);
    let civilians = num_players - wolves - 1;

    let mut roles = Vec::with_capacity(num_players);
    roles.extend(std::iter::repeat_n(Role::Wolf, wolves));
    roles.extend(std::iter::repeat_n(Role::Civilian, civilians));
    roles.push(Role::Moderator);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    roles.shuffle(&mut rng);
    roles
}

/// The per-game player list, ordered by registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Create a roster with shuffled roles and generated display names.
    pub fn generate(num_players: usize, seed: u64) -> Self {
        let roles = assign_roles(num_players, seed);
        let players = roles
            .into_iter()
            .enumerate()
            .map(|(i, role)| Player::new(i as PlayerId, format!("Player {}", i + 1), role))
            .collect();
        Self { players }
    }

    pub fn from_players(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    pub fn moderator(&self) -> Option<&Player> {
        self.players
            .iter()
            .find(|p| p.role.capabilities().can_moderate)
    }

    pub fn alive_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.alive)
    }

    pub fn alive_wolves(&self) -> impl Iterator<Item = &Player> {
        self.alive_players().filter(|p| p.is_wolf())
    }

    pub fn alive_civilians(&self) -> impl Iterator<Item = &Player> {
        self.alive_players().filter(|p| p.is_civilian())
    }

    /// Living players that take speaking turns and vote, in registration
    /// order.
    pub fn alive_participants(&self) -> impl Iterator<Item = &Player> {
        self.alive_players()
            .filter(|p| p.role.capabilities().can_vote)
    }

    /// Fixed rotation order established at game start: every voting seat in
    /// registration order, dead or alive.
    pub fn rotation_order(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.role.capabilities().can_vote)
            .map(|p| p.id)
            .collect()
    }

    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.get(id).is_some_and(|p| p.alive)
    }

    /// Flip a player's alive flag to false. Returns false if the id is
    /// unknown or the player was already dead (the alive set only shrinks).
    pub fn eliminate(&mut self, id: PlayerId) -> bool {
        match self.players.get_mut(id as usize) {
            Some(p) if p.alive => {
                p.alive = false;
                true
            }
            _ => false,
        }
    }
}
