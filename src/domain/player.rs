use serde::{Deserialize, Serialize};

/// Seat index assigned at registration; doubles as the deterministic
/// tie-break key (`registration_order`).
pub type PlayerId = u8;

/// Role assigned once at game creation; immutable for the game's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Wolf,
    Civilian,
    Moderator,
}

/// What a role is allowed to do, derived from the role tag.
///
/// Phase logic checks capabilities, never the role tag directly, so adding a
/// role later only touches this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCapabilities {
    pub can_vote: bool,
    pub can_propose_night_action: bool,
    pub can_moderate: bool,
}

impl Role {
    pub fn capabilities(self) -> RoleCapabilities {
        match self {
            Role::Wolf => RoleCapabilities {
                can_vote: true,
                can_propose_night_action: true,
                can_moderate: false,
            },
            Role::Civilian => RoleCapabilities {
                can_vote: true,
                can_propose_night_action: false,
                can_moderate: false,
            },
            Role::Moderator => RoleCapabilities {
                can_vote: false,
                can_propose_night_action: false,
                can_moderate: true,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub role: Role,
    pub alive: bool,
    pub registration_order: u8,
}

impl Player {
    pub fn new(id: PlayerId, display_name: String, role: Role) -> Self {
        Self {
            id,
            display_name,
            role,
            alive: true,
            registration_order: id,
        }
    }

    pub fn is_wolf(&self) -> bool {
        self.role == Role::Wolf
    }

    pub fn is_civilian(&self) -> bool {
        self.role == Role::Civilian
    }

    pub fn is_moderator(&self) -> bool {
        self.role == Role::Moderator
    }
}
