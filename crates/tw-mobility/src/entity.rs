//! Autonomous roaming entities (NPCs, objects).

use tw_behavior::MoveType;
use tw_character::Character;
use tw_core::{Direction, EntityId};

pub struct RoamingEntity {
    pub id: EntityId,
    pub character: Character,
    pub move_type: MoveType,
    /// Held in place facing the player, e.g. during a conversation.
    pub locked: bool,
    pub prelock_direction: Direction,
    /// Removed from play until the map is reloaded.
    pub erased: bool,
}

impl RoamingEntity {
    pub fn new(id: EntityId, character: Character, move_type: MoveType) -> Self {
        let prelock_direction = character.direction;
        Self { id, character, move_type, locked: false, prelock_direction, erased: false }
    }

    /// Solid at `(x, y)` for other movers.
    pub fn blocks(&self, x: i32, y: i32) -> bool {
        !self.erased && self.character.pos_nt(x, y)
    }

    pub fn is_active(&self) -> bool {
        !self.erased
    }

    pub fn erase(&mut self) {
        self.erased = true;
        self.locked = false;
    }
}
