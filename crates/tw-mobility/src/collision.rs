//! Layered passability.
//!
//! # Layers
//!
//! A step from `(x, y)` toward `d` is allowed when, in order:
//!
//! 1. the destination is on the map,
//! 2. the mover is through (or the player has debug-through) — done,
//! 3. the terrain lets the mover out of the origin and into the destination
//!    (or the driven vehicle's own terrain rule allows it),
//! 4. no other character occupies the destination.
//!
//! Layer 4 differs per variant:
//!
//! | Mover          | Blocked by                                                  |
//! |----------------|-------------------------------------------------------------|
//! | player, vehicle| normal-priority solid entities, parked boat/ship            |
//! | roaming entity | any solid entity, parked boat/ship, and (if itself normal   |
//! |                | priority) the solid player or a visible follower            |
//! | follower       | nothing: followers are always through                       |

use tw_core::{CharacterRef, Direction, EntityId, VehicleKind};
use tw_map::MapQuery;

use crate::ActorStore;

/// Read-only view answering "may this character step there?".
pub struct CollisionResolver<'a, M: ?Sized> {
    map: &'a M,
    store: &'a ActorStore,
}

impl<'a, M: MapQuery + ?Sized> CollisionResolver<'a, M> {
    pub fn new(map: &'a M, store: &'a ActorStore) -> Self {
        Self { map, store }
    }

    pub fn can_pass(&self, who: CharacterRef, x: i32, y: i32, d: Direction) -> bool {
        let x2 = self.map.round_x_with_direction(x, d);
        let y2 = self.map.round_y_with_direction(y, d);
        if !self.map.is_valid(x2, y2) {
            return false;
        }
        if self.is_through(who) {
            return true;
        }
        if !self.is_map_passable(who, x, y, d) {
            return false;
        }
        !self.is_collided_with_characters(who, x2, y2)
    }

    /// Passable along at least one of the two L-shaped detours.
    pub fn can_pass_diagonally(
        &self,
        who: CharacterRef,
        x: i32,
        y: i32,
        horz: Direction,
        vert: Direction,
    ) -> bool {
        let x2 = self.map.round_x_with_direction(x, horz);
        let y2 = self.map.round_y_with_direction(y, vert);
        (self.can_pass(who, x, y, vert) && self.can_pass(who, x, y2, horz))
            || (self.can_pass(who, x, y, horz) && self.can_pass(who, x2, y, vert))
    }

    fn is_through(&self, who: CharacterRef) -> bool {
        match who {
            CharacterRef::Follower(_) => true,
            CharacterRef::Player if self.store.player.debug_through => true,
            _ => self.store.character(who).is_none_or(|c| c.through),
        }
    }

    /// Terrain layer: the origin's `d` edge and the destination's opposite
    /// edge, or the driven vehicle's rule.
    pub fn is_map_passable(&self, who: CharacterRef, x: i32, y: i32, d: Direction) -> bool {
        let vehicle = match who {
            CharacterRef::Player => self.store.player.vehicle(),
            CharacterRef::Vehicle(kind) => Some(kind),
            _ => None,
        };
        if let Some(kind) = vehicle {
            return self.store.vehicle(kind).is_map_passable(self.map, x, y, d);
        }
        let x2 = self.map.round_x_with_direction(x, d);
        let y2 = self.map.round_y_with_direction(y, d);
        self.map.is_passable(x, y, d) && self.map.is_passable(x2, y2, d.reverse())
    }

    /// Occupancy layer at the destination `(x, y)`.
    pub fn is_collided_with_characters(&self, who: CharacterRef, x: i32, y: i32) -> bool {
        match who {
            CharacterRef::Follower(_) => false,
            CharacterRef::Entity(id) => {
                self.is_collided_with_any_entity(id, x, y)
                    || self.is_collided_with_vehicles(x, y)
                    || (self.store.entity(id).is_some_and(|e| e.character.is_normal_priority())
                        && self.player_is_collided(x, y))
            }
            CharacterRef::Player | CharacterRef::Vehicle(_) => {
                self.is_collided_with_normal_entities(x, y) || self.is_collided_with_vehicles(x, y)
            }
        }
    }

    fn is_collided_with_normal_entities(&self, x: i32, y: i32) -> bool {
        self.store
            .entities
            .iter()
            .any(|e| e.blocks(x, y) && e.character.is_normal_priority())
    }

    fn is_collided_with_any_entity(&self, mover: EntityId, x: i32, y: i32) -> bool {
        self.store.entities.iter().any(|e| e.id != mover && e.blocks(x, y))
    }

    /// A parked boat or ship on the current map.
    pub fn is_collided_with_vehicles(&self, x: i32, y: i32) -> bool {
        let map_id = self.map.map_id();
        [VehicleKind::Boat, VehicleKind::Ship]
            .into_iter()
            .any(|kind| self.store.vehicle(kind).blocks(map_id, x, y))
    }

    /// The player (unless through) or a visible follower is on `(x, y)`.
    pub fn player_is_collided(&self, x: i32, y: i32) -> bool {
        if self.store.player.character.through {
            return false;
        }
        self.store.player.character.pos(x, y) || self.store.followers.is_someone_collided(x, y)
    }
}
