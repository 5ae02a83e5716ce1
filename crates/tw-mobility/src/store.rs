//! `ActorStore` — every character in the world, addressed by `CharacterRef`.

use tw_character::Character;
use tw_core::{CharacterRef, EntityId, VehicleKind};

use crate::{FollowerChain, MobilityError, MobilityResult, Player, RoamingEntity, Vehicle};

/// Owns the player, the follower chain, the current map's roaming entities,
/// and the three vehicles.
///
/// Characters never point at each other; all cross-character lookups go
/// through [`ActorStore::character`].
pub struct ActorStore {
    pub player: Player,
    pub followers: FollowerChain,
    /// Indexed by `EntityId`.
    pub entities: Vec<RoamingEntity>,
    /// Indexed by `VehicleKind::index()`.
    pub vehicles: [Vehicle; 3],
}

impl ActorStore {
    pub fn new(seed: u64, follower_slots: usize, followers_visible: bool) -> Self {
        Self {
            player: Player::new(seed),
            followers: FollowerChain::new(follower_slots, seed, followers_visible),
            entities: Vec::new(),
            vehicles: VehicleKind::ALL.map(|kind| Vehicle::new(kind, seed)),
        }
    }

    pub fn character(&self, who: CharacterRef) -> Option<&Character> {
        match who {
            CharacterRef::Player => Some(&self.player.character),
            CharacterRef::Follower(i) => self.followers.get(i as usize).map(|f| &f.character),
            CharacterRef::Entity(id) => self.entities.get(id.index()).map(|e| &e.character),
            CharacterRef::Vehicle(kind) => Some(&self.vehicles[kind.index()].character),
        }
    }

    pub fn character_mut(&mut self, who: CharacterRef) -> Option<&mut Character> {
        match who {
            CharacterRef::Player => Some(&mut self.player.character),
            CharacterRef::Follower(i) => self.followers.get_mut(i as usize).map(|f| &mut f.character),
            CharacterRef::Entity(id) => self.entities.get_mut(id.index()).map(|e| &mut e.character),
            CharacterRef::Vehicle(kind) => Some(&mut self.vehicles[kind.index()].character),
        }
    }

    pub fn try_character_mut(&mut self, who: CharacterRef) -> MobilityResult<&mut Character> {
        self.character_mut(who).ok_or(MobilityError::UnknownCharacter(who))
    }

    #[inline]
    pub fn vehicle(&self, kind: VehicleKind) -> &Vehicle {
        &self.vehicles[kind.index()]
    }

    #[inline]
    pub fn vehicle_mut(&mut self, kind: VehicleKind) -> &mut Vehicle {
        &mut self.vehicles[kind.index()]
    }

    pub fn entity(&self, id: EntityId) -> Option<&RoamingEntity> {
        self.entities.get(id.index())
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut RoamingEntity> {
        self.entities.get_mut(id.index())
    }

    /// Append a roaming entity; its id is its index.
    pub fn push_entity(&mut self, mut entity: RoamingEntity) -> EntityId {
        let id = EntityId(self.entities.len() as u32);
        entity.id = id;
        self.entities.push(entity);
        id
    }

    /// Active roaming entities standing on `(x, y)`, through or not.
    pub fn entities_at(&self, x: i32, y: i32) -> impl Iterator<Item = &RoamingEntity> {
        self.entities.iter().filter(move |e| e.is_active() && e.character.pos(x, y))
    }
}
