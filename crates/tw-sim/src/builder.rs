//! Fluent builder for constructing a [`World`].

use tw_behavior::{MoveType, NoopHooks, WorldHooks};
use tw_character::{Character, CharacterBuilder};
use tw_core::{CharacterRef, Direction, EngineConfig, EntityId, FrameClock, MapId, VehicleKind};
use tw_map::MapQuery;
use tw_mobility::{
    ActorStore, BestFirstPathfinder, MobilityEngine, MobilityError, Pathfinder, RoamingEntity,
};
use tw_route::MoveRoute;

use crate::{SimResult, World};

/// A roaming entity waiting to be placed.
enum EntitySpec {
    At { x: i32, y: i32, move_type: MoveType, route: Option<MoveRoute> },
    Character { character: Character, move_type: MoveType },
}

/// Fluent builder for [`World<M, H, P>`].
///
/// # Required inputs
///
/// - [`EngineConfig`] — seed, path-finder limit, airship ceiling, …
/// - `M: MapQuery` — the starting map (e.g. [`tw_map::TileMap`])
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                           |
/// |-----------------------|-----------------------------------|
/// | `.hooks(h)`           | [`NoopHooks`]                     |
/// | `.pathfinder(p)`      | `BestFirstPathfinder(search_limit)` |
/// | `.player_at(x, y)`    | `(0, 0)` facing down              |
/// | `.followers(members)` | no followers                      |
/// | `.entity(..)`         | no roaming entities               |
/// | `.vehicle(..)`        | every vehicle parked nowhere      |
///
/// # Example
///
/// ```rust
/// use tw_behavior::MoveType;
/// use tw_core::{EngineConfig, MapId, VehicleKind};
/// use tw_map::TileMap;
/// use tw_sim::WorldBuilder;
///
/// let map = TileMap::from_ascii(MapId(1), &["....~", "....~"]).unwrap();
/// let world = WorldBuilder::new(EngineConfig::default(), map)
///     .player_at(1, 1)
///     .followers(&["ana", "bo"])
///     .entity(3, 0, MoveType::Random)
///     .vehicle(VehicleKind::Boat, MapId(1), 4, 0)
///     .build()
///     .unwrap();
/// assert_eq!(world.store.followers.len(), 2);
/// ```
pub struct WorldBuilder<M: MapQuery, H: WorldHooks = NoopHooks, P: Pathfinder = BestFirstPathfinder> {
    config:     EngineConfig,
    map:        M,
    hooks:      H,
    pathfinder: P,
    player:     (i32, i32),
    facing:     Direction,
    members:    Vec<String>,
    entities:   Vec<EntitySpec>,
    vehicles:   Vec<(VehicleKind, MapId, i32, i32)>,
}

impl<M: MapQuery> WorldBuilder<M> {
    pub fn new(config: EngineConfig, map: M) -> Self {
        let pathfinder = BestFirstPathfinder::new(config.search_limit);
        Self {
            config,
            map,
            hooks: NoopHooks,
            pathfinder,
            player: (0, 0),
            facing: Direction::Down,
            members: Vec::new(),
            entities: Vec::new(),
            vehicles: Vec::new(),
        }
    }
}

impl<M: MapQuery, H: WorldHooks, P: Pathfinder> WorldBuilder<M, H, P> {
    /// Replace the hooks collaborator.
    pub fn hooks<H2: WorldHooks>(self, hooks: H2) -> WorldBuilder<M, H2, P> {
        WorldBuilder {
            config:     self.config,
            map:        self.map,
            hooks,
            pathfinder: self.pathfinder,
            player:     self.player,
            facing:     self.facing,
            members:    self.members,
            entities:   self.entities,
            vehicles:   self.vehicles,
        }
    }

    /// Replace the path finder.
    pub fn pathfinder<P2: Pathfinder>(self, pathfinder: P2) -> WorldBuilder<M, H, P2> {
        WorldBuilder {
            config:   self.config,
            map:      self.map,
            hooks:    self.hooks,
            pathfinder,
            player:   self.player,
            facing:   self.facing,
            members:  self.members,
            entities: self.entities,
            vehicles: self.vehicles,
        }
    }

    pub fn player_at(mut self, x: i32, y: i32) -> Self {
        self.player = (x, y);
        self
    }

    pub fn player_facing(mut self, d: Direction) -> Self {
        self.facing = d;
        self
    }

    /// One follower per party member, in chain order.
    pub fn followers<S: AsRef<str>>(mut self, members: &[S]) -> Self {
        self.members = members.iter().map(|m| m.as_ref().to_string()).collect();
        self
    }

    /// A roaming entity at `(x, y)`; ids follow insertion order.
    pub fn entity(mut self, x: i32, y: i32, move_type: MoveType) -> Self {
        self.entities.push(EntitySpec::At { x, y, move_type, route: None });
        self
    }

    /// A roaming entity running `route` on its own ([`MoveType::Custom`]).
    pub fn entity_with_route(mut self, x: i32, y: i32, route: MoveRoute) -> Self {
        self.entities.push(EntitySpec::At { x, y, move_type: MoveType::Custom, route: Some(route) });
        self
    }

    /// A fully configured roaming entity.
    pub fn entity_character(mut self, character: Character, move_type: MoveType) -> Self {
        self.entities.push(EntitySpec::Character { character, move_type });
        self
    }

    pub fn vehicle(mut self, kind: VehicleKind, map_id: MapId, x: i32, y: i32) -> Self {
        self.vehicles.push((kind, map_id, x, y));
        self
    }

    /// Validate inputs, place every character, and return a ready-to-run
    /// [`World`].
    pub fn build(self) -> SimResult<World<M, H, P>> {
        self.config.validate()?;
        let engine = MobilityEngine::new(self.pathfinder, &self.config);
        let seed = self.config.seed;

        let mut store = ActorStore::new(seed, self.members.len(), self.config.followers_visible);
        store.followers.set_members(self.members.as_slice())?;

        let (px, py) = self.player;
        engine.place(&mut store, &self.map, CharacterRef::Player, px, py)?;
        store.player.character.set_direction(self.facing);
        store.followers.synchronize(&self.map, px, py, self.facing);

        for (i, spec) in self.entities.into_iter().enumerate() {
            let id = EntityId(i as u32);
            let (character, move_type) = match spec {
                EntitySpec::At { x, y, move_type, route } => {
                    let mut b = CharacterBuilder::new(CharacterRef::Entity(id), seed).at(x, y);
                    if let Some(route) = route {
                        b = b.route(route);
                    }
                    (b.build(), move_type)
                }
                EntitySpec::Character { character, move_type } => (character, move_type),
            };
            let (x, y) = (character.x, character.y);
            let id = store.push_entity(RoamingEntity::new(id, character, move_type));
            engine.place(&mut store, &self.map, CharacterRef::Entity(id), x, y)?;
        }

        let map_id = self.map.map_id();
        for (kind, vmap, x, y) in self.vehicles {
            if vmap == map_id && !self.map.is_valid(x, y) {
                return Err(MobilityError::OutOfMap { who: CharacterRef::Vehicle(kind), x, y }.into());
            }
            let ActorStore { player, vehicles, .. } = &mut store;
            let vehicle = &mut vehicles[kind.index()];
            vehicle.set_location(vmap, x, y);
            vehicle.refresh(&self.map, &player.character);
        }

        Ok(World {
            clock: FrameClock::new(self.config.frames_per_second),
            config: self.config,
            map: self.map,
            store,
            hooks: self.hooks,
            engine,
        })
    }
}
