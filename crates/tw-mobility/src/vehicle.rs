//! Boats, ships and the airship.

use tw_character::{Character, CharacterBuilder, Priority};
use tw_core::{CharacterRef, Direction, MapId, VehicleKind};
use tw_map::MapQuery;

pub struct Vehicle {
    pub kind: VehicleKind,
    pub character: Character,
    /// Map the vehicle is parked on (or being driven on).
    pub map_id: MapId,
    pub altitude: u32,
    pub driving: bool,
}

impl Vehicle {
    /// A parked vehicle nowhere in particular.
    pub fn new(kind: VehicleKind, seed: u64) -> Self {
        let character = CharacterBuilder::new(CharacterRef::Vehicle(kind), seed)
            .facing(Direction::Left)
            .speed(kind.default_move_speed())
            .walk_anime(false)
            .priority(if kind.is_airborne() { Priority::Below } else { Priority::Normal })
            .build();
        Self { kind, character, map_id: MapId::INVALID, altitude: 0, driving: false }
    }

    pub fn set_location(&mut self, map_id: MapId, x: i32, y: i32) {
        self.map_id = map_id;
        self.character.set_position(x, y);
    }

    #[inline]
    pub fn is_on_map(&self, map_id: MapId) -> bool {
        self.map_id == map_id
    }

    /// Parked on `map_id` at `(x, y)` and solid.
    pub fn blocks(&self, map_id: MapId, x: i32, y: i32) -> bool {
        !self.kind.is_airborne()
            && !self.driving
            && self.is_on_map(map_id)
            && self.character.pos_nt(x, y)
    }

    #[inline]
    pub fn is_lowest(&self) -> bool {
        self.altitude == 0
    }

    #[inline]
    pub fn is_highest(&self, max_altitude: u32) -> bool {
        self.altitude >= max_altitude
    }

    /// Surface vessels can always move; the airship only at full altitude.
    pub fn can_move(&self, max_altitude: u32) -> bool {
        !self.kind.is_airborne() || self.is_highest(max_altitude)
    }

    /// Terrain rule while this vehicle is driven from `(x, y)` toward `d`.
    pub fn is_map_passable<M: MapQuery + ?Sized>(&self, map: &M, x: i32, y: i32, d: Direction) -> bool {
        let x2 = map.round_x_with_direction(x, d);
        let y2 = map.round_y_with_direction(y, d);
        match self.kind {
            VehicleKind::Boat => map.is_boat_passable(x2, y2),
            VehicleKind::Ship => map.is_ship_passable(x2, y2),
            VehicleKind::Airship => true,
        }
    }

    pub fn get_on(&mut self) {
        self.driving = true;
        self.character.walk_anime = true;
        self.character.step_anime = true;
    }

    pub fn get_off(&mut self) {
        self.driving = false;
        self.character.walk_anime = false;
        self.character.step_anime = false;
        self.character.set_direction(Direction::Left);
    }

    /// Follow the driver.
    pub fn sync_with<M: MapQuery + ?Sized>(&mut self, driver: &Character, map: &M) {
        self.character.copy_position(driver);
        self.character.refresh_bush_depth(map);
    }

    /// Re-derive map-dependent state after the driver is relocated or the
    /// map changes.
    pub fn refresh<M: MapQuery + ?Sized>(&mut self, map: &M, driver: &Character) {
        if self.driving {
            self.map_id = map.map_id();
            self.sync_with(driver, map);
        } else if self.is_on_map(map.map_id()) {
            let (x, y) = (self.character.x, self.character.y);
            self.character.locate(map, x, y);
        }
        if !self.kind.is_airborne() {
            self.character.priority = Priority::Normal;
        }
        self.character.walk_anime = self.driving;
        self.character.step_anime = self.driving;
        self.character.transparent = !self.is_on_map(map.map_id());
    }

    /// Ease the airship one unit toward its target altitude and update its
    /// draw layer.  No-op for surface vessels.
    pub fn update_altitude(&mut self, max_altitude: u32) {
        if !self.kind.is_airborne() {
            return;
        }
        if self.driving && !self.is_highest(max_altitude) {
            self.altitude += 1;
        }
        if !self.driving && !self.is_lowest() {
            self.altitude -= 1;
        }
        self.character.step_anime = self.is_highest(max_altitude);
        self.character.priority = if self.is_lowest() { Priority::Below } else { Priority::Above };
    }
}
