//! Flat save records for a world.
//!
//! A [`WorldRecord`] captures grid positions, facing, tunables, flags and
//! route cursors (including a forced route's memorized original).  Render
//! positions are not stored: restoring snaps every character onto its grid
//! tile with no motion in flight.
//!
//! Records are plain serde structs; JSON is the on-disk format.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use tw_behavior::MoveType;
use tw_character::{Character, CharacterImage, Priority};
use tw_core::{CharacterRef, Direction, MapId, Tick, VehicleKind};
use tw_map::MapQuery;
use tw_mobility::{ActorStore, MobilityError, VehicleState};
use tw_route::RouteInterpreter;

use crate::{SimError, SimResult};

// ── Per-character records ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub who:            CharacterRef,
    pub x:              i32,
    pub y:              i32,
    pub direction:      Direction,
    pub move_speed:     u8,
    pub move_frequency: u8,
    pub priority:       Priority,
    pub through:        bool,
    pub transparent:    bool,
    pub walk_anime:     bool,
    pub step_anime:     bool,
    pub direction_fix:  bool,
    pub image:          CharacterImage,
    pub opacity:        u8,
    pub blend_mode:     u8,
    pub route:          RouteInterpreter,
}

impl CharacterRecord {
    pub fn capture(who: CharacterRef, c: &Character) -> Self {
        Self {
            who,
            x:              c.x,
            y:              c.y,
            direction:      c.direction,
            move_speed:     c.move_speed,
            move_frequency: c.move_frequency,
            priority:       c.priority,
            through:        c.through,
            transparent:    c.transparent,
            walk_anime:     c.walk_anime,
            step_anime:     c.step_anime,
            direction_fix:  c.direction_fix,
            image:          c.image.clone(),
            opacity:        c.opacity,
            blend_mode:     c.blend_mode,
            route:          c.route.clone(),
        }
    }

    fn check<M: MapQuery + ?Sized>(&self, map: &M) -> SimResult<()> {
        if !map.is_valid(self.x, self.y) {
            return Err(MobilityError::OutOfMap { who: self.who, x: self.x, y: self.y }.into());
        }
        if !(1..=6).contains(&self.move_speed) {
            return Err(SimError::BadRecord { who: self.who, reason: format!("move speed {}", self.move_speed) });
        }
        if !(1..=5).contains(&self.move_frequency) {
            return Err(SimError::BadRecord {
                who:    self.who,
                reason: format!("move frequency {}", self.move_frequency),
            });
        }
        Ok(())
    }

    /// Overwrite `c` verbatim; the render position is reset to the grid.
    pub fn apply(&self, c: &mut Character) {
        c.cancel_motion();
        c.set_position(self.x, self.y);
        c.direction = self.direction;
        c.move_speed = self.move_speed;
        c.move_frequency = self.move_frequency;
        c.priority = self.priority;
        c.through = self.through;
        c.transparent = self.transparent;
        c.walk_anime = self.walk_anime;
        c.step_anime = self.step_anime;
        c.direction_fix = self.direction_fix;
        c.image = self.image.clone();
        c.opacity = self.opacity;
        c.blend_mode = self.blend_mode;
        c.route = self.route.clone();
        c.dashing = false;
        c.reset_stop_count();
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub character:         CharacterRecord,
    pub move_type:         MoveType,
    pub locked:            bool,
    pub prelock_direction: Direction,
    pub erased:            bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub kind:      VehicleKind,
    pub map_id:    MapId,
    pub x:         i32,
    pub y:         i32,
    pub direction: Direction,
    pub altitude:  u32,
    pub driving:   bool,
}

// ── WorldRecord ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldRecord {
    pub tick:              Tick,
    pub map_id:            MapId,
    pub player:            CharacterRecord,
    pub vehicle_state:     VehicleState,
    pub followers:         Vec<CharacterRecord>,
    pub members:           Vec<Option<String>>,
    pub followers_visible: bool,
    pub gathering:         bool,
    pub entities:          Vec<EntityRecord>,
    pub vehicles:          Vec<VehicleRecord>,
}

impl WorldRecord {
    pub fn capture(tick: Tick, map_id: MapId, store: &ActorStore) -> Self {
        let chain = &store.followers;
        Self {
            tick,
            map_id,
            player: CharacterRecord::capture(CharacterRef::Player, &store.player.character),
            vehicle_state: store.player.vehicle_state,
            followers: chain
                .followers
                .iter()
                .enumerate()
                .map(|(i, f)| CharacterRecord::capture(CharacterRef::Follower(i as u16), &f.character))
                .collect(),
            members: chain.followers.iter().map(|f| f.member.clone()).collect(),
            followers_visible: chain.visible,
            gathering: chain.gathering,
            entities: store
                .entities
                .iter()
                .map(|e| EntityRecord {
                    character:         CharacterRecord::capture(CharacterRef::Entity(e.id), &e.character),
                    move_type:         e.move_type,
                    locked:            e.locked,
                    prelock_direction: e.prelock_direction,
                    erased:            e.erased,
                })
                .collect(),
            vehicles: store
                .vehicles
                .iter()
                .map(|v| VehicleRecord {
                    kind:      v.kind,
                    map_id:    v.map_id,
                    x:         v.character.x,
                    y:         v.character.y,
                    direction: v.character.direction,
                    altitude:  v.altitude,
                    driving:   v.driving,
                })
                .collect(),
        }
    }

    /// Write every record into `store`.  Nothing is touched unless the whole
    /// record matches the store's shape and holds only values `map` and
    /// `max_altitude` allow.
    pub fn apply<M: MapQuery + ?Sized>(&self, store: &mut ActorStore, map: &M, max_altitude: u32) -> SimResult<()> {
        self.check_shape(store, map.map_id())?;
        self.check_values(map, max_altitude)?;

        let ActorStore { player, followers, entities, vehicles } = store;
        self.player.apply(&mut player.character);
        player.vehicle_state = self.vehicle_state;
        player.destination = None;

        for (f, rec) in followers.followers.iter_mut().zip(&self.followers) {
            rec.apply(&mut f.character);
        }
        for (f, member) in followers.followers.iter_mut().zip(&self.members) {
            f.member = member.clone();
        }
        followers.visible = self.followers_visible;
        followers.gathering = self.gathering;

        for (e, rec) in entities.iter_mut().zip(&self.entities) {
            rec.character.apply(&mut e.character);
            e.move_type = rec.move_type;
            e.locked = rec.locked;
            e.prelock_direction = rec.prelock_direction;
            e.erased = rec.erased;
        }

        for rec in &self.vehicles {
            let v = &mut vehicles[rec.kind.index()];
            v.character.cancel_motion();
            v.set_location(rec.map_id, rec.x, rec.y);
            v.character.direction = rec.direction;
            v.altitude = rec.altitude;
            v.driving = rec.driving;
            v.character.walk_anime = rec.driving;
            v.character.step_anime = rec.driving;
        }
        Ok(())
    }

    fn check_shape(&self, store: &ActorStore, current_map: MapId) -> SimResult<()> {
        if self.map_id != current_map {
            return Err(SimError::MapMismatch { recorded: self.map_id, current: current_map });
        }
        let counts = [
            (store.followers.len(), self.followers.len(), "followers"),
            (store.followers.len(), self.members.len(), "member slots"),
            (store.entities.len(), self.entities.len(), "entities"),
        ];
        for (expected, got, what) in counts {
            if expected != got {
                return Err(SimError::CountMismatch { expected, got, what });
            }
        }
        let expected_refs = (0..self.followers.len())
            .map(|i| CharacterRef::Follower(i as u16))
            .chain(store.entities.iter().map(|e| CharacterRef::Entity(e.id)));
        let recorded_refs = self
            .followers
            .iter()
            .map(|r| r.who)
            .chain(self.entities.iter().map(|r| r.character.who));
        for (expected, recorded) in expected_refs.zip(recorded_refs) {
            if expected != recorded {
                return Err(MobilityError::UnknownCharacter(recorded).into());
            }
        }
        if self.player.who != CharacterRef::Player {
            return Err(MobilityError::UnknownCharacter(self.player.who).into());
        }
        Ok(())
    }

    fn check_values<M: MapQuery + ?Sized>(&self, map: &M, max_altitude: u32) -> SimResult<()> {
        let characters = std::iter::once(&self.player)
            .chain(&self.followers)
            .chain(self.entities.iter().map(|e| &e.character));
        for rec in characters {
            rec.check(map)?;
        }
        for rec in &self.vehicles {
            let who = CharacterRef::Vehicle(rec.kind);
            let ceiling = if rec.kind.is_airborne() { max_altitude } else { 0 };
            if rec.altitude > ceiling {
                return Err(SimError::BadRecord {
                    who,
                    reason: format!("altitude {} above {ceiling}", rec.altitude),
                });
            }
            if rec.map_id == map.map_id() && !map.is_valid(rec.x, rec.y) {
                return Err(MobilityError::OutOfMap { who, x: rec.x, y: rec.y }.into());
            }
        }
        Ok(())
    }

    // ── JSON ──────────────────────────────────────────────────────────────

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> SimResult<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: R) -> SimResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save_path<P: AsRef<Path>>(&self, path: P) -> SimResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load_path<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        Self::read_from(BufReader::new(File::open(path)?))
    }
}
