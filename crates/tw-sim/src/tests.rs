//! Integration tests for tw-sim.

use tw_behavior::{HookEvent, MoveType, RecordingHooks};
use tw_character::CharacterBuilder;
use tw_core::{CharacterRef, Direction, EngineConfig, EntityId, MapId, Tick, VehicleKind};
use tw_map::TileMap;
use tw_mobility::{ActorStore, RoamingEntity, VehicleState};
use tw_route::{MoveCommand, MoveRoute};

use crate::{
    load_config_reader, NoopObserver, PlayerInput, SimError, World, WorldBuilder, WorldObserver,
    WorldRecord,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config() -> EngineConfig {
    EngineConfig { seed: 42, snapshot_interval_ticks: 10, ..EngineConfig::default() }
}

/// 12×8 meadow with a pond in the lower-right corner.
fn meadow() -> TileMap {
    TileMap::from_ascii(
        MapId(1),
        &[
            "............",
            "............",
            "....##......",
            "............",
            "........~~~~",
            "........~~~~",
            "........~~~~",
            "........~~~~",
        ],
    )
    .unwrap()
}

fn party_world() -> World<TileMap, RecordingHooks> {
    WorldBuilder::new(test_config(), meadow())
        .hooks(RecordingHooks::new())
        .player_at(2, 1)
        .followers(&["ana", "bo", "cy"])
        .entity(10, 1, MoveType::Random)
        .vehicle(VehicleKind::Boat, MapId(1), 8, 5)
        .build()
        .unwrap()
}

// ── WorldBuilder validation ───────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let world = WorldBuilder::new(test_config(), meadow()).build().unwrap();
        assert!(world.store.followers.is_empty());
        assert!(world.store.entities.is_empty());
        assert_eq!((world.store.player.character.x, world.store.player.character.y), (0, 0));
        assert_eq!(world.now(), Tick(0));
    }

    #[test]
    fn party_is_stacked_on_the_player() {
        let world = party_world();
        for f in &world.store.followers.followers {
            assert_eq!((f.character.x, f.character.y), (2, 1));
            assert!(f.member.is_some());
        }
        assert!(world.store.vehicle(VehicleKind::Boat).is_on_map(MapId(1)));
    }

    #[test]
    fn out_of_map_player_errors() {
        let r = WorldBuilder::new(test_config(), meadow()).player_at(12, 0).build();
        assert!(matches!(r, Err(SimError::Mobility(_))));
    }

    #[test]
    fn out_of_map_entity_errors() {
        let r = WorldBuilder::new(test_config(), meadow()).entity(3, 30, MoveType::Fixed).build();
        assert!(matches!(r, Err(SimError::Mobility(_))));
    }

    #[test]
    fn vehicles_on_other_maps_are_not_checked() {
        let r = WorldBuilder::new(test_config(), meadow())
            .vehicle(VehicleKind::Ship, MapId(9), 40, 40)
            .build();
        assert!(r.is_ok());
    }

    #[test]
    fn invalid_config_errors() {
        let config = EngineConfig { search_limit: 0, ..EngineConfig::default() };
        let r = WorldBuilder::new(config, meadow()).build();
        assert!(matches!(r, Err(SimError::Config(_))));
    }

    #[test]
    fn custom_entities_keep_their_character() {
        let character = CharacterBuilder::new(CharacterRef::Entity(EntityId(0)), 1)
            .at(5, 5)
            .facing(Direction::Up)
            .speed(2)
            .build();
        let world = WorldBuilder::new(test_config(), meadow())
            .entity_character(character, MoveType::Fixed)
            .build()
            .unwrap();
        let ch = &world.store.entities[0].character;
        assert_eq!((ch.x, ch.y, ch.direction, ch.move_speed), (5, 5, Direction::Up, 2));
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[derive(Default)]
    struct TickCounter {
        starts:    usize,
        ends:      usize,
        snapshots: Vec<Tick>,
    }

    impl WorldObserver for TickCounter {
        fn on_tick_start(&mut self, _t: Tick) {
            self.starts += 1;
        }
        fn on_tick_end(&mut self, _t: Tick, _actors: &ActorStore) {
            self.ends += 1;
        }
        fn on_snapshot(&mut self, t: Tick, _actors: &ActorStore) {
            self.snapshots.push(t);
        }
    }

    #[test]
    fn run_ticks_advances_clock() {
        let mut world = party_world();
        world.run_ticks(25, &PlayerInput::idle(), &mut NoopObserver);
        assert_eq!(world.now(), Tick(25));
    }

    #[test]
    fn run_secs_uses_the_frame_rate() {
        let config = EngineConfig { frames_per_second: 30, ..test_config() };
        let mut world = WorldBuilder::new(config, meadow()).build().unwrap();
        world.run_secs(2, &PlayerInput::idle(), &mut NoopObserver);
        assert_eq!(world.now(), Tick(60));
        assert_eq!(world.clock.to_string(), "00:02+00");
    }

    #[test]
    fn observer_sees_every_tick_and_snapshot() {
        let mut world = party_world();
        let mut obs = TickCounter::default();
        world.run_ticks(25, &PlayerInput::idle(), &mut obs);
        assert_eq!(obs.starts, 25);
        assert_eq!(obs.ends, 25);
        assert_eq!(obs.snapshots, vec![Tick(0), Tick(10), Tick(20)]);
    }

    #[test]
    fn destination_walk_brings_the_party() {
        let mut world = party_world();
        world.lock_entity(EntityId(0)).unwrap();
        world.update(&PlayerInput::destination(6, 3));
        assert!(world.settle(2_000, &mut NoopObserver));
        world.gather_followers();
        assert!(world.settle(2_000, &mut NoopObserver));
        let p = &world.store.player.character;
        assert_eq!((p.x, p.y), (6, 3));
        for f in &world.store.followers.followers {
            assert_eq!((f.character.x, f.character.y), (6, 3));
        }
    }

    #[test]
    fn forced_route_runs_inside_the_tick() {
        let mut world = party_world();
        let route = MoveRoute::new(vec![
            MoveCommand::Move(Direction::Down),
            MoveCommand::Move(Direction::Down),
            MoveCommand::Turn(Direction::Left),
        ]);
        world.force_move_route(CharacterRef::Player, route).unwrap();
        world.run_ticks(200, &PlayerInput::idle(), &mut NoopObserver);
        let p = &world.store.player.character;
        assert_eq!((p.x, p.y, p.direction), (2, 3, Direction::Left));
        assert!(!p.route.is_forcing());
    }

    #[test]
    fn same_seed_same_run() {
        let run = || {
            let mut world = party_world();
            world.run_ticks(500, &PlayerInput::idle(), &mut NoopObserver);
            let e = &world.store.entities[0].character;
            (e.x, e.y, e.direction)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn touch_events_reach_the_hooks() {
        let mut world = party_world();
        world.update(&PlayerInput::toward(Direction::Down));
        world.settle(100, &mut NoopObserver);
        let events = world.hooks.drain();
        assert!(events.contains(&HookEvent::TouchHere { who: CharacterRef::Player, x: 2, y: 2 }));

        world.locate_player(4, 1).unwrap();
        world.update(&PlayerInput::toward(Direction::Down));
        let events = world.hooks.drain();
        assert!(events.contains(&HookEvent::TouchFront { who: CharacterRef::Player, x: 4, y: 2 }));
        assert_eq!(world.store.player.character.y, 1);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod command_tests {
    use super::*;
    use tw_map::MapQuery;

    #[test]
    fn board_sail_and_alight() {
        let mut world = party_world();
        world.lock_entity(EntityId(0)).unwrap();
        world.locate_player(7, 5).unwrap();
        world.store.player.character.set_direction(Direction::Right);
        assert!(world.get_on_off_vehicle());
        assert!(world.settle(500, &mut NoopObserver));
        assert_eq!(world.store.player.vehicle_state, VehicleState::Driving(VehicleKind::Boat));

        world.update(&PlayerInput::toward(Direction::Right));
        assert!(world.settle(500, &mut NoopObserver));
        let boat = &world.store.vehicle(VehicleKind::Boat).character;
        assert_eq!((boat.x, boat.y), (9, 5));

        world.update(&PlayerInput::toward(Direction::Up));
        assert!(world.settle(500, &mut NoopObserver));
        assert_eq!(world.store.player.character.y, 4);
        world.store.player.character.set_direction(Direction::Up);
        assert!(world.get_on_off_vehicle());
        assert!(world.settle(500, &mut NoopObserver));
        assert_eq!(world.store.player.vehicle_state, VehicleState::Walking);
        assert_eq!((world.store.player.character.x, world.store.player.character.y), (9, 3));
    }

    #[test]
    fn lock_and_erase_entities() {
        let mut world = party_world();
        world.lock_entity(EntityId(0)).unwrap();
        assert!(world.store.entities[0].locked);
        world.unlock_entity(EntityId(0));
        assert!(!world.store.entities[0].locked);
        world.erase_entity(EntityId(0)).unwrap();
        assert!(world.store.entities[0].erased);
        assert!(world.lock_entity(EntityId(7)).is_err());
    }

    #[test]
    fn membership_change_refused_while_gathering() {
        let mut world = party_world();
        world.gather_followers();
        assert!(matches!(world.set_members(&["solo"]), Err(SimError::Mobility(_))));
    }

    #[test]
    fn transfer_swaps_map_and_entities() {
        let mut world = party_world();
        let cave = TileMap::open(MapId(2), 6, 6).unwrap();
        let bat = CharacterBuilder::new(CharacterRef::Entity(EntityId(0)), 9).at(1, 1).build();
        let entities = vec![RoamingEntity::new(EntityId(0), bat, MoveType::Random)];
        world.transfer(cave, entities, 3, 4).unwrap();

        assert_eq!(world.map.map_id(), MapId(2));
        assert_eq!(world.store.entities.len(), 1);
        assert_eq!((world.store.player.character.x, world.store.player.character.y), (3, 4));
        for f in &world.store.followers.followers {
            assert_eq!((f.character.x, f.character.y), (3, 4));
        }
        assert!(world.store.vehicle(VehicleKind::Boat).character.transparent);
    }

    #[test]
    fn transfer_rejects_bad_positions() {
        let mut world = party_world();
        let cave = TileMap::open(MapId(2), 6, 6).unwrap();
        assert!(world.transfer(cave, Vec::new(), 6, 0).is_err());
        assert_eq!(world.map.map_id(), MapId(1));
    }
}

// ── Persistence ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod persist_tests {
    use super::*;

    #[test]
    fn record_round_trips_through_json() {
        let mut world = party_world();
        let route = MoveRoute::repeating(vec![MoveCommand::Move(Direction::Right)]);
        world.set_move_route(CharacterRef::Player, route).unwrap();
        world
            .force_move_route(CharacterRef::Player, MoveRoute::new(vec![MoveCommand::Wait(5)]))
            .unwrap();
        world.run_ticks(3, &PlayerInput::idle(), &mut NoopObserver);

        let record = world.record();
        let json = record.to_json().unwrap();
        let back = WorldRecord::from_json(&json).unwrap();
        assert_eq!(back, record);
        assert!(back.player.route.is_forcing());
        assert!(back.player.route.memorized().is_some());
    }

    #[test]
    fn restore_snaps_to_grid() {
        let mut world = party_world();
        let saved = world.record();
        world.update(&PlayerInput::toward(Direction::Down));
        assert!(world.store.player.character.is_moving());

        world.restore(&saved).unwrap();
        let p = &world.store.player.character;
        assert_eq!((p.x, p.y), (2, 1));
        assert_eq!((p.real_x, p.real_y), (2.0, 1.0));
        assert!(!p.is_moving());
        assert_eq!(world.now(), Tick(0));
    }

    #[test]
    fn restore_rejects_foreign_records() {
        let mut world = party_world();
        let mut record = world.record();
        record.map_id = MapId(5);
        assert!(matches!(world.restore(&record), Err(SimError::MapMismatch { .. })));

        let mut record = world.record();
        record.followers.pop();
        assert!(matches!(world.restore(&record), Err(SimError::CountMismatch { .. })));

        let mut record = world.record();
        record.entities[0].character.who = CharacterRef::Entity(EntityId(3));
        assert!(matches!(world.restore(&record), Err(SimError::Mobility(_))));
    }

    #[test]
    fn restore_rejects_impossible_altitudes() {
        let mut world = party_world();
        let mut record = world.record();
        let airship = VehicleKind::Airship.index();
        record.vehicles[airship].altitude = 500;
        record.vehicles[airship].driving = true;
        assert!(matches!(world.restore(&record), Err(SimError::BadRecord { .. })));

        let mut record = world.record();
        record.vehicles[VehicleKind::Boat.index()].altitude = 7;
        assert!(matches!(world.restore(&record), Err(SimError::BadRecord { .. })));

        world.run_ticks(100, &PlayerInput::idle(), &mut NoopObserver);
        assert_eq!(world.store.vehicle(VehicleKind::Airship).altitude, 0);
        assert_eq!(world.store.vehicle(VehicleKind::Boat).altitude, 0);

        let mut record = world.record();
        record.vehicles[airship].altitude = world.config.max_altitude;
        assert!(world.restore(&record).is_ok());
    }

    #[test]
    fn restore_rejects_off_map_positions() {
        let mut world = party_world();
        let mut record = world.record();
        record.player.x = -40;
        record.player.y = 900;
        assert!(matches!(world.restore(&record), Err(SimError::Mobility(_))));
        assert_eq!((world.store.player.character.x, world.store.player.character.y), (2, 1));

        let mut record = world.record();
        record.vehicles[VehicleKind::Boat.index()].x = 30;
        assert!(matches!(world.restore(&record), Err(SimError::Mobility(_))));

        // Vehicles parked elsewhere are not checked against this map.
        let mut record = world.record();
        let ship = &mut record.vehicles[VehicleKind::Ship.index()];
        ship.map_id = MapId(9);
        ship.x = 30;
        assert!(world.restore(&record).is_ok());
    }

    #[test]
    fn restore_rejects_out_of_range_tunables() {
        let mut world = party_world();
        let mut record = world.record();
        record.player.move_speed = 255;
        assert!(matches!(world.restore(&record), Err(SimError::BadRecord { .. })));

        let mut record = world.record();
        record.followers[1].move_frequency = 0;
        assert!(matches!(world.restore(&record), Err(SimError::BadRecord { .. })));

        let held = PlayerInput { dash: true, ..PlayerInput::toward(Direction::Down) };
        world.run_ticks(40, &held, &mut NoopObserver);
        assert_eq!(world.store.player.character.move_speed, 4);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(WorldRecord::from_json("{\"tick\": 1"), Err(SimError::Json(_))));
    }

    #[test]
    fn save_and_load_file() {
        let world = party_world();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        world.record().save_path(&path).unwrap();
        assert_eq!(WorldRecord::load_path(&path).unwrap(), world.record());
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config = load_config_reader(r#"{ "seed": 7, "max_altitude": 32 }"#.as_bytes()).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_altitude, 32);
        assert_eq!(config.search_limit, 12);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let r = load_config_reader(r#"{ "frames_per_second": 0 }"#.as_bytes());
        assert!(matches!(r, Err(SimError::Config(_))));
    }
}
