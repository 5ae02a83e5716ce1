//! Unit tests for tw-mobility.

use tw_behavior::{HookEvent, MoveType, RecordingHooks};
use tw_character::{CharacterBuilder, Priority};
use tw_core::{CharacterRef, Direction, EngineConfig, EntityId, MapId, VehicleKind};
use tw_map::{MapQuery, TileMap, TileMapBuilder};
use tw_route::{MoveCommand, MoveRoute};

use crate::{
    ActorStore, BestFirstPathfinder, CollisionResolver, MobilityEngine, MoveContext, Pathfinder,
    PlayerInput, RoamingEntity, VehicleState,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const PLAYER: CharacterRef = CharacterRef::Player;

fn open_map() -> TileMap {
    TileMap::open(MapId(1), 20, 20).unwrap()
}

fn ascii(rows: &[&str]) -> TileMap {
    TileMap::from_ascii(MapId(1), rows).unwrap()
}

/// Map, actors, hooks and engine with default tunables.
struct Fixture {
    map: TileMap,
    store: ActorStore,
    hooks: RecordingHooks,
    engine: MobilityEngine,
}

impl Fixture {
    fn new(map: TileMap, followers: usize) -> Self {
        Self::with_config(map, followers, EngineConfig::default())
    }

    fn with_config(map: TileMap, followers: usize, config: EngineConfig) -> Self {
        let mut store = ActorStore::new(config.seed, followers, config.followers_visible);
        let names: Vec<String> = (0..followers).map(|i| format!("member{i}")).collect();
        store.followers.set_members(&names).unwrap();
        Self {
            map,
            store,
            hooks: RecordingHooks::new(),
            engine: MobilityEngine::from_config(&config),
        }
    }

    fn run<R>(&mut self, f: impl FnOnce(&MobilityEngine, &mut MoveContext<'_, TileMap, RecordingHooks>) -> R) -> R {
        let mut cx = MoveContext::new(&mut self.store, &self.map, &mut self.hooks);
        f(&self.engine, &mut cx)
    }

    fn place(&mut self, who: CharacterRef, x: i32, y: i32) {
        self.engine.place(&mut self.store, &self.map, who, x, y).unwrap();
    }

    fn add_entity(&mut self, x: i32, y: i32, move_type: MoveType) -> EntityId {
        let id = EntityId(self.store.entities.len() as u32);
        let character = CharacterBuilder::new(CharacterRef::Entity(id), 3).at(x, y).frequency(5).build();
        self.store.push_entity(RoamingEntity::new(id, character, move_type))
    }

    /// One full world tick in update order.
    fn tick(&mut self, input: &PlayerInput) {
        self.run(|engine, cx| {
            engine.update_player(cx, input);
            engine.update_followers(cx);
            engine.update_entities(cx);
            engine.update_vehicles(cx);
        });
    }

    /// Idle ticks until nothing is in flight.
    fn settle(&mut self) -> usize {
        for n in 0..1_000 {
            let busy = self.store.player.character.is_moving()
                || self.store.followers.gathering
                || self.store.player.vehicle_state.is_transitioning();
            if !busy {
                return n;
            }
            self.tick(&PlayerInput::idle());
        }
        panic!("world never settled");
    }

    fn player_pos(&self) -> (i32, i32) {
        (self.store.player.character.x, self.store.player.character.y)
    }
}

// ── Collision ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod collision {
    use super::*;

    #[test]
    fn blocked_move_only_turns_and_touches() {
        let mut fx = Fixture::new(ascii(&["...", ".#.", "..."]), 0);
        fx.place(PLAYER, 0, 1);
        let ok = fx.run(|e, cx| e.move_straight(cx, PLAYER, Direction::Right));
        assert!(!ok);
        let p = &fx.store.player.character;
        assert_eq!((p.x, p.y), (0, 1));
        assert_eq!(p.direction, Direction::Right);
        assert!(!p.movement_success);
        assert_eq!(fx.hooks.drain(), vec![HookEvent::TouchFront { who: PLAYER, x: 1, y: 1 }]);
    }

    #[test]
    fn off_map_is_blocked() {
        let mut fx = Fixture::new(open_map(), 0);
        fx.place(PLAYER, 0, 0);
        assert!(!fx.run(|e, cx| e.move_straight(cx, PLAYER, Direction::Up)));
        assert_eq!(fx.player_pos(), (0, 0));
    }

    #[test]
    fn diagonal_needs_one_clear_l_shape() {
        // Up-right from (1, 1): the up-first detour is walled, right-first is open.
        let mut fx = Fixture::new(ascii(&[".#.", "...", "..."]), 0);
        fx.place(PLAYER, 1, 1);
        assert!(fx.run(|e, cx| e.move_diagonally(cx, PLAYER, Direction::Right, Direction::Up)));
        assert_eq!(fx.player_pos(), (2, 0));

        let mut fx = Fixture::new(ascii(&[".#.", "..#", "..."]), 0);
        fx.place(PLAYER, 1, 1);
        assert!(!fx.run(|e, cx| e.move_diagonally(cx, PLAYER, Direction::Right, Direction::Up)));
        assert_eq!(fx.player_pos(), (1, 1));
    }

    #[test]
    fn diagonal_facing_snaps_from_opposite() {
        let mut fx = Fixture::new(open_map(), 0);
        fx.place(PLAYER, 5, 5);
        fx.store.player.character.set_direction(Direction::Left);
        fx.run(|e, cx| e.move_diagonally(cx, PLAYER, Direction::Right, Direction::Down));
        assert_eq!(fx.store.player.character.direction, Direction::Right);
    }

    #[test]
    fn entity_priority_decides_blocking() {
        let mut fx = Fixture::new(open_map(), 0);
        fx.place(PLAYER, 2, 2);
        let id = fx.add_entity(3, 2, MoveType::Fixed);
        let resolver = CollisionResolver::new(&fx.map, &fx.store);
        assert!(!resolver.can_pass(PLAYER, 2, 2, Direction::Right));

        fx.store.entity_mut(id).unwrap().character.priority = Priority::Below;
        let resolver = CollisionResolver::new(&fx.map, &fx.store);
        assert!(resolver.can_pass(PLAYER, 2, 2, Direction::Right));
    }

    #[test]
    fn entities_are_blocked_by_visible_followers_only() {
        let mut fx = Fixture::new(open_map(), 1);
        fx.place(PLAYER, 9, 9);
        fx.place(CharacterRef::Follower(0), 3, 2);
        let id = fx.add_entity(2, 2, MoveType::Fixed);
        let who = CharacterRef::Entity(id);
        assert!(!CollisionResolver::new(&fx.map, &fx.store).can_pass(who, 2, 2, Direction::Right));

        fx.store.followers.hide();
        assert!(CollisionResolver::new(&fx.map, &fx.store).can_pass(who, 2, 2, Direction::Right));
    }

    #[test]
    fn followers_and_debug_through_ignore_everything() {
        let mut fx = Fixture::new(ascii(&[".#."]), 1);
        fx.place(PLAYER, 0, 0);
        fx.place(CharacterRef::Follower(0), 0, 0);
        let resolver = CollisionResolver::new(&fx.map, &fx.store);
        assert!(resolver.can_pass(CharacterRef::Follower(0), 0, 0, Direction::Right));
        assert!(!resolver.can_pass(PLAYER, 0, 0, Direction::Right));

        fx.store.player.debug_through = true;
        assert!(CollisionResolver::new(&fx.map, &fx.store).can_pass(PLAYER, 0, 0, Direction::Right));
    }

    #[test]
    fn parked_boat_blocks_only_on_its_map() {
        let mut fx = Fixture::new(open_map(), 0);
        fx.place(PLAYER, 2, 2);
        fx.store.vehicle_mut(VehicleKind::Boat).set_location(MapId(1), 3, 2);
        assert!(!CollisionResolver::new(&fx.map, &fx.store).can_pass(PLAYER, 2, 2, Direction::Right));

        fx.store.vehicle_mut(VehicleKind::Boat).set_location(MapId(2), 3, 2);
        assert!(CollisionResolver::new(&fx.map, &fx.store).can_pass(PLAYER, 2, 2, Direction::Right));
    }

    #[test]
    fn erased_entities_do_not_block() {
        let mut fx = Fixture::new(open_map(), 0);
        fx.place(PLAYER, 2, 2);
        let id = fx.add_entity(3, 2, MoveType::Fixed);
        fx.store.entity_mut(id).unwrap().erase();
        assert!(fx.run(|e, cx| e.move_straight(cx, PLAYER, Direction::Right)));
    }
}

// ── Path finder ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod pathfinder {
    use super::*;

    fn step<M: MapQuery>(map: &M, start: (i32, i32), goal: (i32, i32)) -> Option<Direction> {
        let finder = BestFirstPathfinder::new(12);
        finder.find_direction(map, start, goal, |x, y, d| {
            let x2 = map.round_x_with_direction(x, d);
            let y2 = map.round_y_with_direction(y, d);
            map.is_valid(x2, y2) && map.is_passable(x, y, d) && map.is_passable(x2, y2, d.reverse())
        })
    }

    #[test]
    fn open_map_heads_straight() {
        assert_eq!(step(&open_map(), (0, 0), (5, 0)), Some(Direction::Right));
        assert_eq!(step(&open_map(), (4, 9), (4, 2)), Some(Direction::Up));
    }

    #[test]
    fn on_goal_is_none() {
        assert_eq!(step(&open_map(), (3, 3), (3, 3)), None);
    }

    #[test]
    fn detours_around_a_wall() {
        let map = ascii(&["..#..", "..#..", "....."]);
        assert_eq!(step(&map, (1, 0), (3, 0)), Some(Direction::Down));
    }

    #[test]
    fn unreachable_goal_still_makes_progress() {
        let map = ascii(&["..#.."]);
        assert_eq!(step(&map, (0, 0), (4, 0)), Some(Direction::Right));
    }

    #[test]
    fn walled_in_start_heads_toward_goal() {
        let map = ascii(&[".#...", "#....", "....."]);
        assert_eq!(step(&map, (0, 0), (4, 2)), Some(Direction::Right));
        assert_eq!(step(&map, (0, 0), (1, 2)), Some(Direction::Down));
    }

    #[test]
    fn wraps_on_looping_maps() {
        let map = TileMapBuilder::new(MapId(1), 10, 10).with_loop(true, false).build().unwrap();
        assert_eq!(step(&map, (0, 0), (9, 0)), Some(Direction::Left));
    }

    #[test]
    fn destination_walk_reaches_goal() {
        let mut fx = Fixture::new(ascii(&["..#..", "..#..", "....."]), 0);
        fx.place(PLAYER, 0, 0);
        fx.tick(&PlayerInput::destination(4, 0));
        for _ in 0..500 {
            fx.tick(&PlayerInput::idle());
            if fx.store.player.destination.is_none() {
                break;
            }
        }
        assert_eq!(fx.player_pos(), (4, 0));
        assert!(fx.store.player.destination.is_none());
        let touches = fx.hooks.drain().into_iter().filter(|e| matches!(e, HookEvent::TouchHere { .. })).count();
        assert_eq!(touches, 8);
    }
}

// ── Routes through the engine ─────────────────────────────────────────────────

#[cfg(test)]
mod routes {
    use super::*;
    use tw_route::ExternalCall;

    /// Routine-move the player until its forced route ends.
    fn drain_forced(fx: &mut Fixture) {
        for _ in 0..100 {
            if !fx.store.player.character.route.is_forcing() {
                return;
            }
            fx.run(|e, cx| e.update_routine_move(cx, PLAYER));
        }
        panic!("forced route never ended");
    }

    #[test]
    fn nested_force_restores_the_original() {
        let mut fx = Fixture::new(open_map(), 0);
        let original = MoveRoute::repeating(vec![MoveCommand::Turn(Direction::Up)]);
        fx.engine.set_move_route(&mut fx.store, PLAYER, original.clone()).unwrap();
        fx.engine
            .force_move_route(&mut fx.store, PLAYER, MoveRoute::new(vec![MoveCommand::Turn(Direction::Left)]))
            .unwrap();
        fx.engine
            .force_move_route(&mut fx.store, PLAYER, MoveRoute::new(vec![MoveCommand::Turn(Direction::Right)]))
            .unwrap();

        drain_forced(&mut fx);
        let route = &fx.store.player.character.route;
        assert_eq!(route.route(), Some(&original));
        assert_eq!(route.index(), 0);
        assert_eq!(fx.store.player.character.direction, Direction::Right);
    }

    #[test]
    fn unknown_reference_is_an_error() {
        let mut fx = Fixture::new(open_map(), 0);
        let r = fx.engine.force_move_route(&mut fx.store, CharacterRef::Entity(EntityId(9)), MoveRoute::default());
        assert!(r.is_err());
    }

    #[test]
    fn failed_step_retries_unless_skippable() {
        let mut fx = Fixture::new(ascii(&[".#"]), 0);
        fx.place(PLAYER, 0, 0);
        let route = MoveRoute::new(vec![MoveCommand::Move(Direction::Right), MoveCommand::Turn(Direction::Down)]);
        fx.engine.force_move_route(&mut fx.store, PLAYER, route.clone()).unwrap();
        fx.run(|e, cx| e.update_routine_move(cx, PLAYER));
        assert_eq!(fx.store.player.character.route.index(), 0);

        fx.engine.force_move_route(&mut fx.store, PLAYER, route.with_skippable(true)).unwrap();
        fx.run(|e, cx| e.update_routine_move(cx, PLAYER));
        assert_eq!(fx.store.player.character.route.index(), 1);
    }

    #[test]
    fn wait_holds_the_route() {
        let mut fx = Fixture::new(open_map(), 0);
        let route = MoveRoute::new(vec![MoveCommand::Wait(3), MoveCommand::Turn(Direction::Up)]);
        fx.engine.force_move_route(&mut fx.store, PLAYER, route).unwrap();
        for _ in 0..3 {
            fx.run(|e, cx| e.update_routine_move(cx, PLAYER));
            assert_eq!(fx.store.player.character.direction, Direction::Down);
        }
        fx.run(|e, cx| e.update_routine_move(cx, PLAYER));
        assert_eq!(fx.store.player.character.direction, Direction::Up);
    }

    #[test]
    fn invoke_reaches_hooks() {
        let mut fx = Fixture::new(open_map(), 0);
        let call = ExternalCall::SetSwitch { id: 4, value: true };
        let route = MoveRoute::new(vec![MoveCommand::Invoke(call.clone())]);
        fx.engine.force_move_route(&mut fx.store, PLAYER, route).unwrap();
        fx.run(|e, cx| e.update_routine_move(cx, PLAYER));
        assert_eq!(fx.hooks.externals().collect::<Vec<_>>(), vec![&call]);
    }

    #[test]
    fn attribute_commands_clamp() {
        let mut fx = Fixture::new(open_map(), 0);
        fx.run(|e, cx| {
            e.execute_command(cx, PLAYER, &MoveCommand::ChangeSpeed(9));
            e.execute_command(cx, PLAYER, &MoveCommand::ChangeFrequency(0));
            e.execute_command(cx, PLAYER, &MoveCommand::Through(true));
        });
        let p = &fx.store.player.character;
        assert_eq!((p.move_speed, p.move_frequency, p.through), (6, 1, true));
    }

    #[test]
    fn move_backward_keeps_facing() {
        let mut fx = Fixture::new(open_map(), 0);
        fx.place(PLAYER, 5, 5);
        fx.store.player.character.set_direction(Direction::Right);
        fx.run(|e, cx| e.move_backward(cx, PLAYER));
        let p = &fx.store.player.character;
        assert_eq!((p.x, p.direction, p.direction_fix), (4, Direction::Right, false));
    }

    #[test]
    fn toward_and_away_use_the_longer_axis() {
        let mut fx = Fixture::new(open_map(), 0);
        fx.place(PLAYER, 5, 5);
        let id = fx.add_entity(1, 4, MoveType::Fixed);
        let who = CharacterRef::Entity(id);
        fx.run(|e, cx| e.move_toward(cx, who, PLAYER));
        assert_eq!(fx.store.entity(id).unwrap().character.x, 2);
        fx.store.entity_mut(id).unwrap().character.straighten();
        fx.run(|e, cx| {
            e.move_away(cx, who, PLAYER);
            e.turn_toward(cx, who, PLAYER);
        });
        let ch = &fx.store.entity(id).unwrap().character;
        assert_eq!((ch.x, ch.direction), (1, Direction::Right));
    }

    #[test]
    fn player_jump_takes_the_chain() {
        let mut fx = Fixture::new(open_map(), 2);
        fx.place(PLAYER, 5, 5);
        fx.place(CharacterRef::Follower(0), 5, 4);
        fx.place(CharacterRef::Follower(1), 5, 3);
        fx.run(|e, cx| e.jump(cx, PLAYER, 2, 0));
        assert_eq!(fx.player_pos(), (7, 5));
        for f in &fx.store.followers.followers {
            assert!(f.character.is_jumping());
            assert_eq!((f.character.x, f.character.y), (7, 5));
        }
    }
}

// ── Followers ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod followers {
    use super::*;

    fn trailing_party() -> Fixture {
        let mut fx = Fixture::new(open_map(), 3);
        fx.place(PLAYER, 5, 5);
        for i in 0..3 {
            fx.place(CharacterRef::Follower(i), 4 - i as i32, 5);
        }
        fx
    }

    fn follower_pos(fx: &Fixture, i: usize) -> (i32, i32) {
        let c = &fx.store.followers.followers[i].character;
        (c.x, c.y)
    }

    #[test]
    fn player_step_pulls_chain_tail_first() {
        let mut fx = trailing_party();
        assert!(fx.run(|e, cx| e.move_straight(cx, PLAYER, Direction::Right)));
        assert_eq!(fx.player_pos(), (6, 5));
        assert_eq!(follower_pos(&fx, 0), (5, 5));
        assert_eq!(follower_pos(&fx, 1), (4, 5));
        assert_eq!(follower_pos(&fx, 2), (3, 5));
    }

    #[test]
    fn gather_converges_on_the_leader() {
        let mut fx = trailing_party();
        fx.store.followers.gather();
        let ticks = fx.settle();
        assert!(ticks < 200);
        assert!(!fx.store.followers.gathering);
        for i in 0..3 {
            assert_eq!(follower_pos(&fx, i), (5, 5));
        }
    }

    #[test]
    fn membership_is_frozen_while_gathering() {
        let mut fx = trailing_party();
        fx.store.followers.gather();
        assert!(fx.store.followers.set_members(&["a"]).is_err());
        fx.settle();
        assert!(fx.store.followers.set_members(&["a"]).is_ok());
        assert!(fx.store.followers.set_members(&["a", "b", "c", "d"]).is_err());
    }

    #[test]
    fn followers_copy_the_leader() {
        let mut fx = trailing_party();
        fx.store.player.character.opacity = 128;
        fx.store.player.character.transparent = true;
        fx.tick(&PlayerInput { dash: true, ..PlayerInput::toward(Direction::Right) });
        assert!(fx.store.player.character.dashing);
        for f in &fx.store.followers.followers {
            assert_eq!(f.character.opacity, 128);
            assert!(f.character.transparent);
            assert_eq!(f.character.move_speed, 5);
        }
    }

    #[test]
    fn locate_stacks_the_chain() {
        let mut fx = trailing_party();
        fx.run(|e, cx| e.locate_player(cx, 10, 12));
        for i in 0..3 {
            assert_eq!(follower_pos(&fx, i), (10, 12));
        }
    }
}

// ── Vehicles ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod vehicles {
    use super::*;

    fn harbour() -> Fixture {
        let map = ascii(&["..~~~", "..~~~", "....."]);
        let mut fx = Fixture::new(map, 1);
        fx.place(PLAYER, 1, 0);
        fx.store.player.character.set_direction(Direction::Right);
        fx.store.vehicle_mut(VehicleKind::Boat).set_location(MapId(1), 2, 0);
        fx.run(|e, cx| e.locate_player(cx, 1, 0));
        fx
    }

    #[test]
    fn boat_round_trip() {
        let mut fx = harbour();
        assert!(fx.run(|e, cx| e.get_on_off_vehicle(cx)));
        assert_eq!(fx.store.player.vehicle_state, VehicleState::Boarding(VehicleKind::Boat));
        fx.settle();
        assert_eq!(fx.store.player.vehicle_state, VehicleState::Driving(VehicleKind::Boat));
        assert_eq!(fx.player_pos(), (2, 0));
        assert!(fx.store.vehicle(VehicleKind::Boat).driving);

        // Water only.
        assert!(fx.run(|e, cx| e.move_straight(cx, PLAYER, Direction::Down)));
        fx.settle();
        assert!(!fx.run(|e, cx| e.move_straight(cx, PLAYER, Direction::Down)));
        let boat = &fx.store.vehicle(VehicleKind::Boat).character;
        assert_eq!((boat.x, boat.y), (2, 1));

        fx.store.player.character.set_direction(Direction::Left);
        assert!(fx.run(|e, cx| e.get_on_off_vehicle(cx)));
        fx.settle();
        assert_eq!(fx.store.player.vehicle_state, VehicleState::Walking);
        assert_eq!(fx.player_pos(), (1, 1));
        assert!(!fx.store.player.character.through);
        assert!(!fx.store.vehicle(VehicleKind::Boat).driving);
    }

    #[test]
    fn driven_boat_waits_for_gathering() {
        let mut fx = harbour();
        fx.run(|e, cx| e.get_on_vehicle(cx));
        fx.settle();
        assert!(fx.run(|e, cx| e.move_straight(cx, PLAYER, Direction::Down)));
        fx.store.followers.gather();

        fx.tick(&PlayerInput::idle());
        assert!(fx.store.followers.gathering);
        let boat = &fx.store.vehicle(VehicleKind::Boat).character;
        assert_eq!((boat.x, boat.y), (2, 0));

        fx.settle();
        let boat = &fx.store.vehicle(VehicleKind::Boat).character;
        assert_eq!((boat.x, boat.y), (2, 1));
    }

    #[test]
    fn cannot_alight_onto_water() {
        let mut fx = harbour();
        fx.run(|e, cx| e.get_on_vehicle(cx));
        fx.settle();
        fx.store.player.character.set_direction(Direction::Right);
        assert!(!fx.run(|e, cx| e.get_off_vehicle(cx)));
    }

    #[test]
    fn nothing_to_board() {
        let mut fx = harbour();
        fx.store.player.character.set_direction(Direction::Down);
        assert!(!fx.run(|e, cx| e.get_on_vehicle(cx)));
        assert_eq!(fx.store.player.vehicle_state, VehicleState::Walking);
    }

    #[test]
    fn airship_altitude_is_bounded() {
        let config = EngineConfig { max_altitude: 6, ..EngineConfig::default() };
        let mut fx = Fixture::with_config(open_map(), 0, config);
        fx.place(PLAYER, 4, 4);
        fx.store.vehicle_mut(VehicleKind::Airship).set_location(MapId(1), 4, 4);
        assert!(fx.run(|e, cx| e.get_on_vehicle(cx)));
        fx.settle();
        assert_eq!(fx.store.player.vehicle_state, VehicleState::Driving(VehicleKind::Airship));

        for _ in 0..20 {
            let can_move = fx.run(|e, cx| e.player_can_move(cx));
            let airship = fx.store.vehicle(VehicleKind::Airship);
            assert!(airship.altitude <= 6);
            assert_eq!(can_move, airship.is_highest(6));
            fx.tick(&PlayerInput::idle());
        }
        assert!(fx.store.vehicle(VehicleKind::Airship).is_highest(6));

        assert!(fx.run(|e, cx| e.get_off_vehicle(cx)));
        assert_eq!(fx.store.player.character.direction, Direction::Down);
        fx.settle();
        assert_eq!(fx.store.player.vehicle_state, VehicleState::Walking);
        assert_eq!(fx.store.vehicle(VehicleKind::Airship).altitude, 0);
        assert_eq!(fx.player_pos(), (4, 4));
    }

    #[test]
    fn airship_will_not_land_on_an_entity() {
        let mut fx = Fixture::new(open_map(), 0);
        fx.place(PLAYER, 4, 4);
        fx.store.vehicle_mut(VehicleKind::Airship).set_location(MapId(1), 4, 4);
        fx.run(|e, cx| e.get_on_vehicle(cx));
        for _ in 0..100 {
            fx.tick(&PlayerInput::idle());
        }
        fx.add_entity(4, 4, MoveType::Fixed);
        assert!(!fx.run(|e, cx| e.get_off_vehicle(cx)));
    }
}

// ── Roaming entities ──────────────────────────────────────────────────────────

#[cfg(test)]
mod roaming {
    use super::*;

    #[test]
    fn fixed_entity_stays_put() {
        let mut fx = Fixture::new(open_map(), 0);
        let id = fx.add_entity(3, 3, MoveType::Fixed);
        for _ in 0..300 {
            fx.tick(&PlayerInput::idle());
        }
        let ch = &fx.store.entity(id).unwrap().character;
        assert_eq!((ch.x, ch.y), (3, 3));
    }

    #[test]
    fn random_roamer_wanders_on_passable_tiles() {
        let mut fx = Fixture::new(ascii(&["#####", "#...#", "#...#", "#####"]), 0);
        fx.place(PLAYER, 3, 2);
        let id = fx.add_entity(1, 1, MoveType::Random);
        let mut moved = false;
        for _ in 0..600 {
            fx.tick(&PlayerInput::idle());
            let ch = &fx.store.entity(id).unwrap().character;
            assert!(fx.map.is_passable(ch.x, ch.y, Direction::Down));
            assert_ne!((ch.x, ch.y), (3, 2));
            moved |= (ch.x, ch.y) != (1, 1);
        }
        assert!(moved);
    }

    #[test]
    fn toward_player_closes_in() {
        let mut fx = Fixture::new(open_map(), 0);
        fx.place(PLAYER, 10, 10);
        let id = fx.add_entity(4, 10, MoveType::TowardPlayer);
        for _ in 0..1_000 {
            fx.tick(&PlayerInput::idle());
        }
        let ch = &fx.store.entity(id).unwrap().character;
        assert!(fx.map.distance(ch.x, ch.y, 10, 10) < 6);
    }

    #[test]
    fn custom_roamer_runs_its_route() {
        let mut fx = Fixture::new(open_map(), 0);
        let id = fx.add_entity(5, 5, MoveType::Custom);
        let route = MoveRoute::repeating(vec![MoveCommand::Move(Direction::Right), MoveCommand::Move(Direction::Left)]);
        fx.engine.set_move_route(&mut fx.store, CharacterRef::Entity(id), route).unwrap();
        let mut seen = Vec::new();
        for _ in 0..300 {
            fx.tick(&PlayerInput::idle());
            seen.push(fx.store.entity(id).unwrap().character.x);
        }
        assert!(seen.iter().all(|&x| x == 5 || x == 6));
        assert!(seen.contains(&6));
    }

    #[test]
    fn lock_faces_player_and_unlock_restores() {
        let mut fx = Fixture::new(open_map(), 0);
        fx.place(PLAYER, 5, 8);
        let id = fx.add_entity(5, 5, MoveType::Random);
        fx.store.entity_mut(id).unwrap().character.set_direction(Direction::Left);
        fx.run(|e, cx| e.lock_entity(cx, id));
        assert_eq!(fx.store.entity(id).unwrap().character.direction, Direction::Down);
        for _ in 0..300 {
            fx.tick(&PlayerInput::idle());
        }
        let ch = &fx.store.entity(id).unwrap().character;
        assert_eq!((ch.x, ch.y), (5, 5));

        fx.engine.unlock_entity(&mut fx.store, id);
        let e = fx.store.entity(id).unwrap();
        assert!(!e.locked);
        assert_eq!(e.character.direction, Direction::Left);
    }

    #[test]
    fn erased_entity_is_skipped() {
        let mut fx = Fixture::new(open_map(), 0);
        let id = fx.add_entity(5, 5, MoveType::Random);
        fx.store.entity_mut(id).unwrap().erase();
        for _ in 0..300 {
            fx.tick(&PlayerInput::idle());
        }
        let ch = &fx.store.entity(id).unwrap().character;
        assert_eq!((ch.x, ch.y), (5, 5));
    }
}

// ── Player input ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod player {
    use super::*;

    #[test]
    fn held_direction_walks_and_touches_here() {
        let mut fx = Fixture::new(open_map(), 0);
        fx.place(PLAYER, 2, 2);
        fx.tick(&PlayerInput::toward(Direction::Down));
        assert_eq!(fx.player_pos(), (2, 3));
        fx.settle();
        assert_eq!(fx.hooks.drain(), vec![HookEvent::TouchHere { who: PLAYER, x: 2, y: 3 }]);
    }

    #[test]
    fn interaction_blocks_input() {
        let mut fx = Fixture::new(open_map(), 0);
        fx.place(PLAYER, 2, 2);
        fx.hooks.interaction_running = true;
        fx.tick(&PlayerInput::toward(Direction::Down));
        assert_eq!(fx.player_pos(), (2, 2));
    }

    #[test]
    fn dash_needs_config() {
        let config = EngineConfig { dash_enabled: false, ..EngineConfig::default() };
        let mut fx = Fixture::with_config(open_map(), 0, config);
        fx.place(PLAYER, 2, 2);
        fx.tick(&PlayerInput { dash: true, ..PlayerInput::toward(Direction::Down) });
        assert!(!fx.store.player.character.dashing);
        assert_eq!(fx.store.player.character.real_move_speed(), 4);
    }

    #[test]
    fn out_of_map_placement_is_an_error() {
        let mut fx = Fixture::new(open_map(), 0);
        assert!(fx.engine.place(&mut fx.store, &fx.map, PLAYER, 20, 0).is_err());
    }
}
