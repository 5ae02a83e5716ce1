//! Per-tick controllers layered on the movement primitives.
//!
//! # Player tick
//!
//! ```text
//! update_dashing ─▶ move_by_input ─▶ stop / forced route ─▶ motion
//!               ─▶ boarding state machine ─▶ touch-here or clear destination
//! ```
//!
//! Followers, roaming entities and vehicles each get their own update; the
//! world calls them in that order after the player.

use log::debug;

use tw_behavior::{decide_roam, stop_count_threshold, RoamAction, WorldHooks};
use tw_core::{CharacterRef, Direction, EntityId, VehicleKind};
use tw_map::MapQuery;

use crate::{ActorStore, MobilityEngine, MoveContext, Pathfinder, PlayerInput, VehicleState};

impl<P: Pathfinder> MobilityEngine<P> {
    // ── Player ────────────────────────────────────────────────────────────

    /// Whether input may start a player step right now.
    pub fn player_can_move<M, H>(&self, cx: &MoveContext<'_, M, H>) -> bool
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let store = &*cx.store;
        let state = store.player.vehicle_state;
        !cx.hooks.is_interaction_running()
            && !store.player.character.route.is_forcing()
            && !store.followers.gathering
            && !state.is_transitioning()
            && state
                .vehicle()
                .is_none_or(|kind| store.vehicle(kind).can_move(self.max_altitude))
    }

    pub fn update_player<M, H>(&self, cx: &mut MoveContext<'_, M, H>, input: &PlayerInput)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        if let Some(dest) = input.destination {
            cx.store.player.destination = Some(dest);
        }
        let was_moving = cx.store.player.character.is_moving();
        self.update_dashing(cx, input);
        if !cx.hooks.is_interaction_running() {
            self.move_by_input(cx, input);
        }

        if cx.store.player.character.is_stopping() {
            cx.store.player.character.update_stop();
            if cx.store.player.character.route.is_forcing() {
                self.update_routine_move(cx, CharacterRef::Player);
            }
        }
        cx.store.player.character.update_motion(cx.map);
        self.update_vehicle_transition(cx);

        let player = &mut cx.store.player;
        if !player.character.is_moving() {
            if was_moving {
                let (x, y) = (player.character.x, player.character.y);
                cx.hooks.on_touch_here(CharacterRef::Player, x, y);
            } else {
                player.destination = None;
            }
        }
    }

    fn update_dashing<M, H>(&self, cx: &mut MoveContext<'_, M, H>, input: &PlayerInput)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        if cx.store.player.character.is_moving() {
            return;
        }
        let dashing = self.dash_enabled
            && self.player_can_move(cx)
            && cx.store.player.vehicle().is_none()
            && (input.dash || cx.store.player.destination.is_some());
        cx.store.player.character.dashing = dashing;
    }

    fn move_by_input<M, H>(&self, cx: &mut MoveContext<'_, M, H>, input: &PlayerInput)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        if cx.store.player.character.is_moving() || !self.player_can_move(cx) {
            return;
        }
        let direction = match input.direction {
            Some(d) => {
                cx.store.player.destination = None;
                Some(d)
            }
            None => match cx.store.player.destination {
                Some((gx, gy)) => self.find_direction_to(cx, CharacterRef::Player, gx, gy),
                None => None,
            },
        };
        if let Some(d) = direction {
            self.move_in(cx, CharacterRef::Player, d);
        }
    }

    /// Finish boarding or alighting once the chain has caught up.
    fn update_vehicle_transition<M, H>(&self, cx: &mut MoveContext<'_, M, H>)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let ActorStore { player, followers, vehicles, .. } = &mut *cx.store;
        match player.vehicle_state {
            VehicleState::Walking => {}
            _ if followers.gathering => {}
            VehicleState::Driving(kind) => {
                vehicles[kind.index()].sync_with(&player.character, cx.map);
            }
            VehicleState::Boarding(kind) => {
                if player.character.is_moving() {
                    return;
                }
                let vehicle = &mut vehicles[kind.index()];
                player.character.set_direction(vehicle.character.direction);
                player.character.move_speed = vehicle.character.move_speed;
                player.character.transparent = true;
                if kind.is_airborne() {
                    player.character.through = true;
                }
                vehicle.get_on();
                player.vehicle_state = VehicleState::Driving(kind);
                debug!("player boarded the {kind}");
            }
            VehicleState::Alighting(kind) => {
                if vehicles[kind.index()].is_lowest() {
                    player.character.transparent = false;
                    player.vehicle_state = VehicleState::Walking;
                    debug!("player left the {kind}");
                }
            }
        }
    }

    // ── Vehicles: boarding and alighting ──────────────────────────────────

    /// Board the vehicle under (airship) or in front of (boat, ship) the
    /// player, or leave the current one.
    pub fn get_on_off_vehicle<M, H>(&self, cx: &mut MoveContext<'_, M, H>) -> bool
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        if cx.store.player.vehicle().is_some() {
            self.get_off_vehicle(cx)
        } else {
            self.get_on_vehicle(cx)
        }
    }

    pub fn get_on_vehicle<M, H>(&self, cx: &mut MoveContext<'_, M, H>) -> bool
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let player = &cx.store.player;
        if player.vehicle_state != VehicleState::Walking
            || player.character.is_moving()
            || !self.player_can_move(cx)
        {
            return false;
        }
        let (x1, y1, d) = (player.character.x, player.character.y, player.character.direction);
        let x2 = cx.map.round_x_with_direction(x1, d);
        let y2 = cx.map.round_y_with_direction(y1, d);
        let map_id = cx.map.map_id();
        let parked = |kind: VehicleKind, x: i32, y: i32| {
            let v = cx.store.vehicle(kind);
            v.is_on_map(map_id) && v.character.pos(x, y)
        };
        let kind = if parked(VehicleKind::Airship, x1, y1) {
            VehicleKind::Airship
        } else if parked(VehicleKind::Ship, x2, y2) {
            VehicleKind::Ship
        } else if parked(VehicleKind::Boat, x2, y2) {
            VehicleKind::Boat
        } else {
            return false;
        };

        cx.store.player.vehicle_state = VehicleState::Boarding(kind);
        if !kind.is_airborne() {
            self.force_move_forward(cx, CharacterRef::Player);
        }
        cx.store.followers.gather();
        debug!("player boarding the {kind} at ({x1}, {y1})");
        true
    }

    pub fn get_off_vehicle<M, H>(&self, cx: &mut MoveContext<'_, M, H>) -> bool
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let VehicleState::Driving(kind) = cx.store.player.vehicle_state else {
            return false;
        };
        if cx.store.player.character.is_moving() || !self.player_can_move(cx) {
            return false;
        }
        let ch = &cx.store.player.character;
        let (x, y, d) = (ch.x, ch.y, ch.direction);
        if !self.is_land_ok(cx, kind, x, y, d) {
            return false;
        }

        let ActorStore { player, followers, vehicles, .. } = &mut *cx.store;
        if kind.is_airborne() {
            player.character.set_direction(Direction::Down);
        }
        followers.synchronize(cx.map, x, y, player.character.direction);
        vehicles[kind.index()].get_off();
        if !kind.is_airborne() {
            self.force_move_forward(cx, CharacterRef::Player);
            cx.store.player.character.transparent = false;
        }
        let player = &mut cx.store.player;
        player.vehicle_state = VehicleState::Alighting(kind);
        player.character.move_speed = 4;
        player.character.through = false;
        cx.store.followers.gather();
        debug!("player alighting from the {kind} at ({x}, {y})");
        true
    }

    /// Whether the player may leave `kind` standing on `(x, y)` facing `d`.
    ///
    /// The airship lands in place on a landing-ok tile with no entity on
    /// it; surface vessels unload onto the walkable tile ahead.
    pub fn is_land_ok<M, H>(&self, cx: &MoveContext<'_, M, H>, kind: VehicleKind, x: i32, y: i32, d: Direction) -> bool
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        if kind.is_airborne() {
            return cx.map.is_airship_land_ok(x, y) && cx.store.entities_at(x, y).next().is_none();
        }
        let x2 = cx.map.round_x_with_direction(x, d);
        let y2 = cx.map.round_y_with_direction(y, d);
        cx.map.is_valid(x2, y2)
            && cx.map.is_passable(x2, y2, d.reverse())
            && !cx.resolver().is_collided_with_characters(CharacterRef::Vehicle(kind), x2, y2)
    }

    /// Teleport the player; a driven vehicle and the chain come along.
    pub fn locate_player<M, H>(&self, cx: &mut MoveContext<'_, M, H>, x: i32, y: i32)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let ActorStore { player, followers, vehicles, .. } = &mut *cx.store;
        player.character.locate(cx.map, x, y);
        if let Some(kind) = player.vehicle() {
            vehicles[kind.index()].refresh(cx.map, &player.character);
        }
        followers.synchronize(cx.map, x, y, player.character.direction);
    }

    // ── Followers ─────────────────────────────────────────────────────────

    /// Each follower steps toward its predecessor, tail first.
    pub fn chase_followers<M, H>(&self, cx: &mut MoveContext<'_, M, H>)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        for i in (0..cx.store.followers.len()).rev() {
            let leader = if i == 0 {
                &cx.store.player.character
            } else {
                &cx.store.followers.followers[i - 1].character
            };
            let (lx, ly) = (leader.x, leader.y);
            self.chase_character(cx, i as u16, lx, ly);
        }
    }

    fn chase_character<M, H>(&self, cx: &mut MoveContext<'_, M, H>, slot: u16, lx: i32, ly: i32)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let who = CharacterRef::Follower(slot);
        let Some(ch) = cx.store.character(who) else {
            return;
        };
        let sx = cx.map.delta_x(ch.x, lx);
        let sy = cx.map.delta_y(ch.y, ly);
        let horz = if sx > 0 { Direction::Left } else { Direction::Right };
        let vert = if sy > 0 { Direction::Up } else { Direction::Down };
        if sx != 0 && sy != 0 {
            self.move_diagonally(cx, who, horz, vert);
        } else if sx != 0 {
            self.move_straight(cx, who, horz);
        } else if sy != 0 {
            self.move_straight(cx, who, vert);
        }
        let speed = cx.store.player.character.real_move_speed();
        if let Some(ch) = cx.store.character_mut(who) {
            ch.move_speed = speed;
        }
    }

    pub fn update_followers<M, H>(&self, cx: &mut MoveContext<'_, M, H>)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        if cx.store.followers.gathering {
            if !cx.store.followers.are_moving() {
                self.chase_followers(cx);
            }
            let (px, py) = (cx.store.player.character.x, cx.store.player.character.y);
            if cx.store.followers.are_gathered(px, py) {
                cx.store.followers.gathering = false;
                debug!("followers gathered at ({px}, {py})");
            }
        }

        for i in 0..cx.store.followers.len() {
            let who = CharacterRef::Follower(i as u16);
            self.update_character(cx, who);

            let ActorStore { player, followers, .. } = &mut *cx.store;
            let leader = &player.character;
            let ch = &mut followers.followers[i].character;
            ch.move_speed = leader.real_move_speed();
            ch.opacity = leader.opacity;
            ch.blend_mode = leader.blend_mode;
            ch.walk_anime = leader.walk_anime;
            ch.step_anime = leader.step_anime;
            ch.direction_fix = leader.direction_fix;
            ch.transparent = leader.transparent;
        }
    }

    /// Stop counting, forced route, then motion.
    fn update_character<M, H>(&self, cx: &mut MoveContext<'_, M, H>, who: CharacterRef)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let Some(ch) = cx.store.character_mut(who) else {
            return;
        };
        if ch.is_stopping() {
            ch.update_stop();
            if ch.route.is_forcing() {
                self.update_routine_move(cx, who);
            }
        }
        if let Some(ch) = cx.store.character_mut(who) {
            ch.update_motion(cx.map);
        }
    }

    // ── Roaming entities ──────────────────────────────────────────────────

    pub fn update_entities<M, H>(&self, cx: &mut MoveContext<'_, M, H>)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        for i in 0..cx.store.entities.len() {
            let entity = &mut cx.store.entities[i];
            if entity.erased {
                continue;
            }
            let id = entity.id;
            let who = CharacterRef::Entity(id);
            if entity.character.is_stopping() {
                if entity.locked {
                    entity.character.reset_stop_count();
                }
                entity.character.update_stop();
                if entity.character.route.is_forcing() {
                    self.update_routine_move(cx, who);
                } else {
                    self.update_self_movement(cx, id);
                }
            }
            cx.store.entities[i].character.update_motion(cx.map);
        }
    }

    /// Autonomous movement once the entity has rested long enough.
    fn update_self_movement<M, H>(&self, cx: &mut MoveContext<'_, M, H>, id: EntityId)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let (px, py) = (cx.store.player.character.x, cx.store.player.character.y);
        let Some(entity) = cx.store.entity_mut(id) else {
            return;
        };
        let ch = &mut entity.character;
        if entity.locked || !ch.check_stop(stop_count_threshold(ch.move_frequency)) {
            return;
        }
        let near = cx.map.distance(ch.x, ch.y, px, py) < self.near_player_distance;
        let who = CharacterRef::Entity(id);
        match decide_roam(entity.move_type, near, &mut ch.rng) {
            None => {}
            Some(RoamAction::Rest) => ch.reset_stop_count(),
            Some(RoamAction::StepRandom) => self.move_random(cx, who),
            Some(RoamAction::StepForward) => self.move_forward(cx, who),
            Some(RoamAction::StepTowardPlayer) => self.move_toward(cx, who, CharacterRef::Player),
            Some(RoamAction::RunRoute) => self.update_routine_move(cx, who),
        }
    }

    /// Hold the entity facing the player.
    pub fn lock_entity<M, H>(&self, cx: &mut MoveContext<'_, M, H>, id: EntityId)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let Some(entity) = cx.store.entity_mut(id) else {
            return;
        };
        if entity.locked {
            return;
        }
        entity.prelock_direction = entity.character.direction;
        entity.locked = true;
        self.turn_toward(cx, CharacterRef::Entity(id), CharacterRef::Player);
    }

    pub fn unlock_entity(&self, store: &mut ActorStore, id: EntityId) {
        if let Some(entity) = store.entity_mut(id) {
            if entity.locked {
                entity.locked = false;
                let d = entity.prelock_direction;
                entity.character.set_direction(d);
            }
        }
    }

    // ── Vehicles ──────────────────────────────────────────────────────────

    pub fn update_vehicles<M, H>(&self, cx: &mut MoveContext<'_, M, H>)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        for kind in VehicleKind::ALL {
            self.update_character(cx, CharacterRef::Vehicle(kind));
            let ActorStore { player, followers, vehicles, .. } = &mut *cx.store;
            let vehicle = &mut vehicles[kind.index()];
            if vehicle.driving && !followers.gathering {
                vehicle.sync_with(&player.character, cx.map);
            }
            vehicle.update_altitude(self.max_altitude);
        }
    }
}
