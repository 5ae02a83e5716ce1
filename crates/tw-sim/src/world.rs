//! The `World` struct and its tick loop.

use log::debug;

use tw_behavior::{NoopHooks, WorldHooks};
use tw_core::{CharacterRef, EngineConfig, EntityId, FrameClock, MapId, Tick, VehicleKind};
use tw_map::MapQuery;
use tw_mobility::{
    ActorStore, BestFirstPathfinder, MobilityEngine, MobilityError, MoveContext, Pathfinder,
    PlayerInput, RoamingEntity,
};
use tw_route::MoveRoute;

use crate::{SimResult, WorldObserver, WorldRecord};

/// One map's worth of characters plus the engine that moves them.
///
/// Each [`World::step`] updates, in order:
///
/// 1. the player (input, forced route, motion, boarding state),
/// 2. the follower chain,
/// 3. every roaming entity,
/// 4. the three vehicles.
///
/// Create via [`WorldBuilder`][crate::WorldBuilder].
pub struct World<M: MapQuery, H: WorldHooks = NoopHooks, P: Pathfinder = BestFirstPathfinder> {
    pub config: EngineConfig,

    /// Tick counter, also used for snapshot cadence.
    pub clock: FrameClock,

    /// The current map.  Replaced wholesale by [`World::transfer`].
    pub map: M,

    pub store: ActorStore,

    /// Receives touch and external-call events.
    pub hooks: H,

    pub engine: MobilityEngine<P>,
}

impl<M: MapQuery, H: WorldHooks, P: Pathfinder> World<M, H, P> {
    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Advance one tick with no observer.
    pub fn update(&mut self, input: &PlayerInput) {
        self.step(input, &mut crate::NoopObserver);
    }

    /// Advance one tick, reporting to `observer`.
    pub fn step<O: WorldObserver>(&mut self, input: &PlayerInput, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        self.with_context(|engine, cx| {
            engine.update_player(cx, input);
            engine.update_followers(cx);
            engine.update_entities(cx);
            engine.update_vehicles(cx);
        });

        observer.on_tick_end(now, &self.store);
        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.store);
        }
        self.clock.advance();
    }

    /// Run `n` ticks holding the same input.
    pub fn run_ticks<O: WorldObserver>(&mut self, n: u64, input: &PlayerInput, observer: &mut O) {
        for _ in 0..n {
            self.step(input, observer);
        }
    }

    /// Run `secs` seconds of frames at the configured rate.
    pub fn run_secs<O: WorldObserver>(&mut self, secs: u64, input: &PlayerInput, observer: &mut O) {
        let frames = self.clock.frames_in(secs);
        self.run_ticks(frames, input, observer);
    }

    /// Idle until the player, the chain, and any boarding transition are at
    /// rest, giving up after `max_ticks`.  Returns whether it settled.
    pub fn settle<O: WorldObserver>(&mut self, max_ticks: u64, observer: &mut O) -> bool {
        for _ in 0..max_ticks {
            if self.is_settled() {
                return true;
            }
            self.step(&PlayerInput::idle(), observer);
        }
        self.is_settled()
    }

    pub fn is_settled(&self) -> bool {
        let player = &self.store.player;
        !player.character.is_moving()
            && player.destination.is_none()
            && !self.store.followers.gathering
            && !player.vehicle_state.is_transitioning()
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    /// Borrow the engine and a [`MoveContext`] over this world.
    pub fn with_context<R>(&mut self, f: impl FnOnce(&MobilityEngine<P>, &mut MoveContext<'_, M, H>) -> R) -> R {
        let mut cx = MoveContext::new(&mut self.store, &self.map, &mut self.hooks);
        f(&self.engine, &mut cx)
    }

    // ── Commands ──────────────────────────────────────────────────────────

    pub fn force_move_route(&mut self, who: CharacterRef, route: MoveRoute) -> SimResult<()> {
        Ok(self.engine.force_move_route(&mut self.store, who, route)?)
    }

    pub fn set_move_route(&mut self, who: CharacterRef, route: MoveRoute) -> SimResult<()> {
        Ok(self.engine.set_move_route(&mut self.store, who, route)?)
    }

    /// Board or leave a vehicle; `false` if nothing happened.
    pub fn get_on_off_vehicle(&mut self) -> bool {
        self.with_context(|engine, cx| engine.get_on_off_vehicle(cx))
    }

    pub fn gather_followers(&mut self) {
        self.store.followers.gather();
    }

    pub fn set_members<S: AsRef<str>>(&mut self, members: &[S]) -> SimResult<()> {
        Ok(self.store.followers.set_members(members)?)
    }

    pub fn lock_entity(&mut self, id: EntityId) -> SimResult<()> {
        self.store.entity(id).ok_or(MobilityError::UnknownCharacter(CharacterRef::Entity(id)))?;
        self.with_context(|engine, cx| engine.lock_entity(cx, id));
        Ok(())
    }

    pub fn unlock_entity(&mut self, id: EntityId) {
        self.engine.unlock_entity(&mut self.store, id);
    }

    pub fn erase_entity(&mut self, id: EntityId) -> SimResult<()> {
        let entity = self
            .store
            .entity_mut(id)
            .ok_or(MobilityError::UnknownCharacter(CharacterRef::Entity(id)))?;
        entity.erase();
        Ok(())
    }

    /// Teleport the player (and chain, and driven vehicle) on the current map.
    pub fn locate_player(&mut self, x: i32, y: i32) -> SimResult<()> {
        if !self.map.is_valid(x, y) {
            return Err(MobilityError::OutOfMap { who: CharacterRef::Player, x, y }.into());
        }
        self.with_context(|engine, cx| engine.locate_player(cx, x, y));
        Ok(())
    }

    /// Park `kind` on `map_id` at `(x, y)`.  Positions are only checked
    /// against the current map.
    pub fn set_vehicle_location(&mut self, kind: VehicleKind, map_id: MapId, x: i32, y: i32) -> SimResult<()> {
        if map_id == self.map.map_id() && !self.map.is_valid(x, y) {
            return Err(MobilityError::OutOfMap { who: CharacterRef::Vehicle(kind), x, y }.into());
        }
        let ActorStore { player, vehicles, .. } = &mut self.store;
        let vehicle = &mut vehicles[kind.index()];
        vehicle.set_location(map_id, x, y);
        vehicle.refresh(&self.map, &player.character);
        Ok(())
    }

    // ── Map transfer ──────────────────────────────────────────────────────

    /// Swap in `map` and its roaming entities and put the player on `(x, y)`.
    ///
    /// Entity ids are reassigned by position in `entities`.
    pub fn transfer(&mut self, map: M, entities: Vec<RoamingEntity>, x: i32, y: i32) -> SimResult<()> {
        if !map.is_valid(x, y) {
            return Err(MobilityError::OutOfMap { who: CharacterRef::Player, x, y }.into());
        }
        for e in &entities {
            let (ex, ey) = (e.character.x, e.character.y);
            if !map.is_valid(ex, ey) {
                return Err(MobilityError::OutOfMap { who: CharacterRef::Entity(e.id), x: ex, y: ey }.into());
            }
        }

        debug!("transfer from {} to {} at ({x}, {y})", self.map.map_id(), map.map_id());
        self.map = map;
        self.store.entities.clear();
        for mut e in entities {
            let (ex, ey) = (e.character.x, e.character.y);
            e.character.locate(&self.map, ex, ey);
            self.store.push_entity(e);
        }
        self.store.player.destination = None;
        self.with_context(|engine, cx| engine.locate_player(cx, x, y));
        let ActorStore { player, vehicles, .. } = &mut self.store;
        for v in vehicles.iter_mut() {
            v.refresh(&self.map, &player.character);
        }
        Ok(())
    }

    // ── Persistence ───────────────────────────────────────────────────────

    pub fn record(&self) -> WorldRecord {
        WorldRecord::capture(self.now(), self.map.map_id(), &self.store)
    }

    /// Apply a record taken on this map; motion in flight is discarded.
    pub fn restore(&mut self, record: &WorldRecord) -> SimResult<()> {
        record.apply(&mut self.store, &self.map, self.config.max_altitude)?;
        self.clock.current_tick = record.tick;
        let ActorStore { player, vehicles, .. } = &mut self.store;
        if let Some(kind) = player.vehicle() {
            vehicles[kind.index()].sync_with(&player.character, &self.map);
        }
        debug!("restored world at {}", record.tick);
        Ok(())
    }
}
