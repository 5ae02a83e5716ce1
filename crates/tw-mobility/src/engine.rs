//! `MobilityEngine` — movement primitives and route command execution.
//!
//! Every operation takes an explicit [`MoveContext`]: the actor store it may
//! mutate, the map it reads, and the hooks it notifies.  The engine itself
//! only holds tunables and the path finder.

use log::debug;

use tw_behavior::WorldHooks;
use tw_character::CharacterImage;
use tw_core::{CharacterRef, Direction, EngineConfig};
use tw_map::MapQuery;
use tw_route::{MoveCommand, MoveRoute, RouteStep};

use crate::{ActorStore, BestFirstPathfinder, CollisionResolver, MobilityError, MobilityResult, Pathfinder};

/// Borrowed world state for one engine call.
pub struct MoveContext<'a, M: ?Sized, H: ?Sized> {
    pub store: &'a mut ActorStore,
    pub map: &'a M,
    pub hooks: &'a mut H,
}

impl<'a, M: MapQuery + ?Sized, H: WorldHooks + ?Sized> MoveContext<'a, M, H> {
    pub fn new(store: &'a mut ActorStore, map: &'a M, hooks: &'a mut H) -> Self {
        Self { store, map, hooks }
    }

    pub fn resolver(&self) -> CollisionResolver<'_, M> {
        CollisionResolver::new(self.map, self.store)
    }

    fn position(&self, who: CharacterRef) -> Option<(i32, i32)> {
        self.store.character(who).map(|c| (c.x, c.y))
    }

    /// `(who - target)` on both axes, wraparound-aware.
    fn delta_to(&self, who: CharacterRef, target: CharacterRef) -> Option<(i32, i32)> {
        let (x, y) = self.position(who)?;
        let (tx, ty) = self.position(target)?;
        Some((self.map.delta_x(x, tx), self.map.delta_y(y, ty)))
    }
}

/// Drives every character through the shared movement primitives.
///
/// # Type parameter
///
/// `P` must implement [`Pathfinder`] (e.g. [`BestFirstPathfinder`]).  Swap it
/// at compile time for a different search with no runtime overhead.
pub struct MobilityEngine<P: Pathfinder = BestFirstPathfinder> {
    pub pathfinder: P,
    pub max_altitude: u32,
    pub near_player_distance: i32,
    pub dash_enabled: bool,
}

impl MobilityEngine<BestFirstPathfinder> {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(BestFirstPathfinder::new(config.search_limit), config)
    }
}

impl<P: Pathfinder> MobilityEngine<P> {
    pub fn new(pathfinder: P, config: &EngineConfig) -> Self {
        Self {
            pathfinder,
            max_altitude: config.max_altitude,
            near_player_distance: config.near_player_distance,
            dash_enabled: config.dash_enabled,
        }
    }

    // ── Placement ─────────────────────────────────────────────────────────

    /// Teleport `who` onto `(x, y)`.  Out-of-map positions are an error.
    pub fn place<M: MapQuery + ?Sized>(
        &self,
        store: &mut ActorStore,
        map: &M,
        who: CharacterRef,
        x: i32,
        y: i32,
    ) -> MobilityResult<()> {
        if !map.is_valid(x, y) {
            return Err(MobilityError::OutOfMap { who, x, y });
        }
        store.try_character_mut(who)?.locate(map, x, y);
        Ok(())
    }

    // ── Steps ─────────────────────────────────────────────────────────────

    /// One tile along `d`.  On failure only the facing changes and the
    /// touch-front hook fires for the blocked tile.
    pub fn move_straight<M, H>(&self, cx: &mut MoveContext<'_, M, H>, who: CharacterRef, d: Direction) -> bool
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let Some((x, y)) = cx.position(who) else {
            return false;
        };
        let pass = cx.resolver().can_pass(who, x, y, d);
        if pass && who.is_player() {
            self.chase_followers(cx);
        }
        let map = cx.map;
        let Some(ch) = cx.store.character_mut(who) else {
            return false;
        };
        ch.movement_success = pass;
        if pass {
            ch.apply_straight_step(map, d);
        } else {
            ch.set_direction(d);
            if !matches!(who, CharacterRef::Follower(_)) {
                let tx = map.round_x_with_direction(x, d);
                let ty = map.round_y_with_direction(y, d);
                cx.hooks.on_touch_front(who, tx, ty);
            }
        }
        pass
    }

    /// One tile along both `horz` and `vert` if either L-shaped detour is
    /// clear.  Facing follows the diagonal rule either way.
    pub fn move_diagonally<M, H>(
        &self,
        cx: &mut MoveContext<'_, M, H>,
        who: CharacterRef,
        horz: Direction,
        vert: Direction,
    ) -> bool
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let Some((x, y)) = cx.position(who) else {
            return false;
        };
        let pass = cx.resolver().can_pass_diagonally(who, x, y, horz, vert);
        if pass && who.is_player() {
            self.chase_followers(cx);
        }
        let map = cx.map;
        let Some(ch) = cx.store.character_mut(who) else {
            return false;
        };
        ch.movement_success = pass;
        if pass {
            ch.apply_diagonal_step(map, horz, vert);
        }
        ch.face_after_diagonal(horz, vert);
        pass
    }

    /// Step along any of the 8 directions.
    pub fn move_in<M, H>(&self, cx: &mut MoveContext<'_, M, H>, who: CharacterRef, d: Direction) -> bool
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        match (d.horizontal(), d.vertical()) {
            (Some(h), Some(v)) => self.move_diagonally(cx, who, h, v),
            _ => self.move_straight(cx, who, d),
        }
    }

    /// Jump by `(dx, dy)`.  A jumping player takes the whole chain along.
    pub fn jump<M, H>(&self, cx: &mut MoveContext<'_, M, H>, who: CharacterRef, dx: i32, dy: i32)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let Some(ch) = cx.store.character_mut(who) else {
            return;
        };
        ch.jump(dx, dy);
        if !who.is_player() {
            return;
        }
        let ActorStore { player, followers, .. } = &mut *cx.store;
        if !player.character.is_jumping() {
            return;
        }
        for f in &mut followers.followers {
            let sx = cx.map.delta_x(player.character.x, f.character.x);
            let sy = cx.map.delta_y(player.character.y, f.character.y);
            f.character.jump(sx, sy);
        }
    }

    pub fn move_random<M, H>(&self, cx: &mut MoveContext<'_, M, H>, who: CharacterRef)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let Some(ch) = cx.store.character_mut(who) else {
            return;
        };
        let d = ch.rng.cardinal();
        let (x, y) = (ch.x, ch.y);
        if cx.resolver().can_pass(who, x, y, d) {
            self.move_straight(cx, who, d);
        }
    }

    /// Close in on `target` along the longer axis, falling back to the
    /// other axis when blocked.
    pub fn move_toward<M, H>(&self, cx: &mut MoveContext<'_, M, H>, who: CharacterRef, target: CharacterRef)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let Some((sx, sy)) = cx.delta_to(who, target) else {
            return;
        };
        let horz = if sx > 0 { Direction::Left } else { Direction::Right };
        let vert = if sy > 0 { Direction::Up } else { Direction::Down };
        self.move_by_axes(cx, who, sx, sy, horz, vert);
    }

    pub fn move_away<M, H>(&self, cx: &mut MoveContext<'_, M, H>, who: CharacterRef, target: CharacterRef)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let Some((sx, sy)) = cx.delta_to(who, target) else {
            return;
        };
        let horz = if sx > 0 { Direction::Right } else { Direction::Left };
        let vert = if sy > 0 { Direction::Down } else { Direction::Up };
        self.move_by_axes(cx, who, sx, sy, horz, vert);
    }

    fn move_by_axes<M, H>(
        &self,
        cx: &mut MoveContext<'_, M, H>,
        who: CharacterRef,
        sx: i32,
        sy: i32,
        horz: Direction,
        vert: Direction,
    ) where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        if sx.abs() > sy.abs() {
            if !self.move_straight(cx, who, horz) && sy != 0 {
                self.move_straight(cx, who, vert);
            }
        } else if sy != 0 && !self.move_straight(cx, who, vert) && sx != 0 {
            self.move_straight(cx, who, horz);
        }
    }

    pub fn move_forward<M, H>(&self, cx: &mut MoveContext<'_, M, H>, who: CharacterRef)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        if let Some(d) = cx.store.character(who).map(|c| c.direction) {
            self.move_straight(cx, who, d);
        }
    }

    /// Step away from the facing direction without turning round.
    pub fn move_backward<M, H>(&self, cx: &mut MoveContext<'_, M, H>, who: CharacterRef)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let Some(ch) = cx.store.character_mut(who) else {
            return;
        };
        let last_fix = ch.direction_fix;
        ch.direction_fix = true;
        let d = ch.direction.reverse();
        self.move_straight(cx, who, d);
        if let Some(ch) = cx.store.character_mut(who) {
            ch.direction_fix = last_fix;
        }
    }

    /// Step forward ignoring collision (boarding and alighting).
    pub fn force_move_forward<M, H>(&self, cx: &mut MoveContext<'_, M, H>, who: CharacterRef)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let Some(ch) = cx.store.character_mut(who) else {
            return;
        };
        let last_through = ch.through;
        ch.through = true;
        self.move_forward(cx, who);
        if let Some(ch) = cx.store.character_mut(who) {
            ch.through = last_through;
        }
    }

    pub fn turn_toward<M, H>(&self, cx: &mut MoveContext<'_, M, H>, who: CharacterRef, target: CharacterRef)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        if let Some((sx, sy)) = cx.delta_to(who, target) {
            if let Some(ch) = cx.store.character_mut(who) {
                ch.turn_toward_delta(sx, sy);
            }
        }
    }

    pub fn turn_away<M, H>(&self, cx: &mut MoveContext<'_, M, H>, who: CharacterRef, target: CharacterRef)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        if let Some((sx, sy)) = cx.delta_to(who, target) {
            if let Some(ch) = cx.store.character_mut(who) {
                ch.turn_away_delta(sx, sy);
            }
        }
    }

    /// Next step from `who` toward `(gx, gy)`, using `who`'s collision rules.
    pub fn find_direction_to<M, H>(
        &self,
        cx: &MoveContext<'_, M, H>,
        who: CharacterRef,
        gx: i32,
        gy: i32,
    ) -> Option<Direction>
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let start = cx.position(who)?;
        let resolver = cx.resolver();
        self.pathfinder
            .find_direction(cx.map, start, (gx, gy), |x, y, d| resolver.can_pass(who, x, y, d))
    }

    // ── Routes ────────────────────────────────────────────────────────────

    pub fn force_move_route(&self, store: &mut ActorStore, who: CharacterRef, route: MoveRoute) -> MobilityResult<()> {
        debug!("{who}: forcing route");
        store.try_character_mut(who)?.route.force_move_route(route);
        Ok(())
    }

    pub fn set_move_route(&self, store: &mut ActorStore, who: CharacterRef, route: MoveRoute) -> MobilityResult<()> {
        store.try_character_mut(who)?.route.set_move_route(route);
        Ok(())
    }

    /// Run at most one route step for a stopped character.
    pub fn update_routine_move<M, H>(&self, cx: &mut MoveContext<'_, M, H>, who: CharacterRef)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        let Some(ch) = cx.store.character_mut(who) else {
            return;
        };
        match ch.route.next_step() {
            RouteStep::Command(command) => {
                ch.movement_success = true;
                self.execute_command(cx, who, &command);
                if let Some(ch) = cx.store.character_mut(who) {
                    let succeeded = ch.movement_success;
                    ch.route.advance(succeeded);
                }
            }
            RouteStep::Looped => ch.movement_success = true,
            RouteStep::Restored => {
                debug!("{who}: forced route finished");
                ch.movement_success = false;
            }
            RouteStep::Idle | RouteStep::Waiting | RouteStep::Finished => {}
        }
    }

    /// Apply one route command to `who`.
    pub fn execute_command<M, H>(&self, cx: &mut MoveContext<'_, M, H>, who: CharacterRef, command: &MoveCommand)
    where
        M: MapQuery + ?Sized,
        H: WorldHooks + ?Sized,
    {
        match command {
            MoveCommand::Move(d) => {
                self.move_in(cx, who, *d);
            }
            MoveCommand::MoveRandom => self.move_random(cx, who),
            MoveCommand::MoveToward(target) => self.move_toward(cx, who, *target),
            MoveCommand::MoveAway(target) => self.move_away(cx, who, *target),
            MoveCommand::MoveForward => self.move_forward(cx, who),
            MoveCommand::MoveBackward => self.move_backward(cx, who),
            MoveCommand::Jump { dx, dy } => self.jump(cx, who, *dx, *dy),
            MoveCommand::TurnToward(target) => self.turn_toward(cx, who, *target),
            MoveCommand::TurnAway(target) => self.turn_away(cx, who, *target),
            MoveCommand::Invoke(call) => cx.hooks.on_external(who, call),
            other => {
                if let Some(ch) = cx.store.character_mut(who) {
                    match other {
                        MoveCommand::Wait(n) => ch.route.set_wait(*n),
                        MoveCommand::Turn(d) => ch.set_direction(*d),
                        MoveCommand::TurnRight90 => ch.turn_right_90(),
                        MoveCommand::TurnLeft90 => ch.turn_left_90(),
                        MoveCommand::Turn180 => ch.turn_180(),
                        MoveCommand::TurnRightOrLeft90 => ch.turn_right_or_left_90(),
                        MoveCommand::TurnRandom => ch.turn_random(),
                        MoveCommand::ChangeSpeed(s) => ch.move_speed = (*s).clamp(1, 6),
                        MoveCommand::ChangeFrequency(f) => ch.move_frequency = (*f).clamp(1, 5),
                        MoveCommand::WalkAnime(on) => ch.walk_anime = *on,
                        MoveCommand::StepAnime(on) => ch.step_anime = *on,
                        MoveCommand::DirectionFix(on) => ch.direction_fix = *on,
                        MoveCommand::Through(on) => ch.through = *on,
                        MoveCommand::Transparent(on) => ch.transparent = *on,
                        MoveCommand::ChangeImage { name, index } => {
                            ch.image = CharacterImage::new(name.clone(), *index);
                        }
                        MoveCommand::ChangeOpacity(o) => ch.opacity = *o,
                        MoveCommand::ChangeBlendMode(b) => ch.blend_mode = *b,
                        _ => {}
                    }
                }
            }
        }
    }
}
