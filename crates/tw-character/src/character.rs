//! `Character` — grid position, render position, facing, and animation.
//!
//! # Per-tick update
//!
//! The owning controller drives a character in this order every tick:
//!
//! ```text
//! if is_stopping()  → update_stop(), then maybe start a new step/jump
//! update_motion()   → jump blend or move toward grid, then animation
//! ```
//!
//! # Render convergence
//!
//! While moving, `real_x`/`real_y` advance by `distance_per_frame()` per tick
//! and are clamped at the grid coordinate, so a one-tile step takes
//! `ceil(1 / distance_per_frame)` ticks.  While jumping, each tick blends
//!
//! ```text
//! real = (real * jump_count + grid) / (jump_count + 1)
//! ```
//!
//! after decrementing `jump_count`, so the last tick lands exactly on the grid.

use tw_core::{CharacterRng, Direction};
use tw_map::MapQuery;
use tw_route::RouteInterpreter;

use crate::{CharacterImage, Priority};

/// Pixels of a bush tile that hide a character standing in it.
pub const BUSH_DEPTH: u8 = 12;

/// Number of cells in a walk cycle.
const MAX_PATTERN: u8 = 4;

/// The rest cell of the walk cycle.
const REST_PATTERN: u8 = 1;

/// A positioned entity.
///
/// All fields are `pub` so controllers and save code can read and restore
/// them directly.  Go through the methods when a rule applies: facing
/// changes must respect `direction_fix`, and steps must keep the render
/// position consistent.
#[derive(Clone, Debug)]
pub struct Character {
    // ── Position ──────────────────────────────────────────────────────────
    pub x: i32,
    pub y: i32,
    pub real_x: f64,
    pub real_y: f64,
    pub direction: Direction,

    // ── Motion ────────────────────────────────────────────────────────────
    /// 1..=6; each point doubles the tiles covered per tick.
    pub move_speed: u8,
    /// 1..=5; higher means shorter pauses between autonomous steps.
    pub move_frequency: u8,
    /// Ticks spent standing still since the last step or facing change.
    pub stop_count: u32,
    pub jump_count: u32,
    pub jump_peak: u32,
    /// Adds one to the effective speed.  Set by the player controller.
    pub dashing: bool,
    /// Outcome of the last attempted step or jump.
    pub movement_success: bool,

    // ── Flags ─────────────────────────────────────────────────────────────
    pub priority: Priority,
    pub through: bool,
    pub transparent: bool,
    pub walk_anime: bool,
    pub step_anime: bool,
    pub direction_fix: bool,

    // ── Appearance ────────────────────────────────────────────────────────
    pub pattern: u8,
    pub anime_count: f64,
    pub bush_depth: u8,
    pub image: CharacterImage,
    pub opacity: u8,
    pub blend_mode: u8,

    // ── Scripting ─────────────────────────────────────────────────────────
    pub route: RouteInterpreter,
    pub rng: CharacterRng,
}

impl Character {
    /// A character at `(0, 0)` facing down with default tunables.
    pub fn new(rng: CharacterRng) -> Self {
        Self {
            x: 0,
            y: 0,
            real_x: 0.0,
            real_y: 0.0,
            direction: Direction::Down,
            move_speed: 4,
            move_frequency: 3,
            stop_count: 0,
            jump_count: 0,
            jump_peak: 0,
            dashing: false,
            movement_success: true,
            priority: Priority::Normal,
            through: false,
            transparent: false,
            walk_anime: true,
            step_anime: false,
            direction_fix: false,
            pattern: REST_PATTERN,
            anime_count: 0.0,
            bush_depth: 0,
            image: CharacterImage::default(),
            opacity: 255,
            blend_mode: 0,
            route: RouteInterpreter::new(),
            rng,
        }
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    #[inline]
    pub fn pos(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }

    /// Occupies `(x, y)` and takes part in collision.
    #[inline]
    pub fn pos_nt(&self, x: i32, y: i32) -> bool {
        self.pos(x, y) && !self.through
    }

    #[inline]
    pub fn is_normal_priority(&self) -> bool {
        self.priority == Priority::Normal
    }

    // ── Motion state ──────────────────────────────────────────────────────

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.real_x != self.x as f64 || self.real_y != self.y as f64
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.jump_count > 0
    }

    #[inline]
    pub fn is_stopping(&self) -> bool {
        !self.is_moving() && !self.is_jumping()
    }

    pub fn check_stop(&self, threshold: u32) -> bool {
        self.stop_count > threshold
    }

    pub fn reset_stop_count(&mut self) {
        self.stop_count = 0;
    }

    pub fn real_move_speed(&self) -> u8 {
        self.move_speed + u8::from(self.dashing)
    }

    /// Tiles covered per tick: `2^real_speed / 256`.
    pub fn distance_per_frame(&self) -> f64 {
        2f64.powi(self.real_move_speed() as i32) / 256.0
    }

    /// Height of the jump arc in pixels at the current tick.
    pub fn jump_height(&self) -> f64 {
        let peak = self.jump_peak as f64;
        let off = self.jump_count as f64 - peak;
        (peak * peak - off * off) / 2.0
    }

    /// The cell to draw: cells 0..=2, with 3 shown as the rest cell.
    pub fn display_pattern(&self) -> u8 {
        if self.pattern < 3 { self.pattern } else { REST_PATTERN }
    }

    // ── Facing ────────────────────────────────────────────────────────────

    /// Face `d` unless direction-locked.  Always resets the stop counter.
    pub fn set_direction(&mut self, d: Direction) {
        if !self.direction_fix {
            self.direction = d;
        }
        self.reset_stop_count();
    }

    pub fn turn_right_90(&mut self) {
        self.set_direction(self.direction.turn_right_90());
    }

    pub fn turn_left_90(&mut self) {
        self.set_direction(self.direction.turn_left_90());
    }

    pub fn turn_180(&mut self) {
        self.set_direction(self.direction.reverse());
    }

    pub fn turn_right_or_left_90(&mut self) {
        if self.rng.gen_bool(0.5) {
            self.turn_right_90();
        } else {
            self.turn_left_90();
        }
    }

    pub fn turn_random(&mut self) {
        let d = self.rng.cardinal();
        self.set_direction(d);
    }

    /// Face along the larger of the two offsets `(sx, sy) = self - target`.
    pub fn turn_toward_delta(&mut self, sx: i32, sy: i32) {
        if sx.abs() > sy.abs() {
            self.set_direction(if sx > 0 { Direction::Left } else { Direction::Right });
        } else if sy != 0 {
            self.set_direction(if sy > 0 { Direction::Up } else { Direction::Down });
        }
    }

    pub fn turn_away_delta(&mut self, sx: i32, sy: i32) {
        if sx.abs() > sy.abs() {
            self.set_direction(if sx > 0 { Direction::Right } else { Direction::Left });
        } else if sy != 0 {
            self.set_direction(if sy > 0 { Direction::Down } else { Direction::Up });
        }
    }

    /// Diagonal facing rule: a facing opposite to a component snaps to it,
    /// horizontal first.
    pub fn face_after_diagonal(&mut self, horz: Direction, vert: Direction) {
        if self.direction == horz.reverse() {
            self.set_direction(horz);
        }
        if self.direction == vert.reverse() {
            self.set_direction(vert);
        }
    }

    // ── Placement ─────────────────────────────────────────────────────────

    /// Put the character on `(x, y)` with no motion in flight.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.real_x = x as f64;
        self.real_y = y as f64;
    }

    /// Teleport: position, rest pose, bush depth.
    pub fn locate<M: MapQuery + ?Sized>(&mut self, map: &M, x: i32, y: i32) {
        self.set_position(x, y);
        self.straighten();
        self.refresh_bush_depth(map);
    }

    /// Take another character's grid and render position and facing.
    pub fn copy_position(&mut self, other: &Character) {
        self.x = other.x;
        self.y = other.y;
        self.real_x = other.real_x;
        self.real_y = other.real_y;
        self.direction = other.direction;
    }

    /// Back to the rest cell.
    pub fn straighten(&mut self) {
        if self.walk_anime || self.step_anime {
            self.pattern = REST_PATTERN;
        }
        self.anime_count = 0.0;
    }

    /// Drop any jump in flight and snap the render position to the grid.
    pub fn cancel_motion(&mut self) {
        self.jump_count = 0;
        self.jump_peak = 0;
        self.real_x = self.x as f64;
        self.real_y = self.y as f64;
    }

    // ── Step primitives (collision already checked) ───────────────────────

    /// Advance one tile along `d`.
    pub fn apply_straight_step<M: MapQuery + ?Sized>(&mut self, map: &M, d: Direction) {
        self.set_direction(d);
        self.x = map.round_x_with_direction(self.x, d);
        self.y = map.round_y_with_direction(self.y, d);
        self.real_x = map.x_with_direction(self.x, d.reverse()) as f64;
        self.real_y = map.y_with_direction(self.y, d.reverse()) as f64;
        self.increase_steps(map);
    }

    /// Advance one tile along both `horz` and `vert`.  Facing is handled
    /// separately by [`Character::face_after_diagonal`].
    pub fn apply_diagonal_step<M: MapQuery + ?Sized>(
        &mut self,
        map: &M,
        horz: Direction,
        vert: Direction,
    ) {
        self.x = map.round_x_with_direction(self.x, horz);
        self.y = map.round_y_with_direction(self.y, vert);
        self.real_x = map.x_with_direction(self.x, horz.reverse()) as f64;
        self.real_y = map.y_with_direction(self.y, vert.reverse()) as f64;
        self.increase_steps(map);
    }

    /// Start a jump by `(dx, dy)`.  The grid position moves immediately and
    /// is wrapped when the jump lands.
    pub fn jump(&mut self, dx: i32, dy: i32) {
        if dx.abs() >= dy.abs() && dx != 0 {
            self.set_direction(if dx < 0 { Direction::Left } else { Direction::Right });
        } else if dy != 0 {
            self.set_direction(if dy < 0 { Direction::Up } else { Direction::Down });
        }
        self.x += dx;
        self.y += dy;
        let distance = f64::from(dx).hypot(f64::from(dy)).round() as i64;
        self.jump_peak = (10 + distance - i64::from(self.move_speed)).clamp(1, i64::from(u32::MAX / 2)) as u32;
        self.jump_count = self.jump_peak * 2;
        self.reset_stop_count();
        self.straighten();
    }

    /// Bookkeeping after every completed step.
    pub fn increase_steps<M: MapQuery + ?Sized>(&mut self, map: &M) {
        if map.is_ladder(self.x, self.y) {
            self.set_direction(Direction::Up);
        }
        self.reset_stop_count();
        self.refresh_bush_depth(map);
    }

    pub fn refresh_bush_depth<M: MapQuery + ?Sized>(&mut self, map: &M) {
        if self.is_normal_priority()
            && !self.image.is_object()
            && map.is_bush(self.x, self.y)
            && !self.is_jumping()
        {
            if !self.is_moving() {
                self.bush_depth = BUSH_DEPTH;
            }
        } else {
            self.bush_depth = 0;
        }
    }

    // ── Per-tick update ───────────────────────────────────────────────────

    pub fn update_stop(&mut self) {
        self.stop_count += 1;
    }

    /// Jump or move toward the grid, then animate.
    pub fn update_motion<M: MapQuery + ?Sized>(&mut self, map: &M) {
        if self.is_jumping() {
            self.update_jump(map);
        } else if self.is_moving() {
            self.update_move(map);
        }
        self.update_animation();
    }

    fn update_jump<M: MapQuery + ?Sized>(&mut self, map: &M) {
        self.jump_count -= 1;
        let count = self.jump_count as f64;
        self.real_x = (self.real_x * count + self.x as f64) / (count + 1.0);
        self.real_y = (self.real_y * count + self.y as f64) / (count + 1.0);
        self.refresh_bush_depth(map);
        if self.jump_count == 0 {
            self.x = map.round_x(self.x);
            self.y = map.round_y(self.y);
            self.real_x = self.x as f64;
            self.real_y = self.y as f64;
        }
    }

    fn update_move<M: MapQuery + ?Sized>(&mut self, map: &M) {
        let step = self.distance_per_frame();
        let (gx, gy) = (self.x as f64, self.y as f64);
        if gx < self.real_x {
            self.real_x = (self.real_x - step).max(gx);
        }
        if gx > self.real_x {
            self.real_x = (self.real_x + step).min(gx);
        }
        if gy < self.real_y {
            self.real_y = (self.real_y - step).max(gy);
        }
        if gy > self.real_y {
            self.real_y = (self.real_y + step).min(gy);
        }
        if !self.is_moving() {
            self.refresh_bush_depth(map);
        }
    }

    fn update_animation(&mut self) {
        if self.is_moving() && self.walk_anime {
            self.anime_count += 1.5;
        } else if self.step_anime || self.display_pattern() != REST_PATTERN {
            self.anime_count += 1.0;
        }
        let wait = (9 - self.real_move_speed().min(9) as i32) * 3;
        if self.anime_count >= wait as f64 {
            self.update_pattern();
            self.anime_count = 0.0;
        }
    }

    fn update_pattern(&mut self) {
        if !self.step_anime && self.stop_count > 0 {
            self.pattern = REST_PATTERN;
        } else {
            self.pattern = (self.pattern + 1) % MAX_PATTERN;
        }
    }
}
