//! The map query trait consumed by the movement engine.
//!
//! # Pluggability
//!
//! `tw-mobility` only ever talks to a map through [`MapQuery`], so an
//! application can back it with its own tile storage (an editor document, a
//! streamed chunk cache) without touching the engine.  [`crate::TileMap`] is
//! the reference implementation.
//!
//! # Coordinates
//!
//! Tiles are addressed by `(x, y)` with `y` growing downward.  Maps may loop
//! horizontally and/or vertically; every coordinate helper here applies the
//! wraparound so callers never do it by hand.

use tw_core::{Direction, MapId};

/// Read-only questions the engine asks about the current map.
///
/// Only the passability primitives and the geometry are required; the tag
/// queries default to "plain ground".
pub trait MapQuery {
    fn map_id(&self) -> MapId;
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    /// Can a walker leave or enter `(x, y)` through its `d` edge?
    ///
    /// The engine checks the origin with `d` and the destination with
    /// `d.reverse()`.  Coordinates are already wrapped and validated.
    fn is_passable(&self, x: i32, y: i32, d: Direction) -> bool;

    /// Water a boat can sail on.
    fn is_boat_passable(&self, x: i32, y: i32) -> bool;

    /// Water a ship can sail on.
    fn is_ship_passable(&self, x: i32, y: i32) -> bool;

    /// Ground the airship may land on.
    fn is_airship_land_ok(&self, x: i32, y: i32) -> bool;

    fn is_loop_horizontal(&self) -> bool {
        false
    }

    fn is_loop_vertical(&self) -> bool {
        false
    }

    fn is_ladder(&self, _x: i32, _y: i32) -> bool {
        false
    }

    fn is_bush(&self, _x: i32, _y: i32) -> bool {
        false
    }

    fn is_counter(&self, _x: i32, _y: i32) -> bool {
        false
    }

    fn terrain_tag(&self, _x: i32, _y: i32) -> u8 {
        0
    }

    fn region_id(&self, _x: i32, _y: i32) -> u8 {
        0
    }

    // ── Provided geometry ─────────────────────────────────────────────────

    /// `true` if `(x, y)` lies inside the map rectangle.
    fn is_valid(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width() && y >= 0 && y < self.height()
    }

    fn round_x(&self, x: i32) -> i32 {
        let w = self.width();
        if self.is_loop_horizontal() && w > 0 { x.rem_euclid(w) } else { x }
    }

    fn round_y(&self, y: i32) -> i32 {
        let h = self.height();
        if self.is_loop_vertical() && h > 0 { y.rem_euclid(h) } else { y }
    }

    /// `x` shifted one tile along `d`, without wrapping.
    fn x_with_direction(&self, x: i32, d: Direction) -> i32 {
        x + d.dx()
    }

    /// `y` shifted one tile along `d`, without wrapping.
    fn y_with_direction(&self, y: i32, d: Direction) -> i32 {
        y + d.dy()
    }

    fn round_x_with_direction(&self, x: i32, d: Direction) -> i32 {
        self.round_x(x + d.dx())
    }

    fn round_y_with_direction(&self, y: i32, d: Direction) -> i32 {
        self.round_y(y + d.dy())
    }

    /// Signed horizontal offset `x1 - x2`, taking the short way round a
    /// looping map.
    fn delta_x(&self, x1: i32, x2: i32) -> i32 {
        let mut result = x1 - x2;
        let w = self.width();
        if self.is_loop_horizontal() && 2 * result.abs() > w {
            if result < 0 { result += w } else { result -= w }
        }
        result
    }

    /// Signed vertical offset `y1 - y2`; see [`MapQuery::delta_x`].
    fn delta_y(&self, y1: i32, y2: i32) -> i32 {
        let mut result = y1 - y2;
        let h = self.height();
        if self.is_loop_vertical() && 2 * result.abs() > h {
            if result < 0 { result += h } else { result -= h }
        }
        result
    }

    /// Wraparound-aware Manhattan distance.
    fn distance(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> i32 {
        self.delta_x(x1, x2).abs() + self.delta_y(y1, y2).abs()
    }
}
