//! In-memory tile map and its builder.
//!
//! # Data layout
//!
//! Per-tile data is stored in flat row-major vectors indexed by
//! `y * width + x`:
//!
//! ```text
//! flags[i]         TileFlags   passage bits + terrain classes
//! terrain_tags[i]  u8          application-defined tag (0 = none)
//! regions[i]       u8          region id (0 = none)
//! ```
//!
//! A [`TileFlags`] passage bit *blocks* the matching edge, so the empty
//! flag set is open ground that no vessel can sail on.

use bitflags::bitflags;

use tw_core::{Direction, MapId};

use crate::{MapError, MapQuery, MapResult};

// ── TileFlags ─────────────────────────────────────────────────────────────────

bitflags! {
    /// Per-tile passage and terrain bits.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TileFlags: u16 {
        const BLOCK_DOWN  = 0x0001;
        const BLOCK_LEFT  = 0x0002;
        const BLOCK_RIGHT = 0x0004;
        const BLOCK_UP    = 0x0008;
        /// Impassable from every side.
        const WALL        = 0x000f;
        const LADDER      = 0x0020;
        const BUSH        = 0x0040;
        const COUNTER     = 0x0080;
        const NO_BOAT     = 0x0200;
        const NO_SHIP     = 0x0400;
        const NO_LANDING  = 0x0800;
    }
}

impl TileFlags {
    /// Plain walkable ground.
    pub const GROUND: TileFlags = TileFlags::NO_BOAT.union(TileFlags::NO_SHIP);

    /// The passage bit guarding the `d` edge of a tile.  Diagonals map to
    /// both of their components.
    pub fn block_bit(d: Direction) -> TileFlags {
        match d {
            Direction::Down => TileFlags::BLOCK_DOWN,
            Direction::Left => TileFlags::BLOCK_LEFT,
            Direction::Right => TileFlags::BLOCK_RIGHT,
            Direction::Up => TileFlags::BLOCK_UP,
            Direction::DownLeft => TileFlags::BLOCK_DOWN | TileFlags::BLOCK_LEFT,
            Direction::DownRight => TileFlags::BLOCK_DOWN | TileFlags::BLOCK_RIGHT,
            Direction::UpLeft => TileFlags::BLOCK_UP | TileFlags::BLOCK_LEFT,
            Direction::UpRight => TileFlags::BLOCK_UP | TileFlags::BLOCK_RIGHT,
        }
    }

    /// Parse one lowercase flag name as used by the CSV loader.
    pub fn from_flag_name(name: &str) -> Option<TileFlags> {
        let flag = match name {
            "down" => TileFlags::BLOCK_DOWN,
            "left" => TileFlags::BLOCK_LEFT,
            "right" => TileFlags::BLOCK_RIGHT,
            "up" => TileFlags::BLOCK_UP,
            "wall" => TileFlags::WALL,
            "ladder" => TileFlags::LADDER,
            "bush" => TileFlags::BUSH,
            "counter" => TileFlags::COUNTER,
            "no_boat" => TileFlags::NO_BOAT,
            "no_ship" => TileFlags::NO_SHIP,
            "no_landing" => TileFlags::NO_LANDING,
            "ground" => TileFlags::GROUND,
            _ => return None,
        };
        Some(flag)
    }
}

// ── TileMap ───────────────────────────────────────────────────────────────────

/// A rectangular tile map, optionally looping on either axis.
///
/// Build with [`TileMapBuilder`] or [`TileMap::from_ascii`].
#[derive(Clone, Debug)]
pub struct TileMap {
    map_id: MapId,
    width: i32,
    height: i32,
    loop_horizontal: bool,
    loop_vertical: bool,
    flags: Vec<TileFlags>,
    terrain_tags: Vec<u8>,
    regions: Vec<u8>,
}

impl TileMap {
    /// An all-ground map with no obstacles.
    pub fn open(map_id: MapId, width: i32, height: i32) -> MapResult<TileMap> {
        TileMapBuilder::new(map_id, width, height).build()
    }

    /// Parse a map from rows of glyphs.
    ///
    /// | Glyph | Tile                                         |
    /// |-------|----------------------------------------------|
    /// | `.`   | ground                                       |
    /// | `#`   | wall                                         |
    /// | `~`   | shallow water (boat and ship)                |
    /// | `w`   | deep water (ship only)                       |
    /// | `"`   | bush                                         |
    /// | `H`   | ladder                                       |
    /// | `=`   | counter (impassable)                         |
    /// | `_`   | ground the airship cannot land on            |
    ///
    /// ```
    /// use tw_core::MapId;
    /// use tw_map::{MapQuery, TileMap};
    ///
    /// let map = TileMap::from_ascii(MapId(1), &["..#", "~~."]).unwrap();
    /// assert_eq!((map.width(), map.height()), (3, 2));
    /// assert!(map.is_boat_passable(0, 1));
    /// ```
    pub fn from_ascii<S: AsRef<str>>(map_id: MapId, rows: &[S]) -> MapResult<TileMap> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        let mut builder = TileMapBuilder::new(map_id, width as i32, height as i32);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let got = row.chars().count();
            if got != width {
                return Err(MapError::RaggedRows { row: y, expected: width, got });
            }
            for (x, glyph) in row.chars().enumerate() {
                builder.set_flags(x as i32, y as i32, glyph_flags(glyph)?)?;
            }
        }
        builder.build()
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.is_valid(x, y).then(|| (y * self.width + x) as usize)
    }

    /// Flags at `(x, y)`; a wall outside the map.
    pub fn flags(&self, x: i32, y: i32) -> TileFlags {
        self.index(x, y).map(|i| self.flags[i]).unwrap_or(TileFlags::all())
    }

    fn has(&self, x: i32, y: i32, flag: TileFlags) -> bool {
        self.index(x, y).is_some_and(|i| self.flags[i].contains(flag))
    }
}

fn glyph_flags(glyph: char) -> MapResult<TileFlags> {
    let flags = match glyph {
        '.' => TileFlags::GROUND,
        '#' => TileFlags::GROUND | TileFlags::WALL,
        '~' => TileFlags::WALL | TileFlags::NO_LANDING,
        'w' => TileFlags::WALL | TileFlags::NO_BOAT | TileFlags::NO_LANDING,
        '"' => TileFlags::GROUND | TileFlags::BUSH,
        'H' => TileFlags::GROUND | TileFlags::LADDER | TileFlags::NO_LANDING,
        '=' => TileFlags::GROUND | TileFlags::COUNTER | TileFlags::WALL,
        '_' => TileFlags::GROUND | TileFlags::NO_LANDING,
        other => return Err(MapError::UnknownGlyph(other)),
    };
    Ok(flags)
}

impl MapQuery for TileMap {
    fn map_id(&self) -> MapId {
        self.map_id
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn is_passable(&self, x: i32, y: i32, d: Direction) -> bool {
        match self.index(x, y) {
            Some(i) => !self.flags[i].intersects(TileFlags::block_bit(d)),
            None => false,
        }
    }

    fn is_boat_passable(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| !self.flags[i].contains(TileFlags::NO_BOAT))
    }

    fn is_ship_passable(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| !self.flags[i].contains(TileFlags::NO_SHIP))
    }

    fn is_airship_land_ok(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| {
            let f = self.flags[i];
            !f.contains(TileFlags::NO_LANDING) && !f.intersects(TileFlags::WALL)
        })
    }

    fn is_loop_horizontal(&self) -> bool {
        self.loop_horizontal
    }

    fn is_loop_vertical(&self) -> bool {
        self.loop_vertical
    }

    fn is_ladder(&self, x: i32, y: i32) -> bool {
        self.has(x, y, TileFlags::LADDER)
    }

    fn is_bush(&self, x: i32, y: i32) -> bool {
        self.has(x, y, TileFlags::BUSH)
    }

    fn is_counter(&self, x: i32, y: i32) -> bool {
        self.has(x, y, TileFlags::COUNTER)
    }

    fn terrain_tag(&self, x: i32, y: i32) -> u8 {
        self.index(x, y).map(|i| self.terrain_tags[i]).unwrap_or(0)
    }

    fn region_id(&self, x: i32, y: i32) -> u8 {
        self.index(x, y).map(|i| self.regions[i]).unwrap_or(0)
    }
}

// ── TileMapBuilder ────────────────────────────────────────────────────────────

/// Incrementally describe a [`TileMap`].  Every tile starts as ground.
///
/// ```
/// use tw_core::{Direction, MapId};
/// use tw_map::{MapQuery, TileFlags, TileMapBuilder};
///
/// let mut b = TileMapBuilder::new(MapId(0), 4, 4).with_loop(true, false);
/// b.fill_rect(1, 1, 2, 2, TileFlags::GROUND | TileFlags::WALL).unwrap();
/// let map = b.build().unwrap();
/// assert!(!map.is_passable(1, 1, Direction::Down));
/// assert_eq!(map.round_x(-1), 3);
/// ```
pub struct TileMapBuilder {
    map_id: MapId,
    width: i32,
    height: i32,
    loop_horizontal: bool,
    loop_vertical: bool,
    flags: Vec<TileFlags>,
    terrain_tags: Vec<u8>,
    regions: Vec<u8>,
}

impl TileMapBuilder {
    pub fn new(map_id: MapId, width: i32, height: i32) -> Self {
        let n = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            map_id,
            width,
            height,
            loop_horizontal: false,
            loop_vertical: false,
            flags: vec![TileFlags::GROUND; n],
            terrain_tags: vec![0; n],
            regions: vec![0; n],
        }
    }

    pub fn with_loop(mut self, horizontal: bool, vertical: bool) -> Self {
        self.loop_horizontal = horizontal;
        self.loop_vertical = vertical;
        self
    }

    fn index(&self, x: i32, y: i32) -> MapResult<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return Err(MapError::OutOfBounds { x, y });
        }
        Ok((y * self.width + x) as usize)
    }

    /// Replace every flag of a tile.
    pub fn set_flags(&mut self, x: i32, y: i32, flags: TileFlags) -> MapResult<()> {
        let i = self.index(x, y)?;
        self.flags[i] = flags;
        Ok(())
    }

    /// Add flags to a tile, keeping the existing ones.
    pub fn insert_flags(&mut self, x: i32, y: i32, flags: TileFlags) -> MapResult<()> {
        let i = self.index(x, y)?;
        self.flags[i].insert(flags);
        Ok(())
    }

    /// Make a tile a wall.
    pub fn block(&mut self, x: i32, y: i32) -> MapResult<()> {
        self.insert_flags(x, y, TileFlags::WALL)
    }

    /// Overwrite the flags of a `w`×`h` rectangle at `(x, y)`.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, flags: TileFlags) -> MapResult<()> {
        for ty in y..y + h {
            for tx in x..x + w {
                self.set_flags(tx, ty, flags)?;
            }
        }
        Ok(())
    }

    pub fn set_terrain_tag(&mut self, x: i32, y: i32, tag: u8) -> MapResult<()> {
        let i = self.index(x, y)?;
        self.terrain_tags[i] = tag;
        Ok(())
    }

    pub fn set_region(&mut self, x: i32, y: i32, region: u8) -> MapResult<()> {
        let i = self.index(x, y)?;
        self.regions[i] = region;
        Ok(())
    }

    pub fn build(self) -> MapResult<TileMap> {
        if self.width <= 0 || self.height <= 0 {
            return Err(MapError::EmptyMap { width: self.width, height: self.height });
        }
        Ok(TileMap {
            map_id: self.map_id,
            width: self.width,
            height: self.height,
            loop_horizontal: self.loop_horizontal,
            loop_vertical: self.loop_vertical,
            flags: self.flags,
            terrain_tags: self.terrain_tags,
            regions: self.regions,
        })
    }
}
