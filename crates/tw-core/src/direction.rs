//! Eight-way facing and step directions.
//!
//! Codes follow the numeric-keypad layout used throughout the engine and the
//! save format:
//!
//! ```text
//!   7 8 9
//!   4 · 6
//!   1 2 3
//! ```
//!
//! so the reverse of any direction is `10 - code`.  The y axis grows
//! downwards: `Down` is `+y`.

use std::fmt;
use std::str::FromStr;

use crate::TwError;

/// One of the 8 compass directions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    DownLeft = 1,
    #[default]
    Down = 2,
    DownRight = 3,
    Left = 4,
    Right = 6,
    UpLeft = 7,
    Up = 8,
    UpRight = 9,
}

impl Direction {
    /// Cardinal directions in path-search expansion order (2, 4, 6, 8).
    pub const CARDINALS: [Direction; 4] =
        [Direction::Down, Direction::Left, Direction::Right, Direction::Up];

    /// Numpad code (1–9, never 5).
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Direction> {
        match code {
            1 => Some(Direction::DownLeft),
            2 => Some(Direction::Down),
            3 => Some(Direction::DownRight),
            4 => Some(Direction::Left),
            6 => Some(Direction::Right),
            7 => Some(Direction::UpLeft),
            8 => Some(Direction::Up),
            9 => Some(Direction::UpRight),
            _ => None,
        }
    }

    /// The opposite direction (`10 - code`).
    pub fn reverse(self) -> Direction {
        match self {
            Direction::DownLeft => Direction::UpRight,
            Direction::Down => Direction::Up,
            Direction::DownRight => Direction::UpLeft,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::UpLeft => Direction::DownRight,
            Direction::Up => Direction::Down,
            Direction::UpRight => Direction::DownLeft,
        }
    }

    /// Horizontal step (-1, 0 or 1).
    #[inline]
    pub fn dx(self) -> i32 {
        match self {
            Direction::DownLeft | Direction::Left | Direction::UpLeft => -1,
            Direction::DownRight | Direction::Right | Direction::UpRight => 1,
            Direction::Down | Direction::Up => 0,
        }
    }

    /// Vertical step (-1, 0 or 1); `+1` is down.
    #[inline]
    pub fn dy(self) -> i32 {
        match self {
            Direction::DownLeft | Direction::Down | Direction::DownRight => 1,
            Direction::UpLeft | Direction::Up | Direction::UpRight => -1,
            Direction::Left | Direction::Right => 0,
        }
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        self.dx() != 0 && self.dy() != 0
    }

    /// The horizontal component (`Left`/`Right`), if any.
    pub fn horizontal(self) -> Option<Direction> {
        match self.dx() {
            -1 => Some(Direction::Left),
            1 => Some(Direction::Right),
            _ => None,
        }
    }

    /// The vertical component (`Up`/`Down`), if any.
    pub fn vertical(self) -> Option<Direction> {
        match self.dy() {
            -1 => Some(Direction::Up),
            1 => Some(Direction::Down),
            _ => None,
        }
    }

    /// Combine a horizontal and a vertical direction into a diagonal.
    ///
    /// Returns `None` unless `horz` is `Left`/`Right` and `vert` is `Up`/`Down`.
    pub fn diagonal(horz: Direction, vert: Direction) -> Option<Direction> {
        match (horz, vert) {
            (Direction::Left, Direction::Down) => Some(Direction::DownLeft),
            (Direction::Right, Direction::Down) => Some(Direction::DownRight),
            (Direction::Left, Direction::Up) => Some(Direction::UpLeft),
            (Direction::Right, Direction::Up) => Some(Direction::UpRight),
            _ => None,
        }
    }

    /// Quarter turn to the character's right.  Diagonals are unchanged.
    pub fn turn_right_90(self) -> Direction {
        match self {
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
            Direction::Right => Direction::Down,
            Direction::Up => Direction::Right,
            other => other,
        }
    }

    /// Quarter turn to the character's left.  Diagonals are unchanged.
    pub fn turn_left_90(self) -> Direction {
        match self {
            Direction::Down => Direction::Right,
            Direction::Left => Direction::Down,
            Direction::Right => Direction::Up,
            Direction::Up => Direction::Left,
            other => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::DownLeft => "down_left",
            Direction::Down => "down",
            Direction::DownRight => "down_right",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::UpLeft => "up_left",
            Direction::Up => "up",
            Direction::UpRight => "up_right",
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = TwError;

    fn try_from(code: u8) -> Result<Direction, TwError> {
        Direction::from_code(code).ok_or(TwError::InvalidDirection(code))
    }
}

impl FromStr for Direction {
    type Err = TwError;

    /// Accepts either a numpad code (`"6"`) or a name (`"right"`).
    fn from_str(s: &str) -> Result<Direction, TwError> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Direction::try_from(code);
        }
        match s.to_ascii_lowercase().as_str() {
            "down_left" => Ok(Direction::DownLeft),
            "down" => Ok(Direction::Down),
            "down_right" => Ok(Direction::DownRight),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up_left" => Ok(Direction::UpLeft),
            "up" => Ok(Direction::Up),
            "up_right" => Ok(Direction::UpRight),
            other => Err(TwError::Parse(format!("unknown direction '{other}'"))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
