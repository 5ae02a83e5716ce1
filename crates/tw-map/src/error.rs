//! Map-subsystem error type.

use thiserror::Error;

/// Errors produced while building or loading a map.  Queries never error:
/// an out-of-range coordinate is simply impassable.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map dimensions must be positive, got {width}x{height}")]
    EmptyMap { width: i32, height: i32 },

    #[error("tile ({x}, {y}) is outside the map")]
    OutOfBounds { x: i32, y: i32 },

    #[error("row {row} has {got} tiles, expected {expected}")]
    RaggedRows { row: usize, expected: usize, got: usize },

    #[error("unknown tile glyph {0:?}")]
    UnknownGlyph(char),

    #[error("tile parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MapResult<T> = Result<T, MapError>;
