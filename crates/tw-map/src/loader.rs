//! CSV tile loader.
//!
//! # CSV format
//!
//! One row per tile that differs from plain ground.  Tiles not listed keep
//! whatever the builder already holds.
//!
//! ```csv
//! x,y,flags,terrain_tag,region_id
//! 3,0,wall,0,0
//! 4,0,no_landing|bush,2,0
//! 5,5,no_boat,0,7
//! ```
//!
//! **`flags`** is a `|`-separated list of names, replacing the tile's
//! flags wholesale:
//!
//! | Name         | Flag                         |
//! |--------------|------------------------------|
//! | `down` `left` `right` `up` | one blocked edge |
//! | `wall`       | all four edges blocked       |
//! | `ladder` `bush` `counter` | terrain class |
//! | `no_boat` `no_ship` `no_landing` | vehicle restrictions |
//! | `ground`     | `no_boat|no_ship`            |
//!
//! An empty `flags` cell means `ground`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{MapError, MapResult, TileFlags, TileMapBuilder};

#[derive(Deserialize)]
struct TileRecord {
    x:           i32,
    y:           i32,
    flags:       String,
    #[serde(default)]
    terrain_tag: u8,
    #[serde(default)]
    region_id:   u8,
}

/// Apply a tile CSV file to `builder`.  Returns the number of rows applied.
pub fn load_tiles_csv(path: &Path, builder: &mut TileMapBuilder) -> MapResult<usize> {
    let file = std::fs::File::open(path).map_err(MapError::Io)?;
    load_tiles_reader(file, builder)
}

/// Like [`load_tiles_csv`] but accepts any `Read` source.
pub fn load_tiles_reader<R: Read>(reader: R, builder: &mut TileMapBuilder) -> MapResult<usize> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut applied = 0;
    for result in csv_reader.deserialize::<TileRecord>() {
        let row = result.map_err(|e| MapError::Parse(e.to_string()))?;
        builder.set_flags(row.x, row.y, parse_flags(&row.flags)?)?;
        builder.set_terrain_tag(row.x, row.y, row.terrain_tag)?;
        builder.set_region(row.x, row.y, row.region_id)?;
        applied += 1;
    }
    Ok(applied)
}

fn parse_flags(s: &str) -> MapResult<TileFlags> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(TileFlags::GROUND);
    }
    s.split('|').try_fold(TileFlags::empty(), |acc, name| {
        let name = name.trim().to_ascii_lowercase();
        TileFlags::from_flag_name(&name)
            .map(|f| acc | f)
            .ok_or_else(|| MapError::Parse(format!("unknown tile flag {name:?}")))
    })
}
