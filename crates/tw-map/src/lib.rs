//! `tw-map` — the map query interface and a reference tile-map store.
//!
//! The movement engine never owns map data; it only asks questions through
//! the [`MapQuery`] trait.  [`TileMap`] is the in-memory implementation used
//! by the demo and the test suites, and by applications that do not bring
//! their own map storage.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`query`]    | `MapQuery` trait — passability, wraparound geometry, tags   |
//! | [`tile_map`] | `TileMap`, `TileMapBuilder`, `TileFlags`, ASCII layouts     |
//! | [`loader`]   | `load_tiles_csv` / `load_tiles_reader`                      |
//! | [`error`]    | `MapError`, `MapResult<T>`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `tw-core` public types. |

pub mod error;
pub mod loader;
pub mod query;
pub mod tile_map;


pub use error::{MapError, MapResult};
pub use loader::{load_tiles_csv, load_tiles_reader};
pub use query::MapQuery;
pub use tile_map::{TileFlags, TileMap, TileMapBuilder};
