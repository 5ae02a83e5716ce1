//! `tw-sim` — the world tick loop for the tilewalk movement engine.
//!
//! # Tick order
//!
//! ```text
//! for each tick:
//!   ① Player    — input or destination step, forced route, motion,
//!                 boarding / alighting state, touch-here
//!   ② Followers — gather if asked, then motion; attributes copied from
//!                 the player
//!   ③ Entities  — forced route, else autonomous roaming
//!   ④ Vehicles  — motion, airship altitude
//! ```
//!
//! Every character mutates only its own position; collision reads the
//! others as they stand at that moment.
//!
//! # Modules
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`world`]    | `World<M, H, P>` — owns map, actors, hooks and engine      |
//! | [`builder`]  | `WorldBuilder` — validated construction                    |
//! | [`observer`] | `WorldObserver`, `NoopObserver`                            |
//! | [`persist`]  | `WorldRecord` and per-character save records (JSON)        |
//! | [`config`]   | `load_config_reader`, `load_config_path`                   |
//! | [`error`]    | `SimError`, `SimResult<T>`                                 |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `fx-hash` | FxHash sets in the path finder.                           |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tw_core::{EngineConfig, MapId};
//! use tw_map::TileMap;
//! use tw_sim::{NoopObserver, PlayerInput, WorldBuilder};
//!
//! let map = TileMap::open(MapId(1), 20, 15)?;
//! let mut world = WorldBuilder::new(EngineConfig::default(), map)
//!     .player_at(2, 2)
//!     .followers(&["ana", "bo", "cy"])
//!     .build()?;
//! world.run_ticks(60, &PlayerInput::destination(10, 8), &mut NoopObserver);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod persist;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::WorldBuilder;
pub use config::{load_config_path, load_config_reader};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, WorldObserver};
pub use persist::{CharacterRecord, EntityRecord, VehicleRecord, WorldRecord};
pub use world::World;

pub use tw_mobility::PlayerInput;
