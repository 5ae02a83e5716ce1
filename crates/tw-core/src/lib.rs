//! `tw-core` — foundational types for the `tilewalk` movement engine.
//!
//! This crate is a dependency of every other `tw-*` crate.  It intentionally
//! has no `tw-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `EntityId`, `MapId`, `CharacterRef`                   |
//! | [`direction`]   | `Direction` — 8 compass codes in numpad layout        |
//! | [`vehicle`]     | `VehicleKind` enum                                    |
//! | [`time`]        | `Tick`, `FrameClock`                                  |
//! | [`config`]      | `EngineConfig`                                        |
//! | [`rng`]         | `CharacterRng` (per-character, deterministic)         |
//! | [`error`]       | `TwError`, `TwResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `tw-sim` save records.                         |

pub mod config;
pub mod direction;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::EngineConfig;
pub use direction::Direction;
pub use error::{TwError, TwResult};
pub use ids::{CharacterRef, EntityId, MapId};
pub use rng::CharacterRng;
pub use time::{FrameClock, Tick};
pub use vehicle::VehicleKind;
