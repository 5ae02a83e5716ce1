//! `tw-mobility` — who may step where, and the per-tick movement of every
//! character.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                       |
//! |-----------------|----------------------------------------------------------------|
//! | [`store`]       | `ActorStore` — player, followers, entities, vehicles           |
//! | [`player`]      | `Player`, `PlayerInput`, `VehicleState`                        |
//! | [`follower`]    | `Follower`, `FollowerChain`                                    |
//! | [`vehicle`]     | `Vehicle` — boat, ship, airship                                |
//! | [`entity`]      | `RoamingEntity`                                                |
//! | [`collision`]   | `CollisionResolver` — layered passability                      |
//! | [`pathfinder`]  | `Pathfinder` trait, `BestFirstPathfinder`                      |
//! | [`engine`]      | `MobilityEngine<P>`, `MoveContext` — steps, jumps, routes      |
//! | [`control`]     | Per-tick player, follower, entity and vehicle updates          |
//! | [`error`]       | `MobilityError`, `MobilityResult<T>`                           |
//!
//! # Movement model
//!
//! Positions are integer tiles; a successful step moves the logical tile at
//! once and the render position (`real_x`, `real_y`) catches up over the
//! following ticks.  A character is *moving* while the two differ, and only
//! stopped characters start new steps.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `serde`   | Serialize player vehicle state and nested types.         |
//! | `fx-hash` | FxHash for the path finder's open/closed sets.           |

pub mod collision;
pub mod control;
pub mod engine;
pub mod entity;
pub mod error;
pub mod follower;
pub mod pathfinder;
pub mod player;
pub mod store;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use collision::CollisionResolver;
pub use engine::{MobilityEngine, MoveContext};
pub use entity::RoamingEntity;
pub use error::{MobilityError, MobilityResult};
pub use follower::{Follower, FollowerChain};
pub use pathfinder::{BestFirstPathfinder, Pathfinder};
pub use player::{Player, PlayerInput, VehicleState};
pub use store::ActorStore;
pub use vehicle::Vehicle;
