//! `tw-behavior` — the hooks the engine calls out through, and the
//! decisions autonomous roamers make.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`hooks`]  | `WorldHooks` trait, `HookEvent`, `RecordingHooks`               |
//! | [`noop`]   | `NoopHooks` — ignores every notification                        |
//! | [`roam`]   | `MoveType`, `RoamAction`, `decide_roam`, `stop_count_threshold` |
//! | [`error`]  | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Design notes
//!
//! The engine owns no trigger logic.  Whenever something an application
//! might react to happens (a blocked step bumps into a tile, the player
//! finishes a step, a route issues an external call) it notifies the
//! [`WorldHooks`] implementation and carries on.  Hooks are told *who* and
//! *where*; they return nothing and cannot veto movement.

pub mod error;
pub mod hooks;
pub mod noop;
pub mod roam;


pub use error::{BehaviorError, BehaviorResult};
pub use hooks::{HookEvent, RecordingHooks, WorldHooks};
pub use noop::NoopHooks;
pub use roam::{decide_roam, stop_count_threshold, MoveType, RoamAction};
