//! `tw-character` — the positioned entity every mover is built on.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`appearance`] | `Priority`, `CharacterImage`                            |
//! | [`character`]  | `Character` — grid/real position, motion, jump, pattern |
//! | [`builder`]    | `CharacterBuilder`                                      |
//!
//! # Two positions
//!
//! `x`/`y` are the authoritative tile coordinates and jump to the destination
//! the moment a step is authorized.  `real_x`/`real_y` are the render
//! position; they start on the departed tile and converge on `x`/`y` over the
//! following ticks.  A character is *moving* exactly while the two differ.
//!
//! Collision is not decided here.  `tw-mobility` asks its resolver whether a
//! step is allowed and then calls the `apply_*` primitives on success.

pub mod appearance;
pub mod builder;
pub mod character;


pub use appearance::{CharacterImage, Priority};
pub use builder::CharacterBuilder;
pub use character::{Character, BUSH_DEPTH};
