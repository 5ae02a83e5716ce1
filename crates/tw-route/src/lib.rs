//! `tw-route` — move commands, move routes, and the route interpreter.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`command`]     | `MoveCommand`, `ExternalCall`                           |
//! | [`route`]       | `MoveRoute` (command list + repeat/skippable flags)     |
//! | [`interpreter`] | `RouteInterpreter`, `RouteStep`, `RouteState`, `MemorizedRoute` |
//! | [`script`]      | `parse_route` — one command per line text format        |
//! | [`error`]       | `RouteError`, `RouteResult<T>`                          |
//!
//! # Execution model (summary)
//!
//! The interpreter never moves anything itself.  Each time its owner is
//! standing still it hands out at most one command:
//!
//! ```text
//! step = interpreter.next_step()
//! Command(c) → owner executes c, then interpreter.advance(succeeded)
//! Waiting    → nothing this tick
//! Looped     → repeat route wrapped to index 0
//! Restored   → forced route ended, original route reinstated (counts as a failure)
//! Finished   → non-repeating route ran out
//! ```

pub mod command;
pub mod error;
pub mod interpreter;
pub mod route;
pub mod script;


pub use command::{ExternalCall, MoveCommand};
pub use error::{RouteError, RouteResult};
pub use interpreter::{MemorizedRoute, RouteInterpreter, RouteState, RouteStep};
pub use route::MoveRoute;
pub use script::{parse_command, parse_route};
