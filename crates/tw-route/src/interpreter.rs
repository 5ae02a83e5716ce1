//! The move-route interpreter state machine.
//!
//! # States
//!
//! ```text
//!            set_move_route            force_move_route
//!   Idle ─────────────────▶ Executing ─────────────────▶ Forced
//!    ▲                         │  ▲                         │
//!    └──── route runs out ─────┘  └── forced route ends, ───┘
//!                                     original restored
//! ```
//!
//! Forcing memorizes the interrupted route and its index exactly once per
//! forcing episode: forcing again while already forced replaces the forced
//! route but keeps the first memorized original.

use log::debug;

use crate::{MoveCommand, MoveRoute};

/// What the owner should do this tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteStep {
    /// No route installed, nothing to do.
    Idle,
    /// Counting down a `Wait`.
    Waiting,
    /// Execute this command, then call [`RouteInterpreter::advance`].
    Command(MoveCommand),
    /// A repeating route wrapped back to its first command.
    Looped,
    /// A forced route ended and the memorized route is active again.
    /// The owner should record the tick's action as failed.
    Restored,
    /// A one-shot route has no commands left.
    Finished,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteState {
    Idle,
    Executing,
    Forced,
}

/// Route plus cursor saved when forcing begins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemorizedRoute {
    pub route: Option<MoveRoute>,
    pub index: usize,
}

/// Per-character route cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteInterpreter {
    route: Option<MoveRoute>,
    index: usize,
    forcing: bool,
    memorized: Option<MemorizedRoute>,
    wait_count: u32,
}

impl RouteInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpreter that starts executing `route` from its first command.
    pub fn with_route(route: MoveRoute) -> Self {
        Self { route: Some(route), ..Self::default() }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn route(&self) -> Option<&MoveRoute> {
        self.route.as_ref()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_forcing(&self) -> bool {
        self.forcing
    }

    pub fn memorized(&self) -> Option<&MemorizedRoute> {
        self.memorized.as_ref()
    }

    pub fn wait_count(&self) -> u32 {
        self.wait_count
    }

    pub fn state(&self) -> RouteState {
        if self.forcing {
            return RouteState::Forced;
        }
        match &self.route {
            Some(r) if r.repeat || self.index < r.len() => RouteState::Executing,
            _ => RouteState::Idle,
        }
    }

    // ── Installation ──────────────────────────────────────────────────────

    /// Replace the route.  While forced the new route becomes the memorized
    /// original so the forced route keeps running.
    pub fn set_move_route(&mut self, route: MoveRoute) {
        if self.forcing {
            self.memorized = Some(MemorizedRoute { route: Some(route), index: 0 });
        } else {
            self.route = Some(route);
            self.index = 0;
        }
    }

    /// Interrupt whatever is running with `route`.
    pub fn force_move_route(&mut self, route: MoveRoute) {
        if self.memorized.is_none() {
            self.memorized = Some(MemorizedRoute { route: self.route.take(), index: self.index });
        }
        debug!("forced route installed ({} commands)", route.len());
        self.route = Some(route);
        self.index = 0;
        self.forcing = true;
        self.wait_count = 0;
    }

    /// Drop the route and any forcing state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn restore(&mut self) {
        let memorized = self.memorized.take().unwrap_or_default();
        self.route = memorized.route;
        self.index = memorized.index;
        self.forcing = false;
        debug!("forced route ended, restored original at index {}", self.index);
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Fetch the next thing to do.  Call only while the owner is stopped.
    pub fn next_step(&mut self) -> RouteStep {
        if self.wait_count > 0 {
            self.wait_count -= 1;
            return RouteStep::Waiting;
        }
        let Some(route) = &self.route else {
            return RouteStep::Idle;
        };
        if let Some(command) = route.get(self.index) {
            return RouteStep::Command(command.clone());
        }
        if route.repeat {
            self.index = 0;
            RouteStep::Looped
        } else if self.forcing {
            self.restore();
            RouteStep::Restored
        } else {
            RouteStep::Finished
        }
    }

    /// Move past the command just executed.  Failed commands are retried
    /// next time unless the route is skippable.
    pub fn advance(&mut self, succeeded: bool) {
        let Some(route) = &self.route else {
            return;
        };
        if succeeded || route.skippable {
            self.index += 1;
            if route.repeat && self.index >= route.len() {
                self.index = 0;
            }
        }
    }

    /// Start a `Wait(n)`: this tick counts as the first of the `n`.
    pub fn set_wait(&mut self, ticks: u32) {
        self.wait_count = ticks.saturating_sub(1);
    }
}
