//! The `WorldHooks` trait — the engine's only outward calls.

use tw_core::CharacterRef;
use tw_route::ExternalCall;

/// Notifications from the movement engine.
///
/// Every method has a no-op default so an application overrides only the
/// ones it cares about.
///
/// # Example
///
/// ```rust
/// use tw_behavior::WorldHooks;
/// use tw_core::CharacterRef;
///
/// #[derive(Default)]
/// struct DoorBell { rung: u32 }
///
/// impl WorldHooks for DoorBell {
///     fn on_touch_front(&mut self, who: CharacterRef, x: i32, y: i32) {
///         if who.is_player() && (x, y) == (4, 0) {
///             self.rung += 1;
///         }
///     }
/// }
/// ```
pub trait WorldHooks {
    /// `who` failed to step and is facing tile `(x, y)`.
    fn on_touch_front(&mut self, _who: CharacterRef, _x: i32, _y: i32) {}

    /// `who` finished a step and is standing on `(x, y)`.
    fn on_touch_here(&mut self, _who: CharacterRef, _x: i32, _y: i32) {}

    /// A route executed an `Invoke` command.
    fn on_external(&mut self, _who: CharacterRef, _call: &ExternalCall) {}

    /// While `true` the player ignores input (a cutscene or dialogue is
    /// running).  Forced routes still execute.
    fn is_interaction_running(&self) -> bool {
        false
    }
}

/// One recorded hook notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HookEvent {
    TouchFront { who: CharacterRef, x: i32, y: i32 },
    TouchHere { who: CharacterRef, x: i32, y: i32 },
    External { who: CharacterRef, call: ExternalCall },
}

/// Hooks that keep every notification in order.  Set `interaction_running`
/// to freeze player input.
#[derive(Clone, Debug, Default)]
pub struct RecordingHooks {
    pub events: Vec<HookEvent>,
    pub interaction_running: bool,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&mut self) -> Vec<HookEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn externals(&self) -> impl Iterator<Item = &ExternalCall> {
        self.events.iter().filter_map(|e| match e {
            HookEvent::External { call, .. } => Some(call),
            _ => None,
        })
    }
}

impl WorldHooks for RecordingHooks {
    fn on_touch_front(&mut self, who: CharacterRef, x: i32, y: i32) {
        self.events.push(HookEvent::TouchFront { who, x, y });
    }

    fn on_touch_here(&mut self, who: CharacterRef, x: i32, y: i32) {
        self.events.push(HookEvent::TouchHere { who, x, y });
    }

    fn on_external(&mut self, who: CharacterRef, call: &ExternalCall) {
        self.events.push(HookEvent::External { who, call: call.clone() });
    }

    fn is_interaction_running(&self) -> bool {
        self.interaction_running
    }
}
