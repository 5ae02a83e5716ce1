//! Hooks that ignore everything.

use crate::WorldHooks;

/// A [`WorldHooks`] with every default left in place.
///
/// Useful in tests, and for worlds whose only driver is player input.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopHooks;

impl WorldHooks for NoopHooks {}
