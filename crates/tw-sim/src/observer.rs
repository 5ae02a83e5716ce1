//! World observer trait for progress reporting and snapshots.

use tw_core::Tick;
use tw_mobility::ActorStore;

/// Callbacks invoked by [`World::step`][crate::World::step] around each tick.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — position printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl WorldObserver for Printer {
///     fn on_snapshot(&mut self, tick: Tick, actors: &ActorStore) {
///         let p = &actors.player.character;
///         println!("{tick}: player at ({}, {})", p.x, p.y);
///     }
/// }
/// ```
pub trait WorldObserver {
    /// Called at the very start of each tick, before any character updates.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after every character has been updated.
    fn on_tick_end(&mut self, _tick: Tick, _actors: &ActorStore) {}

    /// Called every `config.snapshot_interval_ticks` ticks.
    fn on_snapshot(&mut self, _tick: Tick, _actors: &ActorStore) {}
}

/// A [`WorldObserver`] that does nothing.
pub struct NoopObserver;

impl WorldObserver for NoopObserver {}
