//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter: one tick is one
//! simulation frame, and every entity is updated exactly once per tick.
//! The mapping to wall-clock time is held in `FrameClock`:
//!
//!   wall_time = tick / frames_per_second
//!
//! Using an integer tick as the canonical time unit keeps movement
//! deterministic; only the sub-tile render position uses floats.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// The world's frame counter and its nominal frame rate.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameClock {
    /// Nominal frame rate.  Default: 60.
    pub frames_per_second: u32,
    /// The current tick — advanced by `FrameClock::advance()` each frame.
    pub current_tick: Tick,
}

impl FrameClock {
    pub fn new(frames_per_second: u32) -> Self {
        Self { frames_per_second, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Frames covering `secs` seconds at the nominal rate.
    #[inline]
    pub fn frames_in(&self, secs: u64) -> u64 {
        secs * u64::from(self.frames_per_second)
    }
}

/// `mm:ss+ff`: play time with the frame within the current second.
impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fps = u64::from(self.frames_per_second.max(1));
        let frame = self.current_tick.0;
        let secs = frame / fps;
        write!(f, "{:02}:{:02}+{:02}", secs / 60, secs % 60, frame % fps)
    }
}
