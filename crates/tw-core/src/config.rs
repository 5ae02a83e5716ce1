//! Engine configuration.

use crate::{TwError, TwResult};

/// Top-level engine configuration.
///
/// Typically loaded from a JSON file by the application (see
/// `tw_sim::load_config_reader`) and passed to the world builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Maximum search depth (steps from the start) of the path finder.
    pub search_limit: u32,

    /// Ceiling altitude of the airship.
    pub max_altitude: u32,

    /// Whether the follower chain starts visible.
    pub followers_visible: bool,

    /// Manhattan distance within which "toward player" roamers actually
    /// approach; beyond it they wander randomly.
    pub near_player_distance: i32,

    /// Allow the player to dash on foot.
    pub dash_enabled: bool,

    /// Nominal frame rate used by the clock.
    pub frames_per_second: u32,

    /// Observer snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl EngineConfig {
    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> TwResult<()> {
        if self.search_limit == 0 {
            return Err(TwError::Config("search_limit must be at least 1".into()));
        }
        if self.max_altitude == 0 {
            return Err(TwError::Config("max_altitude must be at least 1".into()));
        }
        if self.frames_per_second == 0 {
            return Err(TwError::Config("frames_per_second must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed:                    0,
            search_limit:            12,
            max_altitude:            48,
            followers_visible:       true,
            near_player_distance:    20,
            dash_enabled:            true,
            frames_per_second:       60,
            snapshot_interval_ticks: 0,
        }
    }
}
