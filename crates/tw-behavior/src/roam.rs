//! Autonomous movement of roaming entities.
//!
//! # Cadence
//!
//! A roamer acts once its stop counter exceeds
//!
//! ```text
//! threshold = 30 * (5 - move_frequency)
//! ```
//!
//! so frequency 5 acts every tick it is standing still and frequency 1
//! waits 120 ticks between steps.
//!
//! # Rolls
//!
//! Each action is a uniform roll in `0..6`:
//!
//! | Move type      | 0 | 1 | 2 | 3 | 4 | 5 |
//! |----------------|---|---|---|---|---|---|
//! | `Random`       | random | random | forward | forward | forward | rest |
//! | `TowardPlayer` (near) | toward | toward | toward | toward | random | forward |
//!
//! A `TowardPlayer` roamer that is not near the player steps randomly.

use std::fmt;
use std::str::FromStr;

use tw_core::CharacterRng;

use crate::BehaviorError;

/// How a roaming entity moves when nothing forces it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveType {
    #[default]
    Fixed,
    Random,
    TowardPlayer,
    /// Runs its own (non-forced) move route.
    Custom,
}

impl MoveType {
    pub fn as_str(self) -> &'static str {
        match self {
            MoveType::Fixed => "fixed",
            MoveType::Random => "random",
            MoveType::TowardPlayer => "toward_player",
            MoveType::Custom => "custom",
        }
    }
}

impl fmt::Display for MoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoveType {
    type Err = BehaviorError;

    fn from_str(s: &str) -> Result<MoveType, BehaviorError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(MoveType::Fixed),
            "random" => Ok(MoveType::Random),
            "toward_player" | "approach" => Ok(MoveType::TowardPlayer),
            "custom" => Ok(MoveType::Custom),
            other => Err(BehaviorError::UnknownMoveType(other.to_string())),
        }
    }
}

/// What a roamer does this tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RoamAction {
    /// Stand still a while longer (resets the stop counter).
    Rest,
    StepRandom,
    StepForward,
    StepTowardPlayer,
    /// Execute the next step of the roamer's own route.
    RunRoute,
}

/// Stop-count threshold above which a roamer with `move_frequency` acts.
pub fn stop_count_threshold(move_frequency: u8) -> u32 {
    30 * (5 - move_frequency.clamp(1, 5) as u32)
}

/// Pick the next action for a roamer that is due to act.
///
/// `near_player` should be `true` when the player is within the configured
/// Manhattan distance.  Returns `None` for `Fixed` roamers.
pub fn decide_roam(move_type: MoveType, near_player: bool, rng: &mut CharacterRng) -> Option<RoamAction> {
    let action = match move_type {
        MoveType::Fixed => return None,
        MoveType::Random => match rng.below(6) {
            0 | 1 => RoamAction::StepRandom,
            2..=4 => RoamAction::StepForward,
            _ => RoamAction::Rest,
        },
        MoveType::TowardPlayer if near_player => match rng.below(6) {
            0..=3 => RoamAction::StepTowardPlayer,
            4 => RoamAction::StepRandom,
            _ => RoamAction::StepForward,
        },
        MoveType::TowardPlayer => RoamAction::StepRandom,
        MoveType::Custom => RoamAction::RunRoute,
    };
    Some(action)
}
