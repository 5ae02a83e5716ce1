//! The input-driven avatar.

use tw_character::{Character, CharacterBuilder};
use tw_core::{CharacterRef, Direction, VehicleKind};

/// Where the player stands in the boarding cycle.
///
/// ```text
/// Walking ─get_on─▶ Boarding ─▶ Driving ─get_off─▶ Alighting ─▶ Walking
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleState {
    #[default]
    Walking,
    Boarding(VehicleKind),
    Driving(VehicleKind),
    Alighting(VehicleKind),
}

impl VehicleState {
    /// The vehicle involved, in every state but `Walking`.
    pub fn vehicle(self) -> Option<VehicleKind> {
        match self {
            VehicleState::Walking => None,
            VehicleState::Boarding(k) | VehicleState::Driving(k) | VehicleState::Alighting(k) => {
                Some(k)
            }
        }
    }

    pub fn is_transitioning(self) -> bool {
        matches!(self, VehicleState::Boarding(_) | VehicleState::Alighting(_))
    }
}

/// One tick of player input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerInput {
    /// Held direction, if any.  Overrides and clears a destination.
    pub direction: Option<Direction>,
    pub dash: bool,
    /// New destination tile to walk to via the path finder.
    pub destination: Option<(i32, i32)>,
}

impl PlayerInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn toward(direction: Direction) -> Self {
        Self { direction: Some(direction), ..Self::default() }
    }

    pub fn destination(x: i32, y: i32) -> Self {
        Self { destination: Some((x, y)), ..Self::default() }
    }
}

pub struct Player {
    pub character: Character,
    pub vehicle_state: VehicleState,
    /// Ignore collision entirely (level-editing aid).
    pub debug_through: bool,
    /// Tile the player is walking to on its own.
    pub destination: Option<(i32, i32)>,
}

impl Player {
    pub fn new(seed: u64) -> Self {
        Self {
            character:     CharacterBuilder::new(CharacterRef::Player, seed).build(),
            vehicle_state: VehicleState::Walking,
            debug_through: false,
            destination:   None,
        }
    }

    #[inline]
    pub fn vehicle(&self) -> Option<VehicleKind> {
        self.vehicle_state.vehicle()
    }

    #[inline]
    pub fn is_in_airship(&self) -> bool {
        self.vehicle() == Some(VehicleKind::Airship)
    }
}
