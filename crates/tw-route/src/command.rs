//! The move-command vocabulary.

use tw_core::{CharacterRef, Direction};

/// Side-effecting request handed to the world hooks.  The engine never
/// inspects it and nothing is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExternalCall {
    SetSwitch { id: u32, value: bool },
    PlaySound(String),
    Script(String),
}

/// One entry of a [`crate::MoveRoute`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveCommand {
    // ── Moves ─────────────────────────────────────────────────────────────
    /// One tile in any of the 8 directions.
    Move(Direction),
    MoveRandom,
    MoveToward(CharacterRef),
    MoveAway(CharacterRef),
    MoveForward,
    /// One tile opposite the facing direction, facing kept.
    MoveBackward,
    Jump { dx: i32, dy: i32 },
    /// Pause the route for N ticks.
    Wait(u32),

    // ── Turns ─────────────────────────────────────────────────────────────
    Turn(Direction),
    TurnRight90,
    TurnLeft90,
    Turn180,
    TurnRightOrLeft90,
    TurnRandom,
    TurnToward(CharacterRef),
    TurnAway(CharacterRef),

    // ── Attributes ────────────────────────────────────────────────────────
    ChangeSpeed(u8),
    ChangeFrequency(u8),
    WalkAnime(bool),
    StepAnime(bool),
    DirectionFix(bool),
    Through(bool),
    Transparent(bool),
    ChangeImage { name: String, index: u8 },
    ChangeOpacity(u8),
    ChangeBlendMode(u8),

    Invoke(ExternalCall),
}

impl MoveCommand {
    /// `true` for commands that try to change the grid position.
    pub fn is_move(&self) -> bool {
        matches!(
            self,
            MoveCommand::Move(_)
                | MoveCommand::MoveRandom
                | MoveCommand::MoveToward(_)
                | MoveCommand::MoveAway(_)
                | MoveCommand::MoveForward
                | MoveCommand::MoveBackward
                | MoveCommand::Jump { .. }
        )
    }
}
