use thiserror::Error;

use tw_core::CharacterRef;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("no character {0} in this world")]
    UnknownCharacter(CharacterRef),

    #[error("{who} cannot be placed at ({x}, {y}): outside the map")]
    OutOfMap { who: CharacterRef, x: i32, y: i32 },

    #[error("follower chain membership cannot change while gathering")]
    ChainGathering,

    #[error("follower chain holds {capacity} slots, got {requested} members")]
    TooManyMembers { capacity: usize, requested: usize },
}

pub type MobilityResult<T> = Result<T, MobilityError>;
