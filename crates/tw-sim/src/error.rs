use thiserror::Error;

use tw_core::{CharacterRef, MapId, TwError};
use tw_map::MapError;
use tw_mobility::MobilityError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("world configuration error: {0}")]
    Config(#[from] TwError),

    #[error("map error: {0}")]
    Map(#[from] MapError),

    #[error("mobility error: {0}")]
    Mobility(#[from] MobilityError),

    #[error("save record was taken on map {recorded}, world is on map {current}")]
    MapMismatch { recorded: MapId, current: MapId },

    #[error("save record holds {got} {what}, world has {expected}")]
    CountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("save record for {who} is invalid: {reason}")]
    BadRecord { who: CharacterRef, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
