use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("unknown move type '{0}'")]
    UnknownMoveType(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
