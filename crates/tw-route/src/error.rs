//! Route-subsystem error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type RouteResult<T> = Result<T, RouteError>;
