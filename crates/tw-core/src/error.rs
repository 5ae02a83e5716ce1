//! Engine error type.
//!
//! Sub-crates define their own error enums and convert into them via `From`
//! impls where a `TwError` bubbles up.  Movement itself never errors: failed
//! moves are ordinary outcomes, not `Err`s.

use thiserror::Error;

/// The top-level error type for `tw-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum TwError {
    #[error("invalid direction code {0}")]
    InvalidDirection(u8),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `tw-*` crates.
pub type TwResult<T> = Result<T, TwError>;
