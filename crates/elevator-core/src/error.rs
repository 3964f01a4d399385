//! Shared error type for `elevator-core` primitives.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("speed must be strictly positive, got {0}")]
    InvalidSpeed(f64),
}

pub type CoreResult<T> = Result<T, CoreError>;
