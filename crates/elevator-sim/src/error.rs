//! The command-boundary error enum, carrying the `{INVALID_INPUT, FULL,
//! NOT_FOUND, STATE}` kinds from the error handling design. `TRANSIENT` and
//! `TRANSPORT` never escape as a hard error — they are caught and logged
//! inside the tick loop (see [`crate::engine::Engine::tick`]).

use elevator_core::{CoreError, ElevatorId};
use elevator_request::RequestError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("elevator {0} is at capacity")]
    Full(ElevatorId),

    #[error("elevator {0} not found")]
    NotFound(ElevatorId),

    #[error("{0}")]
    State(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Machine-distinguishable error kind, surfaced alongside the human-readable
/// message so a transport layer can map it to an HTTP status without string
/// matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ErrorKind {
    InvalidInput,
    Full,
    NotFound,
    State,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidInput(_) => ErrorKind::InvalidInput,
            EngineError::Full(_) => ErrorKind::Full,
            EngineError::NotFound(_) => ErrorKind::NotFound,
            EngineError::State(_) => ErrorKind::State,
        }
    }
}

impl From<RequestError> for EngineError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::OriginEqualsDestination(_) | RequestError::FloorOutOfRange { .. } => {
                EngineError::InvalidInput(err.to_string())
            }
            RequestError::ElevatorFull(id) => EngineError::Full(id),
            RequestError::ElevatorNotFound(id) => EngineError::NotFound(id),
        }
    }
}

impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        EngineError::InvalidInput(err.to_string())
    }
}
