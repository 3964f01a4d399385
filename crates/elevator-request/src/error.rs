use thiserror::Error;

use elevator_core::ElevatorId;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("origin floor equals destination floor ({0})")]
    OriginEqualsDestination(u32),

    #[error("floor {floor} is out of range [1, {n_floors}]")]
    FloorOutOfRange { floor: u32, n_floors: u32 },

    #[error("elevator {0} is at capacity")]
    ElevatorFull(ElevatorId),

    #[error("elevator {0} not found")]
    ElevatorNotFound(ElevatorId),
}

pub type RequestResult<T> = Result<T, RequestError>;
