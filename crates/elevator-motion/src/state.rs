//! Motion direction and door state enums.

/// An elevator's current direction of travel.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Up,
    Down,
    Idle,
}

/// An elevator's door.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DoorState {
    Open,
    Closed,
}

/// What happened during one [`Elevator::step`][crate::Elevator::step] call.
///
/// `Arrived` is reported *before* the request-book sweep and route pop run —
/// the car is still logically "at" the stop (door open, route head
/// unchanged) until the caller invokes
/// [`Elevator::finish_arrival`][crate::Elevator::finish_arrival].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MotionEvent {
    /// No state transition worth reporting to the caller this tick.
    None,
    /// The car has just reached the head of its route and opened its door.
    Arrived { floor: u32 },
}
