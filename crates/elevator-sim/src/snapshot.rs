//! `Snapshot` — the shape returned by `snapshot()` and pushed to subscribers
//! after every tick.
//!
//! Per the design notes, this is a defensive shallow copy: consumers
//! (broadcast, HTTP) receive owned `Vec`s of cloned elevator/request state
//! and cannot observe or mutate mid-tick engine state through it.

use elevator_core::SimMillis;
use elevator_motion::Elevator;
use elevator_request::Request;

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Snapshot {
    pub time: SimMillis,
    pub elevators: Vec<Elevator>,
    pub pending_requests: Vec<Request>,
    pub running: bool,
}
