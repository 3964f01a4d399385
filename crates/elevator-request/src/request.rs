//! The `Request` record — a single tagged product type for both request
//! kinds (no subclassing): `kind` selects the fast-path branch, optional
//! fields (`origin`, `assigned_to`, `pickup_time`, `dropoff_time`) carry the
//! rest of the lifecycle.

use elevator_core::{BuildingConfig, ElevatorId, SimMillis};
use uuid::Uuid;

use crate::error::{RequestError, RequestResult};

/// Opaque request identifier — a UUID, per the data model.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        RequestId(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a request originated from a hall call (outside any car) or from
/// a passenger already onboard a named car.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RequestKind {
    External,
    Internal,
}

/// A single passenger request, from submission through pickup to dropoff.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Request {
    pub id: RequestId,
    pub created_at: SimMillis,
    pub kind: RequestKind,
    /// `None` only for an internal request created after boarding, where the
    /// passenger's current floor is not tracked as an "origin" to visit.
    pub origin: Option<u32>,
    pub destination: u32,
    pub base_priority: f64,
    /// Recomputed every tick by the scheduler's priority refresh.
    pub priority: f64,
    pub escalated: bool,
    pub morning_rush: bool,
    pub assigned_to: Option<ElevatorId>,
    pub pickup_time: Option<SimMillis>,
    pub dropoff_time: Option<SimMillis>,
}

impl Request {
    /// Construct an external (hall-call) request. Validates `origin !=
    /// destination` and that both floors are in range; does not assign it to
    /// any elevator.
    pub fn new_external(
        now: SimMillis,
        origin: u32,
        destination: u32,
        morning_rush: bool,
        cfg: &BuildingConfig,
    ) -> RequestResult<Self> {
        validate_floor(origin, cfg)?;
        validate_floor(destination, cfg)?;
        if origin == destination {
            return Err(RequestError::OriginEqualsDestination(origin));
        }
        Ok(Self {
            id: RequestId::new(),
            created_at: now,
            kind: RequestKind::External,
            origin: Some(origin),
            destination,
            base_priority: 1.0,
            priority: 1.0,
            escalated: false,
            morning_rush,
            assigned_to: None,
            pickup_time: None,
            dropoff_time: None,
        })
    }

    /// Construct an internal request (already-boarded passenger pressing a
    /// destination button) and immediately assign it to `elevator`, as if
    /// pickup had already occurred. Validates the destination floor only.
    pub fn new_internal_assigned(
        now: SimMillis,
        destination: u32,
        elevator: ElevatorId,
        cfg: &BuildingConfig,
    ) -> RequestResult<Self> {
        validate_floor(destination, cfg)?;
        Ok(Self {
            id: RequestId::new(),
            created_at: now,
            kind: RequestKind::Internal,
            origin: None,
            destination,
            base_priority: 1.0,
            priority: 1.0,
            escalated: false,
            morning_rush: false,
            assigned_to: Some(elevator),
            pickup_time: Some(now),
            dropoff_time: None,
        })
    }

    /// The floor a still-unpicked-up request needs a car to visit: its
    /// origin for external requests, its destination for internal ones.
    #[inline]
    pub fn pickup_floor(&self) -> u32 {
        self.origin.unwrap_or(self.destination)
    }

    #[inline]
    pub fn is_served(&self) -> bool {
        self.pickup_time.is_some() && self.dropoff_time.is_some()
    }

    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.assigned_to.is_some()
    }

    #[inline]
    pub fn waited_ms(&self, now: SimMillis) -> i64 {
        now.since(self.created_at).max(0)
    }
}

fn validate_floor(floor: u32, cfg: &BuildingConfig) -> RequestResult<()> {
    if !cfg.floor_in_range(floor) {
        return Err(RequestError::FloorOutOfRange { floor, n_floors: cfg.n_floors });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> BuildingConfig {
        BuildingConfig::default()
    }

    #[test]
    fn rejects_origin_equals_destination() {
        let err = Request::new_external(SimMillis::ZERO, 3, 3, false, &cfg()).unwrap_err();
        assert!(matches!(err, RequestError::OriginEqualsDestination(3)));
    }

    #[test]
    fn rejects_out_of_range_floors() {
        let err = Request::new_external(SimMillis::ZERO, 0, 5, false, &cfg()).unwrap_err();
        assert!(matches!(err, RequestError::FloorOutOfRange { floor: 0, .. }));

        let err = Request::new_external(SimMillis::ZERO, 1, 99, false, &cfg()).unwrap_err();
        assert!(matches!(err, RequestError::FloorOutOfRange { floor: 99, .. }));
    }

    #[test]
    fn internal_request_is_pre_assigned_and_picked_up() {
        let r = Request::new_internal_assigned(SimMillis(10), 5, ElevatorId::new(0), &cfg())
            .unwrap();
        assert_eq!(r.assigned_to, Some(ElevatorId::new(0)));
        assert_eq!(r.pickup_time, Some(SimMillis(10)));
        assert!(!r.is_served());
        assert_eq!(r.pickup_floor(), 5);
    }

    #[test]
    fn external_pickup_floor_is_origin() {
        let r = Request::new_external(SimMillis::ZERO, 1, 5, false, &cfg()).unwrap();
        assert_eq!(r.pickup_floor(), 1);
    }
}
