//! Arrival handling (§4.3): the pickup/dropoff sweep run once per car per
//! tick when [`Elevator::step`][elevator_motion::Elevator::step] reports
//! [`MotionEvent::Arrived`], plus the internal-request fast path used by
//! `addManualRequest(type: internal)`.

use elevator_core::{BuildingConfig, ElevatorId, SimMillis};
use elevator_motion::Elevator;
use elevator_request::{Request, RequestBook};
use tracing::debug;

/// Run the pickup sweep then the dropoff sweep for `elevator`, which has
/// just arrived at `floor`. Operates over a snapshot of pending ids so
/// removing a request mid-sweep (dropoff → archive) never invalidates the
/// iteration, per §4.3.
pub fn handle_arrival(
    elevator: &mut Elevator,
    floor: u32,
    now: SimMillis,
    book: &mut RequestBook,
) {
    let pending_ids = book.pending_ids();

    // Pickup sweep.
    for id in &pending_ids {
        let Some(request) = book.get_mut(*id) else { continue };
        if request.assigned_to != Some(elevator.id)
            || request.origin != Some(floor)
            || request.pickup_time.is_some()
        {
            continue;
        }
        if elevator.try_board() {
            request.pickup_time = Some(now);
            elevator.push_route(request.destination);
            debug!(elevator = %elevator.id, request = %request.id, floor, "pickup");
        } else {
            // Car filled up between assignment and arrival: release back to
            // the unassigned pool for reassignment next tick.
            request.assigned_to = None;
            debug!(elevator = %elevator.id, request = %request.id, "pickup deferred: car full");
        }
    }

    // Dropoff sweep.
    for id in &pending_ids {
        let Some(request) = book.get(*id) else { continue };
        if request.assigned_to != Some(elevator.id)
            || request.destination != floor
            || request.pickup_time.is_none()
            || request.dropoff_time.is_some()
        {
            continue;
        }
        let id = *id;
        let request = book.get_mut(id).expect("checked above");
        request.dropoff_time = Some(now);
        elevator.disembark();
        debug!(elevator = %elevator.id, request = %request.id, floor, "dropoff");
        book.archive(id);
    }
}

/// §4.3 internal fast path: a passenger already onboard `elevator` presses a
/// destination button. Rejects a full car before constructing the request
/// (no partial mutation on failure).
pub fn add_internal_request(
    elevator: &mut Elevator,
    destination: u32,
    now: SimMillis,
    cfg: &BuildingConfig,
    book: &mut RequestBook,
) -> elevator_request::RequestResult<Request> {
    if elevator.is_full() {
        return Err(elevator_request::RequestError::ElevatorFull(elevator.id));
    }
    let request = Request::new_internal_assigned(now, destination, elevator.id, cfg)?;
    elevator.try_board();
    elevator.push_route(destination);
    book.insert_pending(request.clone());
    Ok(request)
}
