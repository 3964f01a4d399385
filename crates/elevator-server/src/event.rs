//! `EngineEvent` — the push-channel payload broadcast to every WebSocket
//! subscriber (§6 "push channel").

use elevator_sim::{ErrorKind, Snapshot};
use serde::Serialize;

/// Framed the way §6 describes: `{"type": "snapshot", "data": ...}` or
/// `{"type": "info"|"error", "message": ...}`. Bit-exactness with any
/// particular client library isn't required, just this self-describing
/// shape.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EngineEvent {
    Snapshot { data: Snapshot },
    Info { message: String },
    Error { message: String, kind: ErrorKind },
}
