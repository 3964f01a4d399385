//! Maps the engine's command-boundary errors (§7) onto HTTP responses.
//!
//! Library crates in this workspace use `thiserror`; this binary crate
//! converts those into `axum` responses and reaches for `anyhow` only at
//! the bootstrap edge (§9A "error handling"), matching the teacher pack's
//! split between library and binary error handling.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use elevator_sim::{EngineError, ErrorKind};
use serde::Serialize;
use serde_json::Value;

/// A transport-level error: either the engine rejected a command (carries
/// the original [`EngineError`]) or something failed in the transport glue
/// itself (channel closed, `serde_json` round-trip failure).
#[derive(Debug)]
pub enum ApiError {
    Engine(EngineError),
    InvalidInput(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::Engine(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::InvalidInput => "INVALID_INPUT",
        ErrorKind::Full => "FULL",
        ErrorKind::NotFound => "NOT_FOUND",
        ErrorKind::State => "STATE",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Engine(err) => {
                let status = match err.kind() {
                    ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
                    ErrorKind::Full => StatusCode::CONFLICT,
                    ErrorKind::NotFound => StatusCode::NOT_FOUND,
                    ErrorKind::State => StatusCode::CONFLICT,
                };
                (status, ErrorBody { kind: kind_label(err.kind()), message: err.to_string() })
            }
            ApiError::InvalidInput(message) => {
                (StatusCode::BAD_REQUEST, ErrorBody { kind: "INVALID_INPUT", message })
            }
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody { kind: "INTERNAL", message })
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Recursive merge used by the `reconfig` handler: every leaf in `patch`
/// overwrites the corresponding leaf in `base`; objects merge key-wise
/// rather than replacing wholesale.
pub fn merge_json(base: &mut Value, patch: &Value) {
    match (base, patch) {
        (Value::Object(base_map), Value::Object(patch_map)) => {
            for (key, value) in patch_map {
                merge_json(base_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_overwrites_leaves_and_preserves_siblings() {
        let mut base = json!({"building": {"nFloors": 12, "nElevators": 3}, "scoring": {"etaWeight": 0.0015}});
        let patch = json!({"building": {"nFloors": 20}});
        merge_json(&mut base, &patch);
        assert_eq!(base["building"]["nFloors"], 20);
        assert_eq!(base["building"]["nElevators"], 3);
        assert_eq!(base["scoring"]["etaWeight"], 0.0015);
    }
}
