//! The HTTP command surface (§6, §6A): one route per command, each handler
//! dispatching a [`Command`] to the engine task and translating the reply
//! into a JSON response.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use elevator_request::{Request, RequestKind};
use elevator_sim::{EngineConfig, ManualRequestSpec, Snapshot};
use elevator_metrics::MetricsSnapshot;
use serde::Serialize;
use serde_json::Value;

use crate::api_error::{merge_json, ApiError};
use crate::command::{Command, Reply};
use crate::state::AppState;
use crate::validation::{AddRequestBody, RequestFrequencyBody, ScenarioBody, SpeedBody, ValidatedJson};
use crate::ws::ws_handler;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/start", post(start))
        .route("/api/stop", post(stop))
        .route("/api/reset", post(reset))
        .route("/api/speed", post(set_speed))
        .route("/api/reconfig", post(reconfig))
        .route("/api/requests", post(add_request))
        .route("/api/scenarios/{name}", post(spawn_scenario))
        .route("/api/request-frequency", post(set_request_frequency))
        .route("/api/snapshot", get(get_snapshot))
        .route("/api/metrics", get(get_metrics))
        .route("/ws", get(ws_handler))
        .with_state(state)
}

#[derive(Serialize)]
struct CommandAck {
    ok: bool,
    message: String,
}

impl CommandAck {
    fn ok(message: impl Into<String>) -> Self {
        Self { ok: true, message: message.into() }
    }
}

#[derive(Serialize)]
struct RequestAck {
    ok: bool,
    message: String,
    request: Option<Request>,
}

#[derive(Serialize)]
struct ScenarioAck {
    ok: bool,
    inserted: usize,
}

async fn start(State(state): State<AppState>) -> Result<Json<CommandAck>, ApiError> {
    state.dispatch(Command::Start).await?;
    Ok(Json(CommandAck::ok("engine started")))
}

async fn stop(State(state): State<AppState>) -> Result<Json<CommandAck>, ApiError> {
    state.dispatch(Command::Stop).await?;
    Ok(Json(CommandAck::ok("engine stopped")))
}

async fn reset(State(state): State<AppState>) -> Result<Json<CommandAck>, ApiError> {
    state.dispatch(Command::Reset).await?;
    Ok(Json(CommandAck::ok("engine reset")))
}

async fn set_speed(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<SpeedBody>,
) -> Result<Json<CommandAck>, ApiError> {
    state.dispatch(Command::SetSpeed(body.speed)).await?;
    Ok(Json(CommandAck::ok(format!("speed set to {}", body.speed))))
}

/// `reconfig` merges the JSON patch onto the live config (fetched fresh
/// from the engine task) before replacing it wholesale — §6 "re-init with
/// merged config".
async fn reconfig(
    State(state): State<AppState>,
    ValidatedJson(patch): ValidatedJson<Value>,
) -> Result<Json<CommandAck>, ApiError> {
    let Reply::Config(current) = state.dispatch(Command::CurrentConfig).await? else {
        return Err(ApiError::Internal("unexpected reply to CurrentConfig".into()));
    };
    let mut merged = serde_json::to_value(&current)?;
    merge_json(&mut merged, &patch);
    let merged_config: EngineConfig = serde_json::from_value(merged)
        .map_err(|err| ApiError::InvalidInput(format!("invalid reconfig body: {err}")))?;

    state.dispatch(Command::Reconfig(merged_config)).await?;
    Ok(Json(CommandAck::ok("engine reconfigured")))
}

async fn add_request(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<AddRequestBody>,
) -> Result<Json<RequestAck>, ApiError> {
    let kind: RequestKind = body.kind.into();
    if kind == RequestKind::External && body.origin.is_none() {
        return Err(ApiError::InvalidInput("external request requires an origin floor".into()));
    }
    if kind == RequestKind::Internal && body.elevator_id.is_none() {
        return Err(ApiError::InvalidInput("internal request requires an elevatorId".into()));
    }
    let spec = ManualRequestSpec {
        kind,
        origin: body.origin,
        destination: body.destination,
        elevator_id: body.elevator_id,
        is_morning_rush: body.is_morning_rush,
    };
    let Reply::Request(request) = state.dispatch(Command::AddManualRequest(spec)).await? else {
        return Err(ApiError::Internal("unexpected reply to AddManualRequest".into()));
    };
    Ok(Json(RequestAck { ok: true, message: "request accepted".into(), request: Some(request) }))
}

async fn spawn_scenario(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ValidatedJson(body): ValidatedJson<ScenarioBody>,
) -> Result<Json<ScenarioAck>, ApiError> {
    let Reply::ScenarioInserted(inserted) =
        state.dispatch(Command::SpawnScenario { name, count: body.count }).await?
    else {
        return Err(ApiError::Internal("unexpected reply to SpawnScenario".into()));
    };
    Ok(Json(ScenarioAck { ok: true, inserted }))
}

async fn set_request_frequency(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RequestFrequencyBody>,
) -> Result<Json<CommandAck>, ApiError> {
    state.dispatch(Command::SetRequestFrequency(body.freq_per_minute)).await?;
    Ok(Json(CommandAck::ok(format!("request frequency set to {}/min", body.freq_per_minute))))
}

async fn get_snapshot(State(state): State<AppState>) -> Result<Json<Snapshot>, ApiError> {
    let Reply::Snapshot(snapshot) = state.dispatch(Command::Snapshot).await? else {
        return Err(ApiError::Internal("unexpected reply to Snapshot".into()));
    };
    Ok(Json(snapshot))
}

async fn get_metrics(State(state): State<AppState>) -> Result<Json<MetricsSnapshot>, ApiError> {
    let Reply::Metrics(metrics) = state.dispatch(Command::MetricsSnapshot).await? else {
        return Err(ApiError::Internal("unexpected reply to MetricsSnapshot".into()));
    };
    Ok(Json(metrics))
}
