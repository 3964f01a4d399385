//! Request-validation middleware (§6A): a small `axum` extractor that
//! deserializes the JSON body and turns any shape/range failure into a
//! `400 Bad Request` with a `{kind, message}` body *before* a [`crate::command::Command`]
//! is ever constructed — the engine task never sees a malformed command.

use axum::extract::{FromRequest, Request as AxumRequest};
use serde::de::DeserializeOwned;

use crate::api_error::ApiError;

/// Wraps [`axum::Json`] so a malformed/out-of-shape body becomes an
/// [`ApiError::InvalidInput`] with the same `{kind, message}` response
/// shape every other command-boundary rejection uses, instead of axum's
/// default plaintext rejection body.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: AxumRequest, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::InvalidInput(rejection.to_string()))?;
        Ok(ValidatedJson(value))
    }
}

// ── Request bodies (§6 command surface) ──────────────────────────────────

use elevator_core::ElevatorId;
use elevator_request::RequestKind;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRequestBody {
    #[serde(rename = "type")]
    pub kind: RequestKindBody,
    pub origin: Option<u32>,
    pub destination: u32,
    pub elevator_id: Option<ElevatorId>,
    #[serde(default)]
    pub is_morning_rush: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKindBody {
    External,
    Internal,
}

impl From<RequestKindBody> for RequestKind {
    fn from(kind: RequestKindBody) -> Self {
        match kind {
            RequestKindBody::External => RequestKind::External,
            RequestKindBody::Internal => RequestKind::Internal,
        }
    }
}

#[derive(Deserialize)]
pub struct SpeedBody {
    pub speed: f64,
}

#[derive(Deserialize, Default)]
pub struct ScenarioBody {
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFrequencyBody {
    pub freq_per_minute: f64,
}
