//! `AppState` — the `axum` router's shared handle onto the engine task.

use tokio::sync::{broadcast, mpsc, oneshot};

use crate::api_error::ApiError;
use crate::command::{Command, CommandEnvelope, Reply};
use crate::event::EngineEvent;

#[derive(Clone)]
pub struct AppState {
    pub command_tx: mpsc::Sender<CommandEnvelope>,
    pub event_tx: broadcast::Sender<EngineEvent>,
}

impl AppState {
    /// Send `command` to the engine task and await its reply, translating
    /// channel-level failures (engine task gone) into [`ApiError::Internal`]
    /// and engine-level rejections into [`ApiError::Engine`].
    pub async fn dispatch(&self, command: Command) -> Result<Reply, ApiError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(CommandEnvelope { command, reply: reply_tx })
            .await
            .map_err(|_| ApiError::Internal("engine task is not running".into()))?;
        reply_rx
            .await
            .map_err(|_| ApiError::Internal("engine task dropped the reply channel".into()))?
            .map_err(ApiError::from)
    }
}
