//! `GET /ws` — the push channel (§6A): sends one snapshot immediately on
//! connect, then forwards every [`EngineEvent`] broadcast by the engine
//! task until the socket closes or a send fails.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use tracing::{debug, warn};

use crate::command::Command;
use crate::event::EngineEvent;
use crate::state::AppState;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let mut events = state.event_tx.subscribe();

    if let Ok(reply) = state.dispatch(Command::Snapshot).await {
        if let crate::command::Reply::Snapshot(snapshot) = reply {
            if send_event(&mut socket, &EngineEvent::Snapshot { data: snapshot }).await.is_err() {
                return;
            }
        }
    }

    loop {
        tokio::select! {
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("websocket subscriber disconnected");
                        return;
                    }
                    // Inbound frames carry no commands (§6A: WebSocket is
                    // push-only); anything else is simply ignored.
                    Some(Ok(_)) => continue,
                    Some(Err(err)) => {
                        warn!(%err, "websocket receive error; dropping subscriber");
                        return;
                    }
                }
            }
            event = events.recv() => {
                let event = match event {
                    Ok(event) => event,
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "websocket subscriber lagged behind the event broadcast");
                        continue;
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => return,
                };
                if send_event(&mut socket, &event).await.is_err() {
                    return;
                }
            }
        }
    }
}

async fn send_event(socket: &mut WebSocket, event: &EngineEvent) -> Result<(), ()> {
    let text = match serde_json::to_string(event) {
        Ok(text) => text,
        Err(err) => {
            warn!(%err, "failed to serialize engine event");
            return Err(());
        }
    };
    socket.send(Message::Text(text.into())).await.map_err(|err| {
        warn!(%err, "websocket send failed; dropping subscriber");
    })
}
