//! The transport and process-bootstrap crate (§6A): the only place in the
//! workspace that knows about HTTP, WebSockets, or the process environment.
//! Every simulation crate below it is usable as a library with no `tokio`
//! or `axum` dependency at all.

pub mod api_error;
pub mod command;
pub mod event;
pub mod http;
pub mod state;
pub mod task;
pub mod validation;
pub mod ws;

use std::time::Duration;

use elevator_sim::EngineConfig;
use rand::RngCore;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tracing::info;

use crate::state::AppState;
use crate::task::{run_engine_task, COMMAND_CHANNEL_CAPACITY, EVENT_CHANNEL_CAPACITY};

/// Tick period for each `SIM_MODE` (§9A config): development ticks fast for
/// a responsive local UI, production ticks at wall-clock real time.
const DEVELOPMENT_TICK_MS: u64 = 200;
const PRODUCTION_TICK_MS: u64 = 1000;
const DEFAULT_PORT: u16 = 3000;

fn tick_ms_for_mode(mode: &str) -> u64 {
    match mode {
        "production" => PRODUCTION_TICK_MS,
        _ => DEVELOPMENT_TICK_MS,
    }
}

fn port_from_env() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Installs the global `tracing` subscriber, spawns the engine task, builds
/// the `axum::Router`, and serves it until the process receives a shutdown
/// signal (§6A "process bootstrap").
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let sim_mode = std::env::var("SIM_MODE").unwrap_or_else(|_| "development".into());
    let tick_ms = tick_ms_for_mode(&sim_mode);
    let port = port_from_env();
    let seed = rand::thread_rng().next_u64();

    let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
    let (event_tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

    let engine_task = tokio::spawn(run_engine_task(EngineConfig::default(), seed, tick_ms, command_rx, event_tx.clone()));

    let state = AppState { command_tx, event_tx };
    let app = http::router(state);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!(%sim_mode, tick_ms, port, "elevator-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Give the engine task a moment to notice the command channel is
    // about to drop and exit its select loop cleanly.
    drop(engine_task);
    tokio::time::sleep(Duration::from_millis(1)).await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("shutdown signal received");
}
