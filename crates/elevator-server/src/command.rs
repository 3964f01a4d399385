//! The `mpsc`-delivered command enum and its `oneshot` reply — the seam
//! between the HTTP/WebSocket handlers and the single task that owns the
//! [`elevator_sim::Engine`] (§6A, §9 "engine handle").
//!
//! Handlers never touch the engine directly: they build a [`Command`],
//! send it on [`crate::state::AppState::command_tx`] together with a
//! `oneshot::Sender` for the reply, and await the reply. This is what makes
//! a tick step atomic with respect to commands (§5) without a `Mutex`
//! around engine state.

use elevator_metrics::MetricsSnapshot;
use elevator_request::Request;
use elevator_sim::{EngineConfig, ManualRequestSpec, Snapshot};
use tokio::sync::oneshot;

#[derive(Debug)]
pub enum Command {
    Start,
    Stop,
    Reset,
    SetSpeed(f64),
    /// Not part of §6's command surface directly; used internally by the
    /// `reconfig` handler to fetch the live config to merge a partial body
    /// onto before replacing it wholesale.
    CurrentConfig,
    Reconfig(EngineConfig),
    AddManualRequest(ManualRequestSpec),
    SpawnScenario { name: String, count: Option<u32> },
    SetRequestFrequency(f64),
    Snapshot,
    MetricsSnapshot,
}

/// The successful outcome of a [`Command`]. Variants correspond 1:1 to the
/// `Command` that produced them.
#[derive(Debug)]
pub enum Reply {
    Ack,
    Config(EngineConfig),
    Request(Request),
    ScenarioInserted(usize),
    Snapshot(Snapshot),
    Metrics(MetricsSnapshot),
}

/// One command plus the channel its result is delivered on.
pub struct CommandEnvelope {
    pub command: Command,
    pub reply: oneshot::Sender<elevator_sim::EngineResult<Reply>>,
}
