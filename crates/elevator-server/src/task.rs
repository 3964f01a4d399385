//! The engine task: the one place that owns a live [`Engine`] (§5, §9
//! "engine handle"). Driven by a `tokio::time::interval` at the configured
//! tick rate and serialized against incoming commands via `tokio::select!`
//! — no command handler ever runs concurrently with a tick step.

use std::time::Duration;

use elevator_sim::{Engine, EngineConfig, EngineError, EngineObserver, EngineResult, Snapshot};
use tokio::sync::{broadcast, mpsc};
use tokio::time::MissedTickBehavior;
use tracing::{error, warn};

use crate::command::{Command, CommandEnvelope, Reply};
use crate::event::EngineEvent;

pub const COMMAND_CHANNEL_CAPACITY: usize = 256;
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Forwards [`EngineObserver`] callbacks onto the broadcast channel every
/// WebSocket subscriber listens on.
struct BroadcastObserver<'a> {
    tx: &'a broadcast::Sender<EngineEvent>,
}

impl EngineObserver for BroadcastObserver<'_> {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        // No receivers is the common case between subscribers; `send`
        // erroring just means nobody's listening right now, not a fault.
        let _ = self.tx.send(EngineEvent::Snapshot { data: snapshot.clone() });
    }

    fn on_info(&mut self, message: &str) {
        let _ = self.tx.send(EngineEvent::Info { message: message.to_string() });
    }

    fn on_error(&mut self, error: &EngineError) {
        let _ = self.tx.send(EngineEvent::Error { message: error.to_string(), kind: error.kind() });
    }
}

/// Runs until `command_rx` closes (the transport layer is shutting down).
pub async fn run_engine_task(
    config: EngineConfig,
    seed: u64,
    tick_ms: u64,
    mut command_rx: mpsc::Receiver<CommandEnvelope>,
    event_tx: broadcast::Sender<EngineEvent>,
) {
    let mut engine = Engine::new(config, seed);
    let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
    // A tick that runs long should not fire a burst of catch-up ticks —
    // the tick body never yields (§5), so a delayed tick is the right
    // backpressure rather than piling up simulated time.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let mut observer = BroadcastObserver { tx: &event_tx };
                engine.tick(tick_ms as f64, &mut observer);
            }
            maybe_envelope = command_rx.recv() => {
                let Some(envelope) = maybe_envelope else {
                    warn!("command channel closed; stopping engine task");
                    break;
                };
                handle_command(&mut engine, envelope, &event_tx);
            }
        }
    }
}

fn handle_command(engine: &mut Engine, envelope: CommandEnvelope, event_tx: &broadcast::Sender<EngineEvent>) {
    let CommandEnvelope { command, reply } = envelope;
    let mut observer = BroadcastObserver { tx: event_tx };

    let outcome: EngineResult<Reply> = match command {
        Command::Start => {
            engine.start();
            observer.on_info("engine started");
            Ok(Reply::Ack)
        }
        Command::Stop => {
            engine.stop();
            observer.on_info("engine stopped");
            Ok(Reply::Ack)
        }
        Command::Reset => {
            engine.reset(&mut observer);
            observer.on_info("engine reset");
            Ok(Reply::Ack)
        }
        Command::SetSpeed(speed) => engine.set_speed(speed).map(|()| {
            observer.on_info(&format!("speed set to {speed}"));
            Reply::Ack
        }),
        Command::CurrentConfig => Ok(Reply::Config(engine.config().clone())),
        Command::Reconfig(new_config) => engine.reconfig(new_config).map(|()| {
            observer.on_info("engine reconfigured");
            Reply::Ack
        }),
        Command::AddManualRequest(spec) => engine.add_manual_request(spec).map(Reply::Request),
        Command::SpawnScenario { name, count } => {
            engine.spawn_scenario(&name, count).map(Reply::ScenarioInserted)
        }
        Command::SetRequestFrequency(freq) => {
            engine.set_request_frequency(freq);
            observer.on_info(&format!("request frequency set to {freq}/min"));
            Ok(Reply::Ack)
        }
        Command::Snapshot => Ok(Reply::Snapshot(engine.snapshot())),
        Command::MetricsSnapshot => Ok(Reply::Metrics(engine.metrics_snapshot())),
    };

    if let Err(ref err) = outcome {
        observer.on_error(err);
    }
    if reply.send(outcome).is_err() {
        error!("command reply channel dropped before a response could be sent");
    }
}
