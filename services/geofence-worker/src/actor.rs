//! The engine lives inside one task; every gesture and location sample is a
//! message to it, so mutations never interleave.

use crate::protocol::{handle, Command, Reply};
use geofence_engine::GeofenceEngine;
use tokio::sync::{mpsc, oneshot};

struct Envelope {
    command: Command,
    reply: oneshot::Sender<Vec<Reply>>,
}

#[derive(Clone)]
pub struct EngineHandle {
    sender: mpsc::Sender<Envelope>,
}

impl EngineHandle {
    pub fn spawn(engine: GeofenceEngine, buffer: usize) -> (Self, tokio::task::JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        let task = tokio::spawn(run(engine, receiver));
        (Self { sender }, task)
    }

    /// Sends a command and waits for its replies. `None` once the actor has stopped.
    pub async fn call(&self, command: Command) -> Option<Vec<Reply>> {
        let (reply, response) = oneshot::channel();
        self.sender.send(Envelope { command, reply }).await.ok()?;
        response.await.ok()
    }
}

async fn run(mut engine: GeofenceEngine, mut receiver: mpsc::Receiver<Envelope>) {
    while let Some(Envelope { command, reply }) = receiver.recv().await {
        let replies = handle(&mut engine, command);
        if reply.send(replies).is_err() {
            tracing::debug!("caller went away before the reply");
        }
    }
    tracing::debug!(regions = engine.store().len(), "engine actor stopped");
}
