use tokio::sync::mpsc;

use crate::types::logs::LogLevel;

#[derive(Debug, Clone)]
pub struct LogEventPayload {
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ResolutionCompletedPayload {
    pub turn_id: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ResolutionFailedPayload {
    pub turn_id: String,
    pub error: String,
}

#[derive(Debug)]
pub enum AppEvent {
    Log(LogEventPayload),

    /// A reply is ready for the turn that was in flight.
    ResolutionCompleted(ResolutionCompletedPayload),
    /// The resolve task ended without producing a reply.
    ResolutionFailed(ResolutionFailedPayload),
}

pub struct EventBus {
    sender: mpsc::Sender<AppEvent>,
    receiver: mpsc::Receiver<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel(100);
        Self { sender, receiver }
    }

    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.sender.clone()
    }

    pub async fn recv(&mut self) -> Option<AppEvent> {
        self.receiver.recv().await
    }
}
