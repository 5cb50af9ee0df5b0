//! Coordination bus contract.
//!
//! One shared channel carries two control signals between worker instances;
//! a second channel carries pre-serialized inbox payloads to the delivery
//! collaborator. The wire values are single characters so any pub/sub
//! transport can carry them.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use tokio::sync::broadcast;

/// Control signals exchanged on the coordination channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    /// "0": run one poll-and-process pass now.
    Process,
    /// "1": a new instance is taking over; the receiver must exit.
    Takeover,
}

impl ControlSignal {
    pub fn as_wire(&self) -> &'static str {
        match self {
            ControlSignal::Process => "0",
            ControlSignal::Takeover => "1",
        }
    }

    /// Unknown payloads yield `None` and are ignored by subscribers.
    pub fn from_wire(payload: &str) -> Option<Self> {
        match payload {
            "0" => Some(ControlSignal::Process),
            "1" => Some(ControlSignal::Takeover),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum BusError {
    #[error("Bus transport error: {0}")]
    Transport(String),

    #[error("Payload encode error: {0}")]
    Encode(String),
}

/// A live subscription to the coordination channel.
#[async_trait]
pub trait ControlStream: Send {
    /// The next control signal, or `None` once the channel is gone.
    async fn next(&mut self) -> Option<ControlSignal>;
}

/// Publish/subscribe access to the coordination channel plus the inbox
/// delivery channel.
#[async_trait]
pub trait ControlBus: Send + Sync {
    async fn publish(&self, signal: ControlSignal) -> Result<(), BusError>;

    async fn subscribe(&self) -> Result<Box<dyn ControlStream>, BusError>;

    /// Push a pre-serialized notification payload (opaque bytes) to the
    /// inbox delivery collaborator.
    async fn publish_inbox(&self, payload: &[u8]) -> Result<(), BusError>;
}

/// In-memory bus for development and testing.
///
/// Behaves like a shared broadcast channel: every subscriber sees every
/// control signal published after it subscribed. Inbox payloads are captured
/// for inspection instead of being delivered anywhere.
pub struct MemoryControlBus {
    control: broadcast::Sender<ControlSignal>,
    inbox: Mutex<Vec<Vec<u8>>>,
    fail_inbox: AtomicBool,
}

impl MemoryControlBus {
    pub fn new() -> Self {
        let (control, _) = broadcast::channel(64);
        Self {
            control,
            inbox: Mutex::new(Vec::new()),
            fail_inbox: AtomicBool::new(false),
        }
    }

    /// Everything published to the inbox channel so far.
    pub fn inbox_messages(&self) -> Vec<Vec<u8>> {
        self.inbox.lock().unwrap().clone()
    }

    /// Make subsequent inbox publishes fail, for failure-path tests.
    pub fn fail_inbox_publishes(&self, fail: bool) {
        self.fail_inbox.store(fail, Ordering::SeqCst);
    }
}

impl Default for MemoryControlBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ControlBus for MemoryControlBus {
    async fn publish(&self, signal: ControlSignal) -> Result<(), BusError> {
        // A send with no subscribers just drops the message, matching
        // fire-and-forget pub/sub semantics.
        let _ = self.control.send(signal);
        Ok(())
    }

    async fn subscribe(&self) -> Result<Box<dyn ControlStream>, BusError> {
        Ok(Box::new(MemoryControlStream {
            receiver: self.control.subscribe(),
        }))
    }

    async fn publish_inbox(&self, payload: &[u8]) -> Result<(), BusError> {
        if self.fail_inbox.load(Ordering::SeqCst) {
            return Err(BusError::Transport("simulated inbox failure".to_string()));
        }
        self.inbox.lock().unwrap().push(payload.to_vec());
        Ok(())
    }
}

struct MemoryControlStream {
    receiver: broadcast::Receiver<ControlSignal>,
}

#[async_trait]
impl ControlStream for MemoryControlStream {
    async fn next(&mut self) -> Option<ControlSignal> {
        loop {
            match self.receiver.recv().await {
                Ok(signal) => return Some(signal),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Control stream lagged, signals dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
