//! Single-active-instance coordination.
//!
//! Every worker shares one control channel. A starting instance announces a
//! takeover, then listens; whichever older instance hears the announcement
//! exits. The announce happens before the subscription opens, so an instance
//! never reads back its own takeover. The process signal published after
//! subscribing is read back on purpose and drives the first poll.

use domain::services::{ControlBus, ControlSignal};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::WorkerError;
use crate::poller::JobPoller;

pub struct InstanceCoordinator {
    bus: Arc<dyn ControlBus>,
    poller: JobPoller,
}

impl InstanceCoordinator {
    pub fn new(bus: Arc<dyn ControlBus>, poller: JobPoller) -> Self {
        Self { bus, poller }
    }

    /// Announce this instance, then poll on every process signal until the
    /// channel closes or a newer instance takes over.
    ///
    /// Returns `Ok(())` only on channel close. A takeover surfaces as
    /// [`WorkerError::Superseded`] so the caller can tell a clean shutdown
    /// from a handover.
    pub async fn run(&self) -> Result<(), WorkerError> {
        self.bus.publish(ControlSignal::Takeover).await?;
        let mut stream = self.bus.subscribe().await?;
        self.bus.publish(ControlSignal::Process).await?;

        info!("Worker instance active, listening for control signals");

        while let Some(signal) = stream.next().await {
            match signal {
                ControlSignal::Process => {
                    self.poller.poll_once().await?;
                }
                ControlSignal::Takeover => {
                    warn!("Takeover signal received, shutting down");
                    return Err(WorkerError::Superseded);
                }
            }
        }

        info!("Control channel closed, worker exiting");
        Ok(())
    }
}
