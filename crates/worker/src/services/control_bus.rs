//! Postgres-backed coordination bus.
//!
//! Control signals and inbox payloads travel over `NOTIFY`/`LISTEN`
//! channels on the main database. `NOTIFY` payloads are text, so the
//! MessagePack inbox bytes go over the wire base64-encoded; the delivery
//! side decodes before unpacking.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use domain::services::{BusError, ControlBus, ControlSignal, ControlStream};
use sqlx::postgres::{PgListener, PgPool};
use tracing::warn;

pub struct PgControlBus {
    pool: PgPool,
    control_channel: String,
    inbox_channel: String,
}

impl PgControlBus {
    pub fn new(pool: PgPool, control_channel: String, inbox_channel: String) -> Self {
        Self {
            pool,
            control_channel,
            inbox_channel,
        }
    }

    async fn notify(&self, channel: &str, payload: &str) -> Result<(), BusError> {
        sqlx::query("SELECT pg_notify($1, $2)")
            .bind(channel)
            .bind(payload)
            .execute(&self.pool)
            .await
            .map_err(|e| BusError::Transport(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ControlBus for PgControlBus {
    async fn publish(&self, signal: ControlSignal) -> Result<(), BusError> {
        self.notify(&self.control_channel, signal.as_wire()).await
    }

    async fn subscribe(&self) -> Result<Box<dyn ControlStream>, BusError> {
        let mut listener = PgListener::connect_with(&self.pool)
            .await
            .map_err(|e| BusError::Transport(e.to_string()))?;
        listener
            .listen(&self.control_channel)
            .await
            .map_err(|e| BusError::Transport(e.to_string()))?;
        Ok(Box::new(PgControlStream { listener }))
    }

    async fn publish_inbox(&self, payload: &[u8]) -> Result<(), BusError> {
        self.notify(&self.inbox_channel, &STANDARD.encode(payload))
            .await
    }
}

struct PgControlStream {
    listener: PgListener,
}

#[async_trait]
impl ControlStream for PgControlStream {
    async fn next(&mut self) -> Option<ControlSignal> {
        loop {
            match self.listener.recv().await {
                Ok(notification) => {
                    match ControlSignal::from_wire(notification.payload()) {
                        Some(signal) => return Some(signal),
                        None => {
                            warn!(
                                payload = notification.payload(),
                                "Ignoring unknown control payload"
                            );
                        }
                    }
                }
                Err(err) => {
                    warn!(error = %err, "Control channel connection lost");
                    return None;
                }
            }
        }
    }
}
