//! Relay protocol handler
//!
//! Implements `ConnectionLifecycle` by delegating each transition to its use
//! case and applying the failure policy: malformed payloads are logged and
//! dropped, nothing here ever closes a connection.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{CloseReason, Connection, ConnectionId, ConnectionLifecycle, ConnectionRegistry};

use super::{ConnectUseCase, DisconnectUseCase, RelayMessageUseCase};

/// Drives the relay for every connection of a transport
pub struct RelayHandler {
    connect_usecase: ConnectUseCase,
    relay_message_usecase: RelayMessageUseCase,
    disconnect_usecase: DisconnectUseCase,
}

impl RelayHandler {
    /// Create a handler whose use cases share `registry`
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self {
            connect_usecase: ConnectUseCase::new(registry.clone()),
            relay_message_usecase: RelayMessageUseCase::new(registry.clone()),
            disconnect_usecase: DisconnectUseCase::new(registry),
        }
    }
}

#[async_trait]
impl ConnectionLifecycle for RelayHandler {
    async fn on_open(&self, connection: Arc<dyn Connection>) {
        let id = connection.id().clone();
        let connected = self.connect_usecase.execute(connection).await;
        tracing::info!("Client '{}' connected ({} connected)", id, connected);
    }

    async fn on_message(&self, sender: &ConnectionId, payload: &str) {
        match self.relay_message_usecase.execute(sender, payload).await {
            Ok(report) if report.failed.is_empty() => {
                tracing::debug!(
                    "Relayed message from '{}' to {} connection(s)",
                    sender,
                    report.delivered
                );
            }
            Ok(report) => {
                tracing::warn!(
                    "Relayed message from '{}' to {} of {} connection(s)",
                    sender,
                    report.delivered,
                    report.attempted()
                );
            }
            Err(e) => {
                tracing::warn!("Dropped message from '{}': {}", sender, e);
            }
        }
    }

    async fn on_close(&self, id: &ConnectionId, reason: CloseReason) {
        if self.disconnect_usecase.execute(id).await {
            tracing::info!("Client '{}' disconnected: {}", id, reason);
        } else {
            tracing::debug!("Client '{}' already removed ({})", id, reason);
        }
    }

    fn on_transport_error(&self, id: &ConnectionId, error: &str) {
        tracing::warn!("Transport error on '{}': {}", id, error);
    }
}
